//! Tagged values, capability dispatch, and the generic container for Ceres.
//!
//! This crate provides:
//! - [`Value`] - The type-erased value model, with [`Structure`] and [`Object`] wrappers
//! - [`TypeTag`] - The closed registry of element kinds
//! - [`dispatch`] - Compare, equals, hash, and render across kinds
//! - [`Basic`], [`Comparable`], [`Element`] - Capability traits for elements
//! - [`Cursor`] - Single-pass iteration
//! - [`Iterable`], [`Collection`], [`List`] - Default-method capability layers
//! - [`Array`] - The homogeneous, resizable container
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod array;
pub mod capability;
pub mod collection;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod iterator;
pub mod number;
pub mod object;
pub mod structure;
pub mod time;
pub mod types;
pub mod value;

pub use array::Array;
pub use capability::{Basic, Comparable, Element};
pub use collection::{Collection, Found, Iterable, List};
pub use config::{ArrayConfig, NullHash};
pub use crate::core::Core;
pub use dispatch::{EPSILON, NOT_COMPARABLE, compare_to, equals, hash, try_compare};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use iterator::{Cursor, CursorState};
pub use number::{Digit, Number};
pub use object::Object;
pub use structure::Structure;
pub use time::Time;
pub use types::TypeTag;
pub use value::Value;

pub use ceres_support::{Appended, TextBuffer};
