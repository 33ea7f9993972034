//! Ceres - Generic containers over tagged, capability-bearing values
//!
//! This crate re-exports all layers of the Ceres system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: ceres_foundation  Values, type tags, dispatch, Array/Collection/List
//! Layer 0: ceres_support     Bounded text buffers, diagnostics
//! ```

pub use ceres_foundation as foundation;
pub use ceres_support as support;
