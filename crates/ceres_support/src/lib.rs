//! Support layer for Ceres.
//!
//! This crate provides the collaborators the container core consumes:
//! - [`TextBuffer`] - Bounded mutable text with explicit truncation signalling
//! - [`Diagnostic`] and [`DiagnosticSink`] - The side channel for non-fatal reports
//! - [`DiagnosticsConfig`] - Configuration for the default diagnostic sink

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod buffer;
pub mod config;
pub mod diagnostics;

pub use buffer::{Appended, DEFAULT_CAPACITY, TextBuffer};
pub use config::DiagnosticsConfig;
pub use diagnostics::{
    ConfiguredSink, Diagnostic, DiagnosticBuffer, DiagnosticRecord, DiagnosticSink, NullSink,
    Severity, SinkGuard, StderrSink, capture, install, report,
};
