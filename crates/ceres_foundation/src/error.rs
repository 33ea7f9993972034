//! Error types for Ceres.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every error raised by a container operation is also reported to the
//! diagnostic sink at the point of detection.

use std::fmt;
use std::panic::Location;

use ceres_support::{Diagnostic, Severity, report};
use thiserror::Error;

use crate::types::TypeTag;

/// Result type alias for Ceres operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Ceres operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: TypeTag, actual: TypeTag) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an index out of bounds error.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfBounds { index, length })
    }

    /// Creates an allocation failure error.
    #[must_use]
    pub fn allocation_failed(requested: usize) -> Self {
        Self::new(ErrorKind::AllocationFailed { requested })
    }

    /// Creates an incomparable values error.
    #[must_use]
    pub fn not_comparable(left: TypeTag, right: TypeTag) -> Self {
        Self::new(ErrorKind::NotComparable { left, right })
    }

    /// Sends this error to the diagnostic sink, attributed to the caller.
    #[must_use]
    #[track_caller]
    pub fn reported(self, severity: Severity) -> Self {
        let location = Location::caller();
        let message = match &self.context {
            Some(context) => format!("{self} ({context})"),
            None => self.to_string(),
        };
        report(Diagnostic::new(
            severity,
            location.file(),
            env!("CARGO_CRATE_NAME"),
            location.line(),
            message,
        ));
        self
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A value of the wrong kind was offered to a container or wrapper.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The element kind the container holds.
        expected: TypeTag,
        /// The kind that was offered.
        actual: TypeTag,
    },

    /// Index out of bounds.
    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: usize,
        /// The actual length of the collection.
        length: usize,
    },

    /// The backing store could not be grown.
    #[error("allocation of {requested} bytes failed")]
    AllocationFailed {
        /// Number of bytes requested.
        requested: usize,
    },

    /// Two values have no ordering relative to each other.
    #[error("cannot compare {left} with {right}")]
    NotComparable {
        /// Kind of the left operand.
        left: TypeTag,
        /// Kind of the right operand.
        right: TypeTag,
    },

    /// Digit radix outside the supported range.
    #[error("invalid base: {0}")]
    InvalidBase(u8),

    /// Digit not representable in the number's base.
    #[error("digit {digit} is invalid in base {base}")]
    InvalidDigit {
        /// The offending digit value.
        digit: u8,
        /// The base of the number.
        base: u8,
    },

    /// A fixed-capacity value ran out of room.
    #[error("capacity of {limit} exceeded")]
    CapacityExceeded {
        /// The fixed capacity.
        limit: usize,
    },
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation that failed, such as `add` or `resize`.
    pub operation: Option<&'static str>,
    /// Element kind of the container involved.
    pub element: Option<TypeTag>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing operation.
    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Sets the container's element kind.
    #[must_use]
    pub fn with_element(mut self, element: TypeTag) -> Self {
        self.element = Some(element);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.operation, self.element) {
            (Some(operation), Some(element)) => write!(f, "in {operation} on array<{element}>"),
            (Some(operation), None) => write!(f, "in {operation}"),
            (None, Some(element)) => write!(f, "on array<{element}>"),
            (None, None) => Ok(()),
        }
    }
}
