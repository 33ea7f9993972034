//! Integration tests for Error types
//!
//! Tests error construction, display, context, and reporting.

use ceres_foundation::{Error, ErrorContext, ErrorKind, Number, TypeTag};
use ceres_support::{Severity, capture};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch(TypeTag::Integer, TypeTag::String);
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("integer"));
    assert!(msg.contains("string"));
}

#[test]
fn error_index_out_of_bounds() {
    let err = Error::index_out_of_bounds(10, 3);
    assert_eq!(err.to_string(), "index out of bounds: 10 (length 3)");
}

#[test]
fn error_allocation_failed() {
    let err = Error::allocation_failed(4096);
    assert!(err.to_string().contains("4096"));
}

#[test]
fn error_not_comparable() {
    let err = Error::not_comparable(TypeTag::Time, TypeTag::String);
    assert_eq!(err.to_string(), "cannot compare time with string");
}

#[test]
fn number_errors() {
    assert!(matches!(Number::new(40).unwrap_err().kind, ErrorKind::InvalidBase(40)));
    assert!(matches!(
        Number::from_digits(&[1, 9], 8, false).unwrap_err().kind,
        ErrorKind::InvalidDigit { digit: 9, base: 8 }
    ));
    assert!(matches!(
        Number::from_digits(&[1; 65], 2, false).unwrap_err().kind,
        ErrorKind::CapacityExceeded { limit: 64 }
    ));
}

// =============================================================================
// Context and Reporting
// =============================================================================

#[test]
fn context_display() {
    let err = Error::index_out_of_bounds(1, 0).with_context(
        ErrorContext::new()
            .with_operation("remove_at")
            .with_element(TypeTag::Object),
    );
    assert_eq!(
        err.context.unwrap().to_string(),
        "in remove_at on array<object>"
    );
}

#[test]
fn reported_errors_reach_the_sink() {
    let (_, diagnostics) = capture(|| {
        Error::type_mismatch(TypeTag::Real, TypeTag::Boolean).reported(Severity::Warning)
    });
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].file.ends_with("errors.rs"));
    assert_eq!(diagnostics[0].module, "ceres_foundation");
}
