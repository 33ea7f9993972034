//! Integration tests for the diagnostic side channel
//!
//! Tests sinks, the per-thread current sink, and configuration.

use std::cell::RefCell;
use std::rc::Rc;

use ceres_support::{
    Diagnostic, DiagnosticBuffer, DiagnosticSink, DiagnosticsConfig, NullSink, Severity, capture,
    diagnostic, install, report,
};

fn note(severity: Severity, message: &str) -> Diagnostic {
    Diagnostic::new(severity, file!(), module_path!(), line!(), message)
}

// =============================================================================
// Current Sink
// =============================================================================

#[test]
fn capture_collects_reports() {
    let ((), diagnostics) = capture(|| {
        report(note(Severity::Warning, "first"));
        diagnostic!(Severity::Error, "second {}", 2);
    });
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[1].message, "second 2");
    assert_eq!(diagnostics[1].severity, Severity::Error);
    assert!(diagnostics[1].file.ends_with("diagnostics.rs"));
    assert!(diagnostics[1].module.contains("diagnostics"));
}

#[test]
fn nested_capture_restores_outer_sink() {
    let ((), outer) = capture(|| {
        let ((), inner) = capture(|| diagnostic!(Severity::Info, "inner"));
        assert_eq!(inner.len(), 1);
        diagnostic!(Severity::Info, "outer");
    });
    assert_eq!(outer.len(), 1);
    assert_eq!(outer[0].message, "outer");
}

#[test]
fn install_routes_until_guard_drops() {
    let buffer = Rc::new(RefCell::new(DiagnosticBuffer::new(8)));
    {
        let _guard = install(Rc::clone(&buffer));
        diagnostic!(Severity::Warning, "kept");
    }
    let _quiet = install(NullSink);
    diagnostic!(Severity::Warning, "dropped");
    assert_eq!(buffer.borrow().len(), 1);
}

// =============================================================================
// Buffer
// =============================================================================

#[test]
fn buffer_keeps_most_recent_with_increasing_ids() {
    let mut buffer = DiagnosticBuffer::new(2);
    for message in ["a", "b", "c"] {
        buffer.report(note(Severity::Warning, message));
    }
    let ids: Vec<u64> = buffer.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(buffer.last().unwrap().diagnostic.message, "c");
    buffer.clear();
    buffer.report(note(Severity::Error, "d"));
    assert_eq!(buffer.last().unwrap().id, 3);
    assert_eq!(buffer.count(Severity::Error), 1);
}

#[test]
fn display_format() {
    let d = Diagnostic::new(Severity::Warning, "src/array.rs", "ceres::array", 12, "oops");
    assert_eq!(d.to_string(), "[warning] src/array.rs:12 ceres::array: oops");
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn configured_sink_filters_by_severity() {
    let mut sink = DiagnosticsConfig::quiet().build();
    sink.report(note(Severity::Info, "ignored"));
    sink.report(note(Severity::Warning, "kept"));
    assert_eq!(sink.recent().len(), 1);

    let mut everything = DiagnosticsConfig::quiet()
        .with_min_severity(Severity::Info)
        .with_buffer_size(4)
        .build();
    everything.report(note(Severity::Info, "kept"));
    assert_eq!(everything.recent().len(), 1);
    assert_eq!(everything.config().buffer_size, 4);
}

#[test]
fn disabled_config_records_nothing() {
    let mut sink = DiagnosticsConfig::disabled().build();
    sink.report(note(Severity::Error, "gone"));
    assert!(sink.recent().is_empty());
}

#[test]
fn presets() {
    let default = DiagnosticsConfig::default();
    assert!(default.enabled);
    assert_eq!(default.min_severity, Severity::Warning);
    assert_eq!(DiagnosticsConfig::development().min_severity, Severity::Info);
    assert!(!DiagnosticsConfig::quiet().to_stderr);
}
