//! Configuration for the diagnostic side channel.

use crate::diagnostics::{ConfiguredSink, Severity};

/// Configuration for the default diagnostic sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Whether diagnostics are recorded at all.
    pub enabled: bool,

    /// Echo accepted diagnostics to stderr.
    pub to_stderr: bool,

    /// Number of recent diagnostics retained.
    pub buffer_size: usize,

    /// Lowest severity that is accepted.
    pub min_severity: Severity,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            to_stderr: true,
            buffer_size: 256,
            min_severity: Severity::Warning,
        }
    }
}

impl DiagnosticsConfig {
    /// Records warnings and errors without printing them.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            to_stderr: false,
            ..Self::default()
        }
    }

    /// Prints and records everything, including informational notes.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            to_stderr: true,
            buffer_size: 1024,
            min_severity: Severity::Info,
        }
    }

    /// Drops every diagnostic.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Builder method to set enabled state.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder method to enable/disable stderr output.
    #[must_use]
    pub fn with_to_stderr(mut self, to_stderr: bool) -> Self {
        self.to_stderr = to_stderr;
        self
    }

    /// Builder method to set the retained buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to set the minimum severity.
    #[must_use]
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Builds a sink for this configuration.
    #[must_use]
    pub fn build(self) -> ConfiguredSink {
        ConfiguredSink::new(self)
    }
}
