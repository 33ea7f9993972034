//! Diagnostic side channel.
//!
//! Container operations never panic on bad input. They report what went wrong
//! here and return a no-op result, leaving the caller to decide how severe the
//! failure is. Reports go to a per-thread sink which defaults to the sink built
//! from [`DiagnosticsConfig::default`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::DiagnosticsConfig;

// =============================================================================
// Diagnostic
// =============================================================================

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// Informational note.
    Info,
    /// Recoverable misuse, such as a type mismatch or truncated output.
    Warning,
    /// Failed operation, such as an out-of-bounds index or failed allocation.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious the report is.
    pub severity: Severity,
    /// Source file of the reporting code.
    pub file: &'static str,
    /// Module path of the reporting code.
    pub module: &'static str,
    /// Source line of the reporting code.
    pub line: u32,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic.
    #[must_use]
    pub fn new(
        severity: Severity,
        file: &'static str,
        module: &'static str,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            file,
            module,
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}:{} {}: {}",
            self.severity, self.file, self.line, self.module, self.message
        )
    }
}

/// Reports a diagnostic to the current sink, recording the call site.
///
/// ```
/// use ceres_support::{Severity, diagnostic};
///
/// diagnostic!(Severity::Warning, "capacity {} is unusually large", 1 << 30);
/// ```
#[macro_export]
macro_rules! diagnostic {
    ($severity:expr, $($arg:tt)+) => {
        $crate::diagnostics::report($crate::diagnostics::Diagnostic::new(
            $severity,
            file!(),
            module_path!(),
            line!(),
            format!($($arg)+),
        ))
    };
}

// =============================================================================
// Sinks
// =============================================================================

/// Destination for diagnostics.
pub trait DiagnosticSink {
    /// Accepts one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Rc<RefCell<S>> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.borrow_mut().report(diagnostic);
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

/// Prints diagnostics at or above a severity to stderr.
#[derive(Clone, Copy, Debug)]
pub struct StderrSink {
    /// Lowest severity that is printed.
    pub min_severity: Severity,
}

impl Default for StderrSink {
    fn default() -> Self {
        Self {
            min_severity: Severity::Warning,
        }
    }
}

impl DiagnosticSink for StderrSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity >= self.min_severity {
            eprintln!("{diagnostic}");
        }
    }
}

/// A diagnostic with its sequence number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticRecord {
    /// Monotonically increasing id, never reused after eviction or clearing.
    pub id: u64,
    /// The recorded diagnostic.
    pub diagnostic: Diagnostic,
}

/// Ring buffer keeping the most recent diagnostics.
#[derive(Clone, Debug)]
pub struct DiagnosticBuffer {
    records: VecDeque<DiagnosticRecord>,
    max_size: usize,
    next_id: u64,
}

impl DiagnosticBuffer {
    /// Creates a buffer that keeps at most `max_size` records.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
        }
    }

    /// Creates a buffer that never evicts.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops all records. Ids keep increasing.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Iterates over retained records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticRecord> {
        self.records.iter()
    }

    /// The most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&DiagnosticRecord> {
        self.records.back()
    }

    /// Number of retained records with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.records
            .iter()
            .filter(|record| record.diagnostic.severity == severity)
            .count()
    }

    /// Removes and returns all retained diagnostics, oldest first.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        self.records.drain(..).map(|record| record.diagnostic).collect()
    }
}

impl DiagnosticSink for DiagnosticBuffer {
    fn report(&mut self, diagnostic: Diagnostic) {
        if self.max_size == 0 {
            return;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.records.push_back(DiagnosticRecord { id, diagnostic });
        while self.records.len() > self.max_size {
            self.records.pop_front();
        }
    }
}

/// Sink assembled from a [`DiagnosticsConfig`].
///
/// Filters by severity, optionally echoes to stderr, and keeps recent reports.
#[derive(Clone, Debug)]
pub struct ConfiguredSink {
    config: DiagnosticsConfig,
    recent: DiagnosticBuffer,
}

impl ConfiguredSink {
    /// Creates a sink for `config`.
    #[must_use]
    pub fn new(config: DiagnosticsConfig) -> Self {
        Self {
            recent: DiagnosticBuffer::new(config.buffer_size),
            config,
        }
    }

    /// The configuration this sink was built from.
    #[must_use]
    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Recently retained diagnostics.
    #[must_use]
    pub fn recent(&self) -> &DiagnosticBuffer {
        &self.recent
    }
}

impl DiagnosticSink for ConfiguredSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        if !self.config.enabled || diagnostic.severity < self.config.min_severity {
            return;
        }
        if self.config.to_stderr {
            eprintln!("{diagnostic}");
        }
        self.recent.report(diagnostic);
    }
}

// =============================================================================
// Current Sink
// =============================================================================

thread_local! {
    static CURRENT: RefCell<Box<dyn DiagnosticSink>> =
        RefCell::new(Box::new(DiagnosticsConfig::default().build()));
}

/// Sends a diagnostic to this thread's current sink.
pub fn report(diagnostic: Diagnostic) {
    CURRENT.with(|sink| sink.borrow_mut().report(diagnostic));
}

/// Restores the previously installed sink when dropped.
#[must_use = "the sink is uninstalled as soon as the guard is dropped"]
pub struct SinkGuard {
    previous: Option<Box<dyn DiagnosticSink>>,
}

impl fmt::Debug for SinkGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkGuard").finish_non_exhaustive()
    }
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            CURRENT.with(|sink| *sink.borrow_mut() = previous);
        }
    }
}

/// Installs `sink` as this thread's current sink until the guard is dropped.
pub fn install(sink: impl DiagnosticSink + 'static) -> SinkGuard {
    let previous = CURRENT.with(|current| current.replace(Box::new(sink)));
    SinkGuard {
        previous: Some(previous),
    }
}

/// Runs `f` and returns its output together with every diagnostic it reported.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Diagnostic>) {
    let buffer = Rc::new(RefCell::new(DiagnosticBuffer::unbounded()));
    let guard = install(Rc::clone(&buffer));
    let output = f();
    drop(guard);
    let diagnostics = buffer.borrow_mut().drain();
    (output, diagnostics)
}
