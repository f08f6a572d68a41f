//! Reporting
//!
//! Every check ends in a leveled message handed to a [`Reporter`]. Reporters
//! are infallible: a check never has to handle a failed report.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::{error, info, warn};

/// Severity of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// Message sink used by every check
pub trait Reporter {
    /// Emit one message at the given severity
    fn report(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(Severity::Error, message);
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, severity: Severity, message: &str) {
        (**self).report(severity, message);
    }
}

/// Reporter that forwards to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!(target: "droid_doctor", "{}", message),
            Severity::Warning => warn!(target: "droid_doctor", "{}", message),
            Severity::Error => error!(target: "droid_doctor", "{}", message),
        }
    }
}

/// A single captured report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub message: String,
}

/// Reporter that keeps every message in order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().clone()
    }

    /// Reports at one severity
    pub fn with_severity(&self, severity: Severity) -> Vec<Report> {
        self.reports
            .lock()
            .iter()
            .filter(|r| r.severity == severity)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, severity: Severity, message: &str) {
        self.reports.lock().push(Report {
            severity,
            message: message.to_string(),
        });
    }
}

/// Counts warnings and errors while forwarding to an inner reporter
#[derive(Debug)]
pub struct TallyReporter<R> {
    inner: R,
    warnings: AtomicUsize,
    errors: AtomicUsize,
}

impl<R: Reporter> TallyReporter<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            warnings: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            warnings: self.warnings.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Reporter> Reporter for TallyReporter<R> {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Warning => {
                self.warnings.fetch_add(1, Ordering::Relaxed);
            }
            Severity::Error => {
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
            Severity::Info => {}
        }
        self.inner.report(severity, message);
    }
}

/// Aggregate outcome of a doctor run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub warnings: usize,
    pub errors: usize,
}

impl Summary {
    /// No error-level reports were emitted. Warnings are advisory.
    pub fn is_healthy(&self) -> bool {
        self.errors == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s), {} warning(s)", self.errors, self.warnings)
    }
}
