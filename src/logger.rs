//! The logger collaborator (§6): a level-filtered diagnostic sink with an
//! adjustable backtrace threshold, layered over the `log` facade.

use std::backtrace::Backtrace;

/// A thin wrapper around the `log` crate's global logger that additionally
/// renders a backtrace into the record once a diagnostic's level reaches
/// `backtrace_threshold`.
///
/// This mirrors the original `Logger::setBackTraceLevel`/`getBackTraceLevel`
/// pair, which the `extract` path uses to suppress backtraces around its
/// routine `NotRemovable` warning and restore the prior threshold
/// afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    backtrace_threshold: log::Level,
}

impl Default for Logger {
    fn default() -> Self {
        // By default, only errors carry a backtrace -- routine warnings
        // (like an aborted non-recursive extraction) should not pay for one.
        Self {
            backtrace_threshold: log::Level::Error,
        }
    }
}

impl Logger {
    /// Creates a logger with the given backtrace threshold.
    #[must_use]
    pub fn new(backtrace_threshold: log::Level) -> Self {
        Self {
            backtrace_threshold,
        }
    }

    /// Returns the current backtrace threshold.
    #[must_use]
    pub fn backtrace_threshold(&self) -> log::Level {
        self.backtrace_threshold
    }

    /// Temporarily sets the backtrace threshold, returning the previous
    /// value so the caller can restore it (the original's `extract` does
    /// exactly this around its warning, to avoid paying for a backtrace on
    /// an expected, routine condition).
    pub fn set_backtrace_threshold(&mut self, level: log::Level) -> log::Level {
        std::mem::replace(&mut self.backtrace_threshold, level)
    }

    fn emit(&self, level: log::Level, message: &str) {
        if level <= self.backtrace_threshold {
            log::log!(level, "{message}\n{:?}", Backtrace::capture());
        } else {
            log::log!(level, "{message}");
        }
    }

    /// Logs at [`log::Level::Warn`].
    pub fn warn(&self, message: &str) {
        self.emit(log::Level::Warn, message);
    }

    /// Logs at [`log::Level::Debug`].
    pub fn debug(&self, message: &str) {
        self.emit(log::Level::Debug, message);
    }

    /// Logs at [`log::Level::Trace`] (the original's "fine" level).
    pub fn fine(&self, message: &str) {
        self.emit(log::Level::Trace, message);
    }
}
