//! Construction options for an [`AtomTable`](crate::table::AtomTable).

use serde::{Deserialize, Serialize};

use crate::logger::Logger;

/// Options controlling an `AtomTable`'s ambient collaborators.
///
/// These parameters apply to the table's external-collaborator wiring, not
/// to the core algorithms themselves (which have no tunables -- the
/// canonical insertion/query protocol is fixed).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct AtomTableOptions {
    /// Whether a statistics-monitor collaborator should be consulted on
    /// every `add`/`remove`.
    ///
    /// Defaults to `false`: without an injected monitor there is nothing
    /// useful to call, so `AtomTable::uses_statistics` reflects whichever
    /// value is actually passed at construction, not this flag alone.
    pub use_statistics: bool,
    /// The backtrace threshold handed to the table's [`Logger`].
    ///
    /// Defaults to `log::Level::Error`, meaning only error-level
    /// diagnostics carry a captured backtrace.
    #[serde(skip, default = "default_backtrace_threshold")]
    pub backtrace_threshold: log::Level,
}

fn default_backtrace_threshold() -> log::Level {
    log::Level::Error
}

impl AtomTableOptions {
    /// Creates a new options object.
    #[must_use]
    pub fn new(use_statistics: bool, backtrace_threshold: log::Level) -> Self {
        Self {
            use_statistics,
            backtrace_threshold,
        }
    }

    pub(crate) fn logger(self) -> Logger {
        Logger::new(self.backtrace_threshold)
    }
}

impl Default for AtomTableOptions {
    fn default() -> Self {
        Self::new(false, default_backtrace_threshold())
    }
}
