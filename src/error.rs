//! An implementation of `Error` type.

use thiserror::Error;

use crate::handle::Handle;

/// The error type for operations on an [`AtomTable`](crate::table::AtomTable).
///
/// Application code should treat these as programmer mistakes (a stale
/// handle, a malformed query) rather than recoverable runtime conditions,
/// with one exception: [`Error::NotRemovable`] is never returned by
/// [`AtomTable::extract`](crate::table::AtomTable::extract) itself -- per
/// the propagation policy, an aborted extraction instead returns an empty
/// set and logs a warning. The variant exists so callers that want to
/// report the same condition through their own error channel can construct
/// it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A handle does not resolve to a live atom.
    #[error("handle {0:?} does not resolve to a live atom")]
    InvalidHandle(Handle),

    /// A link's outgoing tuple contains a handle that does not resolve.
    #[error("link outgoing tuple contains invalid handle {0:?}")]
    InvalidLink(Handle),

    /// `add` was given a candidate that already carries a handle, but a
    /// structural duplicate already exists in the table.
    #[error("attempted to insert atom with handle already set")]
    HandleAlreadyAssigned,

    /// A query has contradictory or insufficient constraints, e.g. a name
    /// constraint on a slot without an accompanying type.
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),

    /// Extraction aborted: the target's incoming set is non-empty and the
    /// caller did not ask for a recursive extraction.
    #[error("cannot remove atom {0:?}: incoming set is non-empty")]
    NotRemovable(Handle),
}

/// A specialized `Result` type for operations on an `AtomTable`.
pub type Result<T> = std::result::Result<T, Error>;
