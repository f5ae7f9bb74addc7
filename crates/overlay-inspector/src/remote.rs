//! Remote object collaborator.
//!
//! Out-of-process objects are reached through two getters. The inspector calls them lazily, at
//! most once per node, and never retries: a failure is recorded on the affected nodes as-is.

use crate::chunk::IndexRange;
use crate::value::RemoteValue;
use thiserror::Error;

/// Opaque handle to a remote object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemoteId(pub u64);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure reported by the remote collaborator.
pub enum RemoteError {
    #[error("remote object {0:?} is no longer available")]
    /// The owner object was collected or the session ended.
    Gone(RemoteId),

    #[error("evaluation failed: {0}")]
    /// The getter raised inside the debuggee.
    Evaluation(String),

    #[error("no remote collaborator attached")]
    /// The tree was built from local values only.
    Detached,
}

/// The remote debug collaborator.
pub trait RemoteObjects {
    /// Fetch a named member of `owner`.
    fn property_or_field(
        &mut self,
        owner: RemoteId,
        name: &str,
        is_property: bool,
    ) -> Result<RemoteValue, RemoteError>;

    /// Fetch the items of `owner` in `range` (inclusive).
    fn items(
        &mut self,
        owner: RemoteId,
        range: IndexRange,
    ) -> Result<Vec<RemoteValue>, RemoteError>;
}

/// Collaborator for trees built purely from local values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl RemoteObjects for Detached {
    fn property_or_field(
        &mut self,
        _owner: RemoteId,
        _name: &str,
        _is_property: bool,
    ) -> Result<RemoteValue, RemoteError> {
        Err(RemoteError::Detached)
    }

    fn items(
        &mut self,
        _owner: RemoteId,
        _range: IndexRange,
    ) -> Result<Vec<RemoteValue>, RemoteError> {
        Err(RemoteError::Detached)
    }
}
