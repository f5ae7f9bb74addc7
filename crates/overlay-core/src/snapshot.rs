//! Analysis snapshot versioning.
//!
//! Every edit supersedes the previous analysis snapshot. Work issued against a snapshot carries
//! its [`SnapshotVersion`]; when the result comes back it is accepted only if no newer snapshot
//! has been issued since (last writer wins). Nothing is cancelled: stale results are dropped on
//! arrival.

use std::sync::Arc;

/// Monotonic snapshot version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotVersion(pub u64);

/// An immutable text snapshot tagged with its version.
#[derive(Debug, Clone)]
pub struct TextSnapshot {
    /// Snapshot version.
    pub version: SnapshotVersion,
    /// Full text at that version.
    pub text: Arc<str>,
}

/// Issues snapshot versions and filters out stale results.
#[derive(Debug, Default)]
pub struct SnapshotTracker {
    latest: u64,
}

impl SnapshotTracker {
    /// Create a tracker; the first issued version is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new snapshot for `text`, superseding all earlier ones.
    pub fn issue(&mut self, text: &str) -> TextSnapshot {
        self.latest += 1;
        TextSnapshot {
            version: SnapshotVersion(self.latest),
            text: Arc::from(text),
        }
    }

    /// The newest issued version, if any.
    pub fn latest(&self) -> Option<SnapshotVersion> {
        (self.latest > 0).then_some(SnapshotVersion(self.latest))
    }

    /// Returns `true` if `version` is the newest issued version.
    pub fn is_current(&self, version: SnapshotVersion) -> bool {
        version.0 == self.latest
    }

    /// Pass `result` through if it was computed against the current snapshot.
    pub fn accept<T>(&self, version: SnapshotVersion, result: T) -> Option<T> {
        if self.is_current(version) {
            Some(result)
        } else {
            log::debug!(
                "discarding result for snapshot {} (latest is {})",
                version.0,
                self.latest
            );
            None
        }
    }
}
