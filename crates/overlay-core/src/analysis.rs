//! Analysis collaborator interface.
//!
//! Parsing and type checking live outside this crate. The collaborator analyzes a full text
//! snapshot and returns its diagnostics plus an opaque semantic model that downstream crates
//! (completion) query.

use crate::diagnostics::Diagnostic;
use crate::snapshot::{SnapshotVersion, TextSnapshot};

/// Result of analyzing one text snapshot.
#[derive(Debug, Clone)]
pub struct Analysis<M> {
    /// Snapshot the analysis was computed from.
    pub version: SnapshotVersion,
    /// Diagnostics for the snapshot.
    pub diagnostics: Vec<Diagnostic>,
    /// Semantic model for the snapshot.
    pub model: M,
}

/// The analysis collaborator.
pub trait Analyzer {
    /// Semantic model produced per snapshot.
    type Model;

    /// Analyze a snapshot. Implementations must not retain or mutate the snapshot.
    fn analyze(&self, snapshot: &TextSnapshot) -> Analysis<Self::Model>;
}
