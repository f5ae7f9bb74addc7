//! Completion requests against analysis snapshots.
//!
//! Each keystroke or caret move issues a new snapshot. Candidate computation runs against that
//! immutable snapshot wherever the host schedules it; when the response arrives it replaces the
//! shown popup only if no newer snapshot was issued in the meantime.

use crate::description::{Description, describe};
use crate::docs::ReferenceDocs;
use crate::model::SemanticModel;
use crate::overload::OverloadPopup;
use crate::popup::{PopupAnchor, PopupOptions};
use crate::selector::{CandidateList, CompletionMode, candidates_at};
use overlay_core::{Analyzer, SnapshotTracker, SnapshotVersion, TextSnapshot};

/// A pending candidate computation.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Snapshot to analyze.
    pub snapshot: TextSnapshot,
    /// Caret offset in characters.
    pub offset: usize,
    /// Popup kind.
    pub mode: CompletionMode,
}

/// Result of a candidate computation.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Snapshot the result was computed from.
    pub version: SnapshotVersion,
    /// Ranked candidates.
    pub list: CandidateList,
    /// One description per candidate.
    pub descriptions: Vec<Description>,
}

/// Run a request. Pure with respect to the controller, so it can run off the interactive thread.
pub fn compute<A>(
    analyzer: &A,
    docs: &ReferenceDocs,
    request: &CompletionRequest,
) -> CompletionResponse
where
    A: Analyzer,
    A::Model: SemanticModel,
{
    let analysis = analyzer.analyze(&request.snapshot);
    let list = candidates_at(&analysis.model, request.offset, request.mode);
    let descriptions = list
        .candidates
        .iter()
        .map(|candidate| describe(&analysis.model, candidate.symbol_id, docs))
        .collect();
    CompletionResponse {
        version: request.snapshot.version,
        list,
        descriptions,
    }
}

/// Owns the shown popup and drops responses for superseded snapshots.
#[derive(Debug, Default)]
pub struct CompletionController {
    tracker: SnapshotTracker,
    popup: Option<OverloadPopup>,
    options: PopupOptions,
}

impl CompletionController {
    /// Create a controller.
    pub fn new(options: PopupOptions) -> Self {
        Self {
            tracker: SnapshotTracker::new(),
            popup: None,
            options,
        }
    }

    /// Issue a request for the current text, superseding all pending ones.
    pub fn request(
        &mut self,
        text: &str,
        offset: usize,
        mode: CompletionMode,
    ) -> CompletionRequest {
        CompletionRequest {
            snapshot: self.tracker.issue(text),
            offset,
            mode,
        }
    }

    /// Apply a response. Stale responses are ignored and leave the popup as is.
    ///
    /// Returns `true` if the popup was replaced (possibly by nothing).
    pub fn deliver(&mut self, response: CompletionResponse, anchor: PopupAnchor) -> bool {
        let Some(response) = self.tracker.accept(response.version, response) else {
            return false;
        };
        self.popup = OverloadPopup::with_descriptions(
            response.list,
            response.descriptions,
            anchor,
            self.options,
        );
        true
    }

    /// The shown popup.
    pub fn popup(&self) -> Option<&OverloadPopup> {
        self.popup.as_ref()
    }

    /// The shown popup, for cycling and re-anchoring.
    pub fn popup_mut(&mut self) -> Option<&mut OverloadPopup> {
        self.popup.as_mut()
    }

    /// Close the popup.
    pub fn close(&mut self) {
        self.popup = None;
    }
}
