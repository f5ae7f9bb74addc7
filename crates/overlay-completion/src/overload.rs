//! Overload popup state.

use crate::description::{Description, describe};
use crate::docs::ReferenceDocs;
use crate::model::SemanticModel;
use crate::popup::{Placement, PopupAnchor, PopupLayout, PopupOptions, PopupSize, place_popup};
use crate::selector::{CandidateList, CompletionCandidate};

/// A shown candidate list with one selected entry.
///
/// Descriptions are computed against the snapshot the list came from, so cycling never needs
/// the semantic model again. Every selection change re-renders the description and re-runs
/// placement, since a longer description may no longer fit where the previous one did.
#[derive(Debug, Clone)]
pub struct OverloadPopup {
    list: CandidateList,
    descriptions: Vec<Description>,
    selected: usize,
    anchor: PopupAnchor,
    options: PopupOptions,
    layout: PopupLayout,
}

impl OverloadPopup {
    /// Open a popup for `list`, or `None` if the list should not be shown.
    pub fn open(
        model: &impl SemanticModel,
        docs: &ReferenceDocs,
        list: CandidateList,
        anchor: PopupAnchor,
        options: PopupOptions,
    ) -> Option<Self> {
        let descriptions = list
            .candidates
            .iter()
            .map(|candidate| describe(model, candidate.symbol_id, docs))
            .collect();
        Self::with_descriptions(list, descriptions, anchor, options)
    }

    /// Open a popup from precomputed descriptions, one per candidate.
    pub fn with_descriptions(
        list: CandidateList,
        descriptions: Vec<Description>,
        anchor: PopupAnchor,
        options: PopupOptions,
    ) -> Option<Self> {
        if !list.should_show() || descriptions.len() != list.candidates.len() {
            return None;
        }
        let mut popup = Self {
            list,
            descriptions,
            selected: 0,
            anchor,
            options,
            layout: PopupLayout {
                placement: Placement::Hidden,
                size: PopupSize::default(),
                with_parameters: false,
            },
        };
        popup.relayout();
        Some(popup)
    }

    /// The candidate list.
    pub fn list(&self) -> &CandidateList {
        &self.list
    }

    /// Index of the selected candidate.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected candidate.
    pub fn selected(&self) -> Option<&CompletionCandidate> {
        self.list.candidates.get(self.selected)
    }

    /// Description of the selected candidate.
    pub fn description(&self) -> Option<&Description> {
        self.descriptions.get(self.selected)
    }

    /// Current placement.
    pub fn layout(&self) -> PopupLayout {
        self.layout
    }

    /// Select the next candidate, wrapping around.
    pub fn next(&mut self) {
        let len = self.list.candidates.len();
        if len > 1 {
            self.selected = (self.selected + 1) % len;
            self.relayout();
        }
    }

    /// Select the previous candidate, wrapping around.
    pub fn prev(&mut self) {
        let len = self.list.candidates.len();
        if len > 1 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
            self.relayout();
        }
    }

    /// Move the popup for a new caret position or viewport.
    pub fn set_anchor(&mut self, anchor: PopupAnchor) {
        if self.anchor != anchor {
            self.anchor = anchor;
            self.relayout();
        }
    }

    /// Lines to draw: an `(i/n)` header when there is a choice, then the description body.
    pub fn lines(&self) -> Vec<String> {
        self.render(self.layout.with_parameters)
    }

    fn render(&self, with_parameters: bool) -> Vec<String> {
        let Some(description) = self.description() else {
            return Vec::new();
        };
        let mut lines = description.lines(with_parameters);
        let len = self.list.candidates.len();
        if len > 1
            && let Some(first) = lines.first_mut()
        {
            *first = format!("({}/{}) {first}", self.selected + 1, len);
        }
        lines
    }

    fn relayout(&mut self) {
        let full = self.render(true);
        let compact = self.render(false);
        self.layout = place_popup(&full, &compact, self.anchor, self.options);
    }
}
