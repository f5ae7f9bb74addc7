//! Overlay state management.
//!
//! [`OverlayState`] owns the derived annotations for one buffer:
//!
//! - **Layers**: diagnostics, search results, breakpoints. Each layer is replaced wholesale
//!   ([`OverlayEdit::ReplaceLayer`]); there is no incremental patching.
//! - **Text tracking**: between analysis passes, text edits remap every held range through
//!   [`remap_span`], dropping ranges whose interior was touched. Breakpoints are re-derived from
//!   the text instead, since the marker literal is their only storage.
//! - **Derived views**: changed-line bands and minimap bands are recomputed whenever their inputs
//!   change.
//! - **Version tracking** and **change notifications**, as in a state manager.
//!
//! # Example
//!
//! ```rust
//! use overlay_core::{OverlayState, OverlayOptions, build_overlay};
//!
//! let mut state = OverlayState::new("let x = y;\n");
//! let pass = build_overlay(state.text(), &[], OverlayOptions::default());
//! state.apply_overlay_pass(pass);
//! assert_eq!(state.counts().total(), 0);
//! ```

use crate::breakpoints::breakpoint_spans;
use crate::changed_lines::{LineBand, LineChanges, changed_line_bands};
use crate::delta::TextDelta;
use crate::diagnostics::DiagnosticCounts;
use crate::error::SearchError;
use crate::line_index::LineIndex;
use crate::markers::MarkerIndex;
use crate::minimap::{MinimapBand, MinimapOptions, project};
use crate::overlay::{HighlightCategory, HighlightRange, OverlayPass};
use crate::search::{SearchOptions, find_all};
use crate::span::remap_span;
use std::collections::BTreeMap;

/// Identifies one replaceable set of highlight ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OverlayLayer {
    /// Error and warning squiggles.
    Diagnostics,
    /// Search result highlights.
    SearchResults,
    /// Breakpoint marker highlights.
    Breakpoints,
}

/// A change to overlay state.
#[derive(Debug, Clone)]
pub enum OverlayEdit {
    /// Replace an entire layer with the given ranges.
    ReplaceLayer {
        /// The layer being replaced.
        layer: OverlayLayer,
        /// The complete set of ranges for the layer.
        ranges: Vec<HighlightRange>,
    },
    /// Clear a layer.
    ClearLayer {
        /// The layer being cleared.
        layer: OverlayLayer,
    },
    /// Replace the changed-line sets supplied by the diff collaborator.
    ReplaceLineChanges {
        /// New line sets.
        changes: LineChanges,
    },
}

/// Kind of change observed by subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayChangeType {
    /// A highlight layer was replaced or cleared.
    LayerChanged(OverlayLayer),
    /// Changed-line bands were replaced.
    LineChangesChanged,
    /// The buffer text changed and held ranges were remapped.
    TextEdited,
}

/// Change record delivered to subscribers.
#[derive(Debug, Clone)]
pub struct OverlayChange {
    /// Change type.
    pub change_type: OverlayChangeType,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
}

/// Subscriber callback type.
pub type OverlayChangeCallback = Box<dyn FnMut(&OverlayChange) + Send>;

/// Derived annotation state for one buffer.
pub struct OverlayState {
    text: String,
    line_index: LineIndex,
    layers: BTreeMap<OverlayLayer, MarkerIndex>,
    counts: DiagnosticCounts,
    line_changes: LineChanges,
    changed_bands: Vec<LineBand>,
    minimap: Vec<MinimapBand>,
    minimap_options: MinimapOptions,
    version: u64,
    callbacks: Vec<OverlayChangeCallback>,
}

impl OverlayState {
    /// Create overlay state for `text`. Breakpoint markers already present are picked up.
    pub fn new(text: &str) -> Self {
        let mut state = Self {
            text: text.to_string(),
            line_index: LineIndex::from_text(text),
            layers: BTreeMap::new(),
            counts: DiagnosticCounts::default(),
            line_changes: LineChanges::default(),
            changed_bands: Vec::new(),
            minimap: Vec::new(),
            minimap_options: MinimapOptions::default(),
            version: 0,
            callbacks: Vec::new(),
        };
        state.rescan_breakpoints();
        state.recompute_minimap();
        state
    }

    /// Current buffer text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line index over the current text.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Current state version (incremented after each change).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if state has changed since a version.
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.version > version
    }

    /// Subscribe to state changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&OverlayChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Ranges of one layer, sorted by start.
    pub fn layer(&self, layer: OverlayLayer) -> &[HighlightRange] {
        self.layers.get(&layer).map(MarkerIndex::ranges).unwrap_or(&[])
    }

    /// Every range of every layer, sorted by start.
    pub fn all_ranges(&self) -> Vec<&HighlightRange> {
        let mut all: Vec<&HighlightRange> = self.layers.values().flat_map(|l| l.ranges()).collect();
        all.sort_by_key(|r| (r.span.start, r.category));
        all
    }

    /// Ranges (across layers) containing `offset`.
    pub fn markers_at(&self, offset: usize) -> Vec<&HighlightRange> {
        self.layers
            .values()
            .flat_map(|l| l.query_point(offset))
            .collect()
    }

    /// Ranges (across layers) overlapping `start..end`.
    pub fn markers_in(&self, start: usize, end: usize) -> Vec<&HighlightRange> {
        self.layers
            .values()
            .flat_map(|l| l.query_range(start, end))
            .collect()
    }

    /// Diagnostic counts from the last applied overlay pass.
    pub fn counts(&self) -> DiagnosticCounts {
        self.counts
    }

    /// Changed-line bands.
    pub fn changed_line_bands(&self) -> &[LineBand] {
        &self.changed_bands
    }

    /// Line sets last supplied by the diff collaborator.
    pub fn line_changes(&self) -> &LineChanges {
        &self.line_changes
    }

    /// Minimap bands.
    pub fn minimap(&self) -> &[MinimapBand] {
        &self.minimap
    }

    /// Change the minimap row count.
    pub fn set_minimap_options(&mut self, options: MinimapOptions) {
        self.minimap_options = options;
        self.recompute_minimap();
    }

    /// Replace the diagnostics layer and counts with the result of an overlay pass.
    pub fn apply_overlay_pass(&mut self, pass: OverlayPass) {
        self.counts = pass.counts;
        self.apply([OverlayEdit::ReplaceLayer {
            layer: OverlayLayer::Diagnostics,
            ranges: pass.ranges,
        }]);
    }

    /// Apply overlay edits in order.
    pub fn apply<I>(&mut self, edits: I)
    where
        I: IntoIterator<Item = OverlayEdit>,
    {
        for edit in edits {
            match edit {
                OverlayEdit::ReplaceLayer { layer, ranges } => {
                    self.layers.insert(layer, MarkerIndex::new(ranges));
                    self.mark_changed(OverlayChangeType::LayerChanged(layer));
                }
                OverlayEdit::ClearLayer { layer } => {
                    self.layers.remove(&layer);
                    if layer == OverlayLayer::Diagnostics {
                        self.counts = DiagnosticCounts::default();
                    }
                    self.mark_changed(OverlayChangeType::LayerChanged(layer));
                }
                OverlayEdit::ReplaceLineChanges { changes } => {
                    self.changed_bands = changed_line_bands(&changes);
                    self.line_changes = changes;
                    self.mark_changed(OverlayChangeType::LineChangesChanged);
                }
            }
        }
    }

    /// Run a search over the current text and replace the search layer with its matches.
    ///
    /// Returns the number of matches.
    pub fn refresh_search(
        &mut self,
        query: &str,
        options: SearchOptions,
    ) -> Result<usize, SearchError> {
        let ranges: Vec<HighlightRange> = find_all(&self.text, query, options)?
            .into_iter()
            .map(|span| HighlightRange::bare(span, HighlightCategory::SearchResult))
            .collect();
        let count = ranges.len();
        self.apply([OverlayEdit::ReplaceLayer {
            layer: OverlayLayer::SearchResults,
            ranges,
        }]);
        Ok(count)
    }

    /// Apply a text delta: update the text, remap held ranges, re-derive breakpoints.
    pub fn apply_text_delta(&mut self, delta: &TextDelta) {
        if delta.is_empty() {
            return;
        }
        let edits = delta.to_edits();
        self.text = delta.apply(&self.text);
        self.line_index = LineIndex::from_text(&self.text);

        for (layer, index) in std::mem::take(&mut self.layers) {
            if layer == OverlayLayer::Breakpoints {
                continue;
            }
            let before = index.len();
            let remapped: Vec<HighlightRange> = index
                .into_ranges()
                .into_iter()
                .filter_map(|mut range| {
                    range.span = remap_span(range.span, &edits)?;
                    Some(range)
                })
                .collect();
            if remapped.len() != before {
                log::trace!(
                    "{layer:?}: dropped {} range(s) invalidated by edit",
                    before - remapped.len()
                );
            }
            self.layers.insert(layer, MarkerIndex::new(remapped));
        }
        self.rescan_breakpoints();
        self.mark_changed(OverlayChangeType::TextEdited);
    }

    fn rescan_breakpoints(&mut self) {
        let ranges: Vec<HighlightRange> = breakpoint_spans(&self.text)
            .into_iter()
            .map(|span| HighlightRange::bare(span, HighlightCategory::Breakpoint))
            .collect();
        if ranges.is_empty() {
            self.layers.remove(&OverlayLayer::Breakpoints);
        } else {
            self.layers
                .insert(OverlayLayer::Breakpoints, MarkerIndex::new(ranges));
        }
    }

    fn recompute_minimap(&mut self) {
        let ranges: Vec<HighlightRange> = self
            .layers
            .values()
            .flat_map(|l| l.ranges().iter().cloned())
            .collect();
        self.minimap = project(
            &self.line_index,
            &ranges,
            &self.changed_bands,
            self.minimap_options,
        );
    }

    fn mark_changed(&mut self, change_type: OverlayChangeType) {
        self.recompute_minimap();

        let old_version = self.version;
        self.version += 1;
        let change = OverlayChange {
            change_type,
            old_version,
            new_version: self.version,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}
