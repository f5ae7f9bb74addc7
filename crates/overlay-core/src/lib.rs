#![warn(missing_docs)]
//! Overlay Core - headless annotation engine for code editing surfaces
//!
//! # Overview
//!
//! `overlay-core` keeps derived annotations (diagnostic squiggles, breakpoint markers, search
//! highlights, changed-line bands) consistent with a plain text buffer as it is edited. It does
//! not render anything; hosts read sorted, non-overlapping highlight ranges and minimap bands and
//! paint them however they like.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  OverlayState (layers, versions, notify)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Diagnostic overlay pipeline / Minimap      │  ← Derived views
//! ├─────────────────────────────────────────────┤
//! │  Span merging / Marker search / Line index  │  ← Primitives
//! ├─────────────────────────────────────────────┤
//! │  TextSpan / Edit / span remapping           │  ← Offsets
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use overlay_core::{
//!     Diagnostic, DiagnosticSeverity, LinePosition, LineSpan, OverlayOptions, TextSpan,
//!     build_overlay,
//! };
//!
//! let text = "let a = b;\nlet c = d;\n";
//! let diagnostics = vec![Diagnostic::new(
//!     DiagnosticSeverity::Error,
//!     "E0425",
//!     "cannot find value `b`",
//!     LineSpan::new(LinePosition::new(0, 8), LinePosition::new(0, 9)),
//! )];
//!
//! let pass = build_overlay(text, &diagnostics, OverlayOptions::default());
//! assert_eq!(pass.ranges[0].span, TextSpan::new(8, 1));
//! assert_eq!(pass.counts.errors, 1);
//! ```
//!
//! # Module Description
//!
//! - [`span`] - text spans, edits and span remapping
//! - [`merge`] - adjacency and payload-aggregating span unions
//! - [`search`] - KMP marker search and user-facing search
//! - [`breakpoints`] - breakpoint markers embedded in the text
//! - [`overlay`] - diagnostics to highlight ranges
//! - [`state`] - layered overlay state with change notifications
//! - [`minimap`] / [`changed_lines`] - scrollbar and gutter bands
//! - [`snapshot`] / [`analysis`] - analysis snapshots and the analysis collaborator seam
//!
//! All offsets are Unicode scalar value (`char`) offsets.

pub mod analysis;
pub mod breakpoints;
pub mod changed_lines;
pub mod delta;
pub mod diagnostics;
mod error;
pub mod line_index;
pub mod markers;
pub mod merge;
pub mod minimap;
pub mod overlay;
pub mod search;
pub mod snapshot;
pub mod span;
pub mod state;

pub use analysis::{Analysis, Analyzer};
pub use breakpoints::{BREAKPOINT_MARKER, breakpoint_lines, breakpoint_spans, toggle_breakpoint};
pub use changed_lines::{LineBand, LineChangeKind, LineChanges, changed_line_bands};
pub use delta::{TextDelta, TextDeltaEdit};
pub use diagnostics::{Diagnostic, DiagnosticCounts, DiagnosticSeverity, LinePosition, LineSpan};
pub use error::{SearchError, SpanMappingError};
pub use line_index::LineIndex;
pub use markers::MarkerIndex;
pub use merge::{MergedRange, union_adjacent, union_with_payload};
pub use minimap::{MinimapBand, MinimapKind, MinimapOptions};
pub use overlay::{
    HighlightCategory, HighlightRange, OverlayOptions, OverlayPass, PlacedDiagnostic,
    build_overlay,
};
pub use search::{SearchOptions, all_indices_of, find_all};
pub use snapshot::{SnapshotTracker, SnapshotVersion, TextSnapshot};
pub use span::{Edit, TextSpan, remap_annotated, remap_span};
pub use state::{
    OverlayChange, OverlayChangeCallback, OverlayChangeType, OverlayEdit, OverlayLayer,
    OverlayState,
};
