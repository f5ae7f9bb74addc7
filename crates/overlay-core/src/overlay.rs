//! Diagnostic overlay pipeline.
//!
//! Turns one analysis pass worth of diagnostics into categorized, merged highlight ranges plus
//! summary counts:
//!
//! 1. `Hidden` diagnostics are dropped.
//! 2. Each location is shifted up by the preamble line count and resolved against the visible
//!    buffer. A location that cannot be resolved keeps its diagnostic (it is still counted and
//!    listed) but produces no highlight.
//! 3. Error and warning spans are merged independently with the payload-aggregating policy
//!    ([`union_with_payload`]).
//!
//! The result is meant to replace the previous overlay wholesale, see
//! [`OverlayState::apply`](crate::state::OverlayState::apply).

use crate::diagnostics::{Diagnostic, DiagnosticCounts, DiagnosticSeverity, LinePosition};
use crate::error::SpanMappingError;
use crate::line_index::LineIndex;
use crate::merge::union_with_payload;
use crate::span::TextSpan;

/// What a highlight range represents; hosts map categories to pens/styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HighlightCategory {
    /// Error squiggle.
    Error,
    /// Warning squiggle.
    Warning,
    /// Search result highlight.
    SearchResult,
    /// Breakpoint marker highlight.
    Breakpoint,
}

/// A highlighted range with the diagnostics folded into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRange {
    /// Covered span (character offsets in the visible buffer).
    pub span: TextSpan,
    /// Range category.
    pub category: HighlightCategory,
    /// Contributing diagnostics in input order (empty for non-diagnostic categories).
    pub payload: Vec<Diagnostic>,
}

impl HighlightRange {
    /// A range without a diagnostic payload.
    pub fn bare(span: TextSpan, category: HighlightCategory) -> Self {
        Self {
            span,
            category,
            payload: Vec::new(),
        }
    }
}

/// Options for [`build_overlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayOptions {
    /// Number of leading lines present in the analyzed document but hidden from the buffer.
    pub preamble_lines: usize,
}

/// A diagnostic together with its resolved span, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedDiagnostic {
    /// The diagnostic.
    pub diagnostic: Diagnostic,
    /// Resolved span in the visible buffer.
    pub span: Result<TextSpan, SpanMappingError>,
}

/// The output of one overlay pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayPass {
    /// Error and warning ranges sorted by start; ranges of one category never overlap.
    pub ranges: Vec<HighlightRange>,
    /// Every non-hidden diagnostic, in input order.
    pub placed: Vec<PlacedDiagnostic>,
    /// Summary counts (placed or not).
    pub counts: DiagnosticCounts,
}

impl OverlayPass {
    /// Ranges of a single category.
    pub fn ranges_of(&self, category: HighlightCategory) -> impl Iterator<Item = &HighlightRange> {
        self.ranges.iter().filter(move |r| r.category == category)
    }
}

fn resolve_position(
    index: &LineIndex,
    pos: LinePosition,
    preamble: usize,
) -> Result<usize, SpanMappingError> {
    let line = pos
        .line
        .checked_sub(preamble)
        .ok_or(SpanMappingError::InsidePreamble {
            line: pos.line,
            preamble,
        })?;
    index.position_to_char_offset(line, pos.character)
}

/// Resolve a diagnostic location to a span in the visible buffer.
pub fn resolve_location(
    index: &LineIndex,
    diagnostic: &Diagnostic,
    preamble: usize,
) -> Result<TextSpan, SpanMappingError> {
    let start = resolve_position(index, diagnostic.location.start, preamble)?;
    let end = resolve_position(index, diagnostic.location.end, preamble)?;
    TextSpan::from_bounds(start, end).ok_or(SpanMappingError::Inverted)
}

/// Run the overlay pipeline over `text` and `diagnostics`.
pub fn build_overlay(
    text: &str,
    diagnostics: &[Diagnostic],
    options: OverlayOptions,
) -> OverlayPass {
    let index = LineIndex::from_text(text);

    let mut counts = DiagnosticCounts::default();
    let mut placed = Vec::with_capacity(diagnostics.len());
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diagnostic in diagnostics {
        if diagnostic.severity == DiagnosticSeverity::Hidden {
            continue;
        }
        counts.record(diagnostic.severity);

        let span = resolve_location(&index, diagnostic, options.preamble_lines);
        match (&span, diagnostic.severity) {
            (Ok(span), DiagnosticSeverity::Error) => errors.push((*span, diagnostic.clone())),
            (Ok(span), DiagnosticSeverity::Warning) => warnings.push((*span, diagnostic.clone())),
            (Err(err), _) => {
                log::debug!("diagnostic {} has no highlight: {err}", diagnostic.id);
            }
            _ => {}
        }
        placed.push(PlacedDiagnostic {
            diagnostic: diagnostic.clone(),
            span,
        });
    }

    let mut ranges = Vec::with_capacity(errors.len() + warnings.len());
    for (category, group) in [
        (HighlightCategory::Error, errors),
        (HighlightCategory::Warning, warnings),
    ] {
        ranges.extend(
            union_with_payload(group)
                .into_iter()
                .map(|merged| HighlightRange {
                    span: merged.span,
                    category,
                    payload: merged.payload,
                }),
        );
    }
    ranges.sort_by_key(|r| (r.span.start, r.category));

    OverlayPass {
        ranges,
        placed,
        counts,
    }
}
