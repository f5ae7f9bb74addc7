//! Scrollbar minimap projection.
//!
//! Highlight ranges are projected onto a fixed number of scrollbar rows. Before projection the
//! spans of each category are unioned with the adjacency policy ([`union_adjacent`]), so dense
//! clusters of breakpoints or search hits become one band.

use crate::changed_lines::{LineBand, LineChangeKind};
use crate::line_index::LineIndex;
use crate::merge::union_adjacent;
use crate::overlay::{HighlightCategory, HighlightRange};
use crate::span::TextSpan;

/// What a minimap band represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MinimapKind {
    /// A highlight category.
    Highlight(HighlightCategory),
    /// A changed-line band.
    Changed(LineChangeKind),
}

/// An inclusive run of minimap rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimapBand {
    /// First row.
    pub first_row: usize,
    /// Last row (inclusive).
    pub last_row: usize,
    /// Band kind.
    pub kind: MinimapKind,
}

/// Minimap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimapOptions {
    /// Number of rows the scrollbar track is divided into.
    pub rows: usize,
}

impl Default for MinimapOptions {
    fn default() -> Self {
        Self { rows: 100 }
    }
}

fn line_to_row(line: usize, line_count: usize, rows: usize) -> usize {
    if line_count == 0 {
        return 0;
    }
    (line.saturating_mul(rows) / line_count).min(rows.saturating_sub(1))
}

fn push_band(out: &mut Vec<MinimapBand>, band: MinimapBand) {
    if let Some(last) = out.last_mut()
        && last.kind == band.kind
        && band.first_row <= last.last_row + 1
    {
        last.last_row = last.last_row.max(band.last_row);
        return;
    }
    out.push(band);
}

/// Project highlight ranges and changed-line bands onto `options.rows` rows.
///
/// Bands are grouped by kind (ordered as [`MinimapKind`] orders) and sorted by row within a kind.
pub fn project(
    index: &LineIndex,
    ranges: &[HighlightRange],
    changed: &[LineBand],
    options: MinimapOptions,
) -> Vec<MinimapBand> {
    if options.rows == 0 {
        return Vec::new();
    }
    let line_count = index.line_count();
    let mut out = Vec::new();

    let mut categories: Vec<HighlightCategory> = ranges.iter().map(|r| r.category).collect();
    categories.sort();
    categories.dedup();

    for category in categories {
        let spans: Vec<TextSpan> = ranges
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.span)
            .collect();
        for span in union_adjacent(&spans) {
            let first_line = index.char_offset_to_position(span.start).0;
            let last_line = index
                .char_offset_to_position(span.end().saturating_sub(1).max(span.start))
                .0;
            push_band(
                &mut out,
                MinimapBand {
                    first_row: line_to_row(first_line, line_count, options.rows),
                    last_row: line_to_row(last_line, line_count, options.rows),
                    kind: MinimapKind::Highlight(category),
                },
            );
        }
    }

    for kind in [LineChangeKind::Added, LineChangeKind::Modified] {
        for band in changed.iter().filter(|b| b.kind == kind) {
            push_band(
                &mut out,
                MinimapBand {
                    first_row: line_to_row(band.first, line_count, options.rows),
                    last_row: line_to_row(band.last, line_count, options.rows),
                    kind: MinimapKind::Changed(kind),
                },
            );
        }
    }

    out
}
