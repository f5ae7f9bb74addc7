//! Breakpoint markers embedded in the buffer text.
//!
//! A breakpoint is the literal [`BREAKPOINT_MARKER`] written into the source at the start of a
//! line's code. Positions are never stored out of band: they are recovered by searching the text,
//! so they follow every edit for as long as the literal survives.

use crate::delta::TextDeltaEdit;
use crate::line_index::LineIndex;
use crate::search::all_indices_of;
use crate::span::TextSpan;

/// Literal marker text denoting a breakpoint.
pub const BREAKPOINT_MARKER: &str = "/* Breakpoint */";

fn marker_len() -> usize {
    BREAKPOINT_MARKER.chars().count()
}

/// Spans of every marker in `text` (case-insensitive), ascending.
pub fn breakpoint_spans(text: &str) -> Vec<TextSpan> {
    let len = marker_len();
    all_indices_of(text, BREAKPOINT_MARKER, true)
        .into_iter()
        .map(|start| TextSpan::new(start, len))
        .collect()
}

/// Zero-based lines carrying at least one marker, ascending and deduplicated.
pub fn breakpoint_lines(text: &str) -> Vec<usize> {
    let index = LineIndex::from_text(text);
    let mut lines: Vec<usize> = breakpoint_spans(text)
        .into_iter()
        .map(|span| index.char_offset_to_position(span.start).0)
        .collect();
    lines.dedup();
    lines
}

/// Build the edit that toggles a breakpoint on `line`.
///
/// If the line carries a marker, the first one (and one trailing space) is removed. Otherwise the
/// marker is inserted before the line's first non-whitespace character. Returns `None` when the
/// line does not exist.
pub fn toggle_breakpoint(text: &str, line: usize) -> Option<TextDeltaEdit> {
    let index = LineIndex::from_text(text);
    let line_start = index.line_start(line)?;
    let line_text = index.line_text(line)?;

    if let Some(&column) = all_indices_of(&line_text, BREAKPOINT_MARKER, true).first() {
        let mut deleted: String = line_text
            .chars()
            .skip(column)
            .take(marker_len())
            .collect();
        if line_text.chars().nth(column + marker_len()) == Some(' ') {
            deleted.push(' ');
        }
        return Some(TextDeltaEdit {
            start: line_start + column,
            deleted_text: deleted,
            inserted_text: String::new(),
        });
    }

    let indent = line_text.chars().take_while(|c| c.is_whitespace()).count();
    Some(TextDeltaEdit {
        start: line_start + indent,
        deleted_text: String::new(),
        inserted_text: format!("{BREAKPOINT_MARKER} "),
    })
}
