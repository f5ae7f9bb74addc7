//! Display text shaping for inspector rows.

use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// Appended to values cut short by [`truncate_graphemes`].
pub const ELLIPSIS: char = '…';

/// Keep the first line of `text`, cut to at most `max` grapheme clusters.
///
/// When anything is dropped the result ends with [`ELLIPSIS`], which counts towards `max`.
/// A `max` of zero yields an empty string.
pub fn truncate_graphemes(text: &str, max: usize) -> Cow<'_, str> {
    let first_line = text.lines().next().unwrap_or("");
    let multi_line = first_line.len() < text.trim_end_matches(['\r', '\n']).len();

    if max == 0 {
        return Cow::Borrowed("");
    }

    let mut graphemes = first_line.grapheme_indices(true);
    let cut = graphemes.nth(max - 1).and_then(|_| graphemes.next());
    match (cut, multi_line) {
        (None, false) => Cow::Borrowed(first_line),
        (None, true) => {
            // Room is needed for the ellipsis, so drop one grapheme if the line is already full.
            let keep = first_line.graphemes(true).count().min(max - 1);
            Cow::Owned(with_ellipsis(first_line, keep))
        }
        (Some(_), _) => Cow::Owned(with_ellipsis(first_line, max - 1)),
    }
}

fn with_ellipsis(line: &str, keep: usize) -> String {
    let mut out: String = line.graphemes(true).take(keep).collect();
    out.push(ELLIPSIS);
    out
}

/// Row label of an indexed item.
pub fn item_label(index: usize) -> String {
    format!("[{index}]")
}

/// Row label of a chunk placeholder.
pub fn range_label(min: usize, max: usize) -> String {
    format!("[{min}..{max}]")
}
