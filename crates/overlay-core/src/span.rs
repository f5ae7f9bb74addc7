//! Text spans and span remapping.
//!
//! All offsets are **character offsets** (Unicode scalar values), matching the rest of the crate.
//! A [`TextSpan`] recorded against one version of the text can be carried forward through the
//! edits applied since then with [`remap_span`]. Spans whose interior was touched by an edit are
//! invalidated and the annotation attached to them is expected to be dropped by the caller.

/// A half-open character-offset range, stored as `start` + `length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextSpan {
    /// Inclusive start offset.
    pub start: usize,
    /// Number of characters covered.
    pub length: usize,
}

impl TextSpan {
    /// Create a span from a start offset and a length.
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Create a span from half-open `start..end` offsets.
    ///
    /// Returns `None` if `end < start`.
    pub fn from_bounds(start: usize, end: usize) -> Option<Self> {
        end.checked_sub(start).map(|length| Self { start, length })
    }

    /// Exclusive end offset.
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    /// Returns `true` if the span covers no characters.
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check if the span contains a specific offset.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }

    /// Strict overlap: the two spans share at least one character.
    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// A single text replacement: the characters in `old_span` are replaced by `new_length` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// The replaced region in the pre-edit text.
    pub old_span: TextSpan,
    /// Length of the inserted text.
    pub new_length: usize,
}

impl Edit {
    /// Create an edit replacing `old_span` with `new_length` characters.
    pub const fn new(old_span: TextSpan, new_length: usize) -> Self {
        Self {
            old_span,
            new_length,
        }
    }

    /// Pure insertion of `len` characters at `offset`.
    pub const fn insert(offset: usize, len: usize) -> Self {
        Self::new(TextSpan::new(offset, 0), len)
    }

    /// Pure deletion of `span`.
    pub const fn delete(span: TextSpan) -> Self {
        Self::new(span, 0)
    }

    /// Start offset of the edit.
    pub const fn start(&self) -> usize {
        self.old_span.start
    }

    /// Exclusive end of the replaced region (pre-edit coordinates).
    pub const fn old_end(&self) -> usize {
        self.old_span.end()
    }

    /// Signed length change introduced by this edit.
    pub fn delta(&self) -> isize {
        self.new_length as isize - self.old_span.length as isize
    }
}

fn remap_offset(offset: usize, edit: &Edit) -> Option<usize> {
    if offset <= edit.start() {
        Some(offset)
    } else if offset >= edit.old_end() {
        offset.checked_add_signed(edit.delta())
    } else {
        None
    }
}

/// Map a span through an ordered list of edits applied since the span was recorded.
///
/// Per edit, each endpoint is kept if it lies at or before the edit start, shifted by the edit's
/// length change if it lies at or after the replaced region, and invalidates the span if it
/// falls strictly inside the replaced region. An edit that touches the span's interior (shares
/// a character with it, or inserts strictly inside it) also invalidates the span.
///
/// Returns `None` for an invalidated span.
pub fn remap_span<'a, I>(span: TextSpan, edits: I) -> Option<TextSpan>
where
    I: IntoIterator<Item = &'a Edit>,
{
    let mut start = span.start;
    let mut end = span.end();

    for edit in edits {
        if edit.start() < end && start < edit.old_end() {
            return None;
        }
        start = remap_offset(start, edit)?;
        end = remap_offset(end, edit)?;
        if end < start {
            return None;
        }
    }

    TextSpan::from_bounds(start, end)
}

/// Remap a batch of annotated spans, silently dropping the invalidated ones.
pub fn remap_annotated<T>(items: Vec<(TextSpan, T)>, edits: &[Edit]) -> Vec<(TextSpan, T)> {
    let before = items.len();
    let kept: Vec<(TextSpan, T)> = items
        .into_iter()
        .filter_map(|(span, payload)| remap_span(span, edits).map(|span| (span, payload)))
        .collect();

    if kept.len() != before {
        log::trace!(
            "dropped {} annotation(s) invalidated by {} edit(s)",
            before - kept.len(),
            edits.len()
        );
    }
    kept
}
