//! Structured text change deltas.
//!
//! Hosts usually observe edits as "replace this text with that text". This module keeps that
//! shape in **character offsets** and lowers it into the [`Edit`] list consumed by
//! [`remap_span`](crate::span::remap_span).

use crate::span::{Edit, TextSpan};

/// A single text edit expressed in character offsets.
///
/// Semantics:
/// - `start` is a character offset in the document **at the time this edit is applied**.
/// - The deleted range is defined by the length (in `char`s) of `deleted_text`.
/// - Edits inside a [`TextDelta`] are applied **in order**.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Lower this edit into an offset-only [`Edit`].
    pub fn to_edit(&self) -> Edit {
        Edit::new(
            TextSpan::new(self.start, self.deleted_len()),
            self.inserted_len(),
        )
    }
}

/// An ordered batch of edits that transforms one text version into the next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDelta {
    /// Ordered list of edits.
    pub edits: Vec<TextDeltaEdit>,
}

impl TextDelta {
    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Lower every edit, preserving order.
    pub fn to_edits(&self) -> Vec<Edit> {
        self.edits.iter().map(TextDeltaEdit::to_edit).collect()
    }

    /// Apply the delta to `text`, producing the post-edit string.
    ///
    /// Offsets beyond the end of the text are clamped.
    pub fn apply(&self, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        for edit in &self.edits {
            let start = edit.start.min(chars.len());
            let end = (start + edit.deleted_len()).min(chars.len());
            chars.splice(start..end, edit.inserted_text.chars());
        }
        chars.into_iter().collect()
    }
}
