//! Line index.
//!
//! Rope-backed mapping between character offsets and `(line, column)` positions. Lookups that
//! feed highlight placement are fallible: a location outside the buffer is reported rather than
//! clamped, so the caller can keep the annotation without a span.

use crate::error::SpanMappingError;
use ropey::Rope;

/// Logical line index over an immutable text snapshot.
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build a line index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total line count (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Character offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        (line < self.rope.len_lines()).then(|| self.rope.line_to_char(line))
    }

    /// Length of `line` in characters, excluding its terminator.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && is_line_break(slice.char(len - 1)) {
            let last = slice.char(len - 1);
            len -= 1;
            if last == '\n' && len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        Some(len)
    }

    /// Text of `line`, excluding its terminator.
    pub fn line_text(&self, line: usize) -> Option<String> {
        let len = self.line_len(line)?;
        let start = self.rope.line_to_char(line);
        Some(self.rope.slice(start..start + len).to_string())
    }

    /// Get line number and column from a character offset (clamped to the document end).
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_offset);
        (line, char_offset - self.rope.line_to_char(line))
    }

    /// Resolve `(line, column)` to a character offset.
    ///
    /// A column equal to the line length (caret at end of line) is accepted.
    pub fn position_to_char_offset(
        &self,
        line: usize,
        column: usize,
    ) -> Result<usize, SpanMappingError> {
        let line_count = self.line_count();
        let (Some(start), Some(line_len)) = (self.line_start(line), self.line_len(line)) else {
            return Err(SpanMappingError::LineOutOfBounds { line, line_count });
        };
        if column > line_len {
            return Err(SpanMappingError::ColumnOutOfBounds {
                line,
                column,
                line_len,
            });
        }
        Ok(start + column)
    }
}

/// The characters `Rope` treats as line breaks (`\r\n` counts as one).
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}
