use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure to resolve a line/character location to a character offset in the visible buffer.
pub enum SpanMappingError {
    #[error("line {line} lies inside the {preamble}-line preamble")]
    /// The location points into the hidden preamble.
    InsidePreamble {
        /// Reported (unadjusted) line.
        line: usize,
        /// Number of hidden preamble lines.
        preamble: usize,
    },

    #[error("line {line} is past the end of the buffer ({line_count} lines)")]
    /// The line does not exist in the visible buffer.
    LineOutOfBounds {
        /// Visible-buffer line.
        line: usize,
        /// Visible-buffer line count.
        line_count: usize,
    },

    #[error("column {column} is past the end of line {line} ({line_len} chars)")]
    /// The column lies beyond the end of its line.
    ColumnOutOfBounds {
        /// Visible-buffer line.
        line: usize,
        /// Requested column.
        column: usize,
        /// Line length in characters, excluding the line terminator.
        line_len: usize,
    },

    #[error("location end precedes its start")]
    /// The resolved end offset precedes the start offset.
    Inverted,
}

#[derive(Debug, Error)]
/// Search errors.
pub enum SearchError {
    #[error("invalid regex: {0}")]
    /// The provided regex pattern failed to compile.
    InvalidRegex(#[from] regex::Error),
}
