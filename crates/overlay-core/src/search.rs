//! Text search helpers.
//!
//! Two families of search, both reporting **character offsets**:
//!
//! - [`all_indices_of`]: exact substring search (Knuth–Morris–Pratt) with optional ordinal case
//!   folding. Used to relocate literal markers embedded in the buffer.
//! - [`find_all`]: user-facing search (plain, regex, whole word) whose matches feed the search
//!   highlight layer.

use crate::error::SearchError;
use crate::span::TextSpan;
use regex::{Regex, RegexBuilder};

/// Options that control how [`find_all`] is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, matches only whole words (alphanumeric and `_`).
    pub whole_word: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            regex: false,
        }
    }
}

fn fold_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => ch,
    }
}

fn prepare(text: &str, ignore_case: bool) -> Vec<char> {
    if ignore_case {
        text.chars().map(fold_char).collect()
    } else {
        text.chars().collect()
    }
}

/// KMP failure function: `fail[i]` is the length of the longest proper prefix of
/// `pattern[..=i]` that is also a suffix of it.
fn failure_table(pattern: &[char]) -> Vec<usize> {
    let mut fail = vec![0usize; pattern.len()];
    let mut k = 0usize;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = fail[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        fail[i] = k;
    }
    fail
}

/// Find every non-overlapping occurrence of `pattern` in `text`.
///
/// Returns ascending start offsets (in characters). After a match the automaton continues from
/// its failure state; occurrences starting inside the previous match are skipped, which yields
/// the leftmost non-overlapping set.
///
/// # Panics
///
/// Panics if `pattern` is empty.
pub fn all_indices_of(text: &str, pattern: &str, ignore_case: bool) -> Vec<usize> {
    assert!(!pattern.is_empty(), "search pattern must not be empty");

    let needle = prepare(pattern, ignore_case);
    let hay = prepare(text, ignore_case);
    let fail = failure_table(&needle);

    let mut out = Vec::new();
    let mut next_allowed = 0usize;
    let mut k = 0usize;
    for (i, ch) in hay.iter().enumerate() {
        while k > 0 && *ch != needle[k] {
            k = fail[k - 1];
        }
        if *ch == needle[k] {
            k += 1;
        }
        if k == needle.len() {
            let start = i + 1 - needle.len();
            if start >= next_allowed {
                out.push(start);
                next_allowed = i + 1;
            }
            k = fail[k - 1];
        }
    }
    out
}

fn compile_search_regex(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    Ok(RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .multi_line(true)
        .build()?)
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// Find all occurrences of `query` in `text` as character-offset spans.
///
/// - Returns an empty list if `query` is empty.
/// - Empty regex matches are skipped.
pub fn find_all(
    text: &str,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<TextSpan>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let re = compile_search_regex(query, options)?;

    // Byte offset -> char offset, with a trailing sentinel for the end of text.
    let mut byte_to_char: Vec<usize> = vec![0; text.len() + 1];
    let mut char_count = 0usize;
    for (byte, ch) in text.char_indices() {
        for slot in &mut byte_to_char[byte..byte + ch.len_utf8()] {
            *slot = char_count;
        }
        char_count += 1;
    }
    byte_to_char[text.len()] = char_count;

    let mut matches = Vec::new();
    for m in re.find_iter(text) {
        if m.start() == m.end() {
            continue;
        }
        if options.whole_word {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            if before.is_some_and(is_word_char) || after.is_some_and(is_word_char) {
                continue;
            }
        }
        let start = byte_to_char[m.start()];
        matches.push(TextSpan::new(start, byte_to_char[m.end()] - start));
    }

    Ok(matches)
}
