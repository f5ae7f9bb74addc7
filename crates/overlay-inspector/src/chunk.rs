//! Decimal chunking of index ranges.
//!
//! A range of `count` entries is either materialized as leaves (`count <= 10`) or split into
//! consecutive sub-ranges of `10^floor(log10(count - 1))` entries each. Sub-ranges are chunked
//! again only when they are expanded, so a node never has more than a handful of children and the
//! tree depth grows with `log10(count)`.

/// Largest range materialized directly as leaves.
pub const LEAF_LIMIT: usize = 10;

/// An inclusive index range `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    /// First index.
    pub min: usize,
    /// Last index (inclusive).
    pub max: usize,
}

impl IndexRange {
    /// Create a range; `min` must not exceed `max`.
    pub fn new(min: usize, max: usize) -> Self {
        debug_assert!(min <= max, "inverted index range {min}..={max}");
        Self { min, max }
    }

    /// The range covering a collection of `len` items, or `None` if empty.
    pub fn of_len(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|max| Self { min: 0, max })
    }

    /// Number of indices covered.
    pub fn count(&self) -> usize {
        self.max - self.min + 1
    }
}

/// How to materialize the children of a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunking {
    /// One leaf per index.
    Leaves(IndexRange),
    /// One placeholder range node per sub-range.
    Ranges(Vec<IndexRange>),
}

/// Chunk size used for a range of `count` entries (`count > LEAF_LIMIT`).
pub fn chunk_step(count: usize) -> usize {
    10usize.pow((count - 1).ilog10())
}

/// Decide how to materialize the children of `range`.
pub fn chunk(range: IndexRange) -> Chunking {
    let count = range.count();
    if count <= LEAF_LIMIT {
        return Chunking::Leaves(range);
    }

    let step = chunk_step(count);
    let mut subs = Vec::with_capacity(count.div_ceil(step));
    let mut min = range.min;
    loop {
        let max = min.saturating_add(step - 1).min(range.max);
        subs.push(IndexRange::new(min, max));
        if max == range.max {
            break;
        }
        min = max + 1;
    }
    Chunking::Ranges(subs)
}
