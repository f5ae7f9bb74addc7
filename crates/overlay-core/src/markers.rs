//! Marker index.
//!
//! A read-only, start-sorted view over a set of [`HighlightRange`]s with a prefix-maximum-end
//! array for early pruning. Used for hover lookups ("which diagnostics are under the mouse?")
//! and viewport slicing.
//!
//! Query complexity: O(log n + k) for typical inputs, where k is the number of hits.

use crate::overlay::HighlightRange;

/// Start-sorted marker index.
#[derive(Debug, Clone, Default)]
pub struct MarkerIndex {
    ranges: Vec<HighlightRange>,
    /// `prefix_max_end[i] = max(ranges[0..=i].span.end())`
    prefix_max_end: Vec<usize>,
}

impl MarkerIndex {
    /// Build an index over `ranges`.
    pub fn new(mut ranges: Vec<HighlightRange>) -> Self {
        ranges.sort_by_key(|r| (r.span.start, r.category));
        let mut max_end = 0usize;
        let prefix_max_end = ranges
            .iter()
            .map(|r| {
                max_end = max_end.max(r.span.end());
                max_end
            })
            .collect();
        Self {
            ranges,
            prefix_max_end,
        }
    }

    /// All ranges, sorted by start.
    pub fn ranges(&self) -> &[HighlightRange] {
        &self.ranges
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if the index holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Consume the index, returning its ranges.
    pub fn into_ranges(self) -> Vec<HighlightRange> {
        self.ranges
    }

    /// Ranges containing `offset`.
    pub fn query_point(&self, offset: usize) -> Vec<&HighlightRange> {
        // First index whose start is > offset.
        let upper = self.ranges.partition_point(|r| r.span.start <= offset);

        let mut hits = Vec::new();
        for i in (0..upper).rev() {
            if self.prefix_max_end[i] <= offset {
                break;
            }
            if self.ranges[i].span.contains(offset) {
                hits.push(&self.ranges[i]);
            }
        }
        hits.reverse();
        hits
    }

    /// Ranges overlapping the half-open range `start..end`.
    pub fn query_range(&self, start: usize, end: usize) -> Vec<&HighlightRange> {
        if start >= end {
            return Vec::new();
        }
        let upper = self.ranges.partition_point(|r| r.span.start < end);
        let mut lower = self.ranges[..upper].partition_point(|r| r.span.start < start);
        while lower > 0 && self.prefix_max_end[lower - 1] > start {
            lower -= 1;
        }

        self.ranges[lower..upper]
            .iter()
            .filter(|r| r.span.start < end && r.span.end() > start)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::HighlightCategory;
    use crate::span::TextSpan;

    fn index() -> MarkerIndex {
        MarkerIndex::new(vec![
            HighlightRange::bare(TextSpan::new(20, 5), HighlightCategory::Warning),
            HighlightRange::bare(TextSpan::new(0, 30), HighlightCategory::Error),
            HighlightRange::bare(TextSpan::new(40, 2), HighlightCategory::Error),
        ])
    }

    #[test]
    fn test_query_point_sees_long_earlier_range() {
        let index = index();
        let hits: Vec<TextSpan> = index.query_point(22).iter().map(|r| r.span).collect();
        assert_eq!(hits, vec![TextSpan::new(0, 30), TextSpan::new(20, 5)]);
        assert!(index.query_point(35).is_empty());
        assert!(index.query_point(42).is_empty());
    }

    #[test]
    fn test_query_range() {
        let index = index();
        let hits: Vec<TextSpan> = index.query_range(26, 41).iter().map(|r| r.span).collect();
        assert_eq!(hits, vec![TextSpan::new(0, 30), TextSpan::new(40, 2)]);
        assert!(index.query_range(5, 5).is_empty());
    }
}
