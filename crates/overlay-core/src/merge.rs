//! Span merging.
//!
//! Two merge policies share one sort + linear sweep:
//!
//! - [`union_adjacent`]: span-only union used for minimap rendering of breakpoints and search
//!   results. Spans merge when they intersect, touch, or are separated by a single character
//!   (`a.end + 1 == b.start`).
//! - [`union_with_payload`]: payload-aggregating union used for diagnostics. Spans merge only
//!   when they strictly overlap, and each output range carries every contributing payload in
//!   input order.
//!
//! The two policies are intentionally kept separate: collapsing them would move highlight
//! boundaries.
//!
//! Output ranges are sorted by start and pairwise non-overlapping.

use crate::span::TextSpan;

/// A merged range carrying the payloads of every input span folded into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRange<T> {
    /// Covering span.
    pub span: TextSpan,
    /// Contributing payloads, in input order.
    pub payload: Vec<T>,
}

/// Merge spans that intersect or are adjacent (gap of at most one character).
///
/// Bounds come from span arithmetic, so `(0,5)` and `(4,3)` join as `(0,7)`. A single
/// character of gap between two spans is still joined.
///
/// Complexity: O(n log n).
pub fn union_adjacent(spans: &[TextSpan]) -> Vec<TextSpan> {
    let mut sorted: Vec<TextSpan> = spans.to_vec();
    sorted.sort_by_key(|s| s.start);

    let mut out: Vec<TextSpan> = Vec::with_capacity(sorted.len());
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return out;
    };

    let (mut cur_start, mut cur_end) = (first.start, first.end());
    for span in iter {
        if span.start <= cur_end.saturating_add(1) {
            cur_end = cur_end.max(span.end());
        } else {
            out.push(TextSpan::new(cur_start, cur_end - cur_start));
            cur_start = span.start;
            cur_end = span.end();
        }
    }
    out.push(TextSpan::new(cur_start, cur_end - cur_start));
    out
}

/// Merge strictly overlapping spans, accumulating their payloads.
///
/// Touching spans (`a.end == b.start`) stay separate. Within one output range the payload list
/// preserves the order in which the spans were supplied.
pub fn union_with_payload<T>(items: Vec<(TextSpan, T)>) -> Vec<MergedRange<T>> {
    let mut indexed: Vec<(usize, TextSpan, T)> = items
        .into_iter()
        .enumerate()
        .map(|(idx, (span, payload))| (idx, span, payload))
        .collect();
    // Longest first on equal starts, so empty spans fold into a span sharing their start.
    indexed.sort_by_key(|(_, span, _)| (span.start, std::cmp::Reverse(span.end())));

    let mut out: Vec<MergedRange<T>> = Vec::new();
    let mut group: Vec<(usize, T)> = Vec::new();
    let mut cur_start = 0usize;
    let mut cur_end = 0usize;

    for (idx, span, payload) in indexed {
        if !group.is_empty() && span.start < cur_end {
            cur_end = cur_end.max(span.end());
            group.push((idx, payload));
            continue;
        }

        if !group.is_empty() {
            out.push(close_group(cur_start, cur_end, std::mem::take(&mut group)));
        }
        cur_start = span.start;
        cur_end = span.end();
        group.push((idx, payload));
    }

    if !group.is_empty() {
        out.push(close_group(cur_start, cur_end, group));
    }
    out
}

fn close_group<T>(start: usize, end: usize, mut group: Vec<(usize, T)>) -> MergedRange<T> {
    group.sort_by_key(|(idx, _)| *idx);
    MergedRange {
        span: TextSpan::new(start, end - start),
        payload: group.into_iter().map(|(_, payload)| payload).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::Rng;

    /// Quadratic reference: repeatedly fold any pair satisfying `joins` until a fixpoint.
    fn naive_union(
        spans: &[TextSpan],
        joins: impl Fn(&TextSpan, &TextSpan) -> bool,
    ) -> Vec<TextSpan> {
        let mut ranges: Vec<TextSpan> = spans.to_vec();
        loop {
            let mut merged_any = false;
            'outer: for i in 0..ranges.len() {
                for j in 0..ranges.len() {
                    if i == j {
                        continue;
                    }
                    let (a, b) = (ranges[i], ranges[j]);
                    if a.start <= b.start && joins(&a, &b) {
                        let end = a.end().max(b.end());
                        ranges[i] = TextSpan::new(a.start, end - a.start);
                        ranges.remove(j);
                        merged_any = true;
                        break 'outer;
                    }
                }
            }
            if !merged_any {
                break;
            }
        }
        ranges.sort_by_key(|s| s.start);
        ranges
    }

    fn random_spans(rng: &mut impl Rng, n: usize) -> Vec<TextSpan> {
        (0..n)
            .map(|_| TextSpan::new(rng.gen_range(0..200), rng.gen_range(0..12)))
            .collect()
    }

    #[test]
    fn test_adjacent_merges_overlap_and_keeps_gap() {
        let spans = [TextSpan::new(0, 5), TextSpan::new(4, 3), TextSpan::new(10, 2)];
        assert_eq!(
            union_adjacent(&spans),
            vec![TextSpan::new(0, 7), TextSpan::new(10, 2)]
        );
    }

    #[test]
    fn test_adjacent_merges_touching_span() {
        let spans = [
            TextSpan::new(0, 5),
            TextSpan::new(4, 3),
            TextSpan::new(10, 2),
            TextSpan::new(9, 1),
        ];
        assert_eq!(
            union_adjacent(&spans),
            vec![TextSpan::new(0, 7), TextSpan::new(9, 3)]
        );
    }

    #[test]
    fn test_adjacent_merges_single_char_gap() {
        let spans = [TextSpan::new(0, 3), TextSpan::new(4, 2)];
        assert_eq!(union_adjacent(&spans), vec![TextSpan::new(0, 6)]);

        let spans = [TextSpan::new(0, 3), TextSpan::new(5, 2)];
        assert_eq!(
            union_adjacent(&spans),
            vec![TextSpan::new(0, 3), TextSpan::new(5, 2)]
        );
    }

    #[test]
    fn test_payload_merge_keeps_input_order() {
        let merged = union_with_payload(vec![
            (TextSpan::new(3, 4), "second"),
            (TextSpan::new(0, 5), "first"),
        ]);
        assert_eq!(
            merged,
            vec![MergedRange {
                span: TextSpan::new(0, 7),
                payload: vec!["second", "first"],
            }]
        );
    }

    #[test]
    fn test_payload_merge_does_not_join_touching() {
        let merged = union_with_payload(vec![(TextSpan::new(0, 5), 1), (TextSpan::new(5, 2), 2)]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].span, TextSpan::new(0, 5));
        assert_eq!(merged[1].span, TextSpan::new(5, 2));
    }

    #[test]
    fn test_payload_merge_chains_through_long_span() {
        let merged = union_with_payload(vec![
            (TextSpan::new(0, 20), 'a'),
            (TextSpan::new(2, 2), 'b'),
            (TextSpan::new(15, 10), 'c'),
            (TextSpan::new(30, 1), 'd'),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].span, TextSpan::new(0, 25));
        assert_eq!(merged[0].payload, vec!['a', 'b', 'c']);
        assert_eq!(merged[1].payload, vec!['d']);
    }

    #[test]
    fn test_empty_input() {
        assert!(union_adjacent(&[]).is_empty());
        assert!(union_with_payload::<()>(Vec::new()).is_empty());
    }

    #[test]
    fn test_sweep_matches_naive_scan() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let n = rng.gen_range(0..30);
            let spans = random_spans(&mut rng, n);

            let adjacent = naive_union(&spans, |a, b| b.start <= a.end() + 1);
            assert_eq!(union_adjacent(&spans), adjacent);

            let strict = naive_union(&spans, |a, b| b.start < a.end());
            let swept: Vec<TextSpan> = union_with_payload(spans.iter().map(|s| (*s, ())).collect())
                .into_iter()
                .map(|r| r.span)
                .collect();
            assert_eq!(swept, strict);
        }
    }
}
