//! Changed-line bands.
//!
//! The diff collaborator reports which lines differ from the saved/base version. The overlay only
//! consumes those line index sets and collapses them into contiguous bands for the gutter and the
//! minimap.

/// How a line differs from the base version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineChangeKind {
    /// Line does not exist in the base version.
    Added,
    /// Line exists in the base version with different content.
    Modified,
}

/// Line index sets produced by the diff collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineChanges {
    /// Added lines (zero-based, any order, duplicates allowed).
    pub added: Vec<usize>,
    /// Modified lines (zero-based, any order, duplicates allowed).
    pub modified: Vec<usize>,
}

/// An inclusive run of consecutive changed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBand {
    /// First line of the run.
    pub first: usize,
    /// Last line of the run (inclusive).
    pub last: usize,
    /// Change kind shared by every line in the run.
    pub kind: LineChangeKind,
}

fn collapse(lines: &[usize], kind: LineChangeKind, out: &mut Vec<LineBand>) {
    let mut lines = lines.to_vec();
    lines.sort_unstable();
    lines.dedup();

    let mut iter = lines.into_iter();
    let Some(first) = iter.next() else {
        return;
    };
    let mut band = LineBand {
        first,
        last: first,
        kind,
    };
    for line in iter {
        if line == band.last + 1 {
            band.last = line;
        } else {
            out.push(band);
            band = LineBand {
                first: line,
                last: line,
                kind,
            };
        }
    }
    out.push(band);
}

/// Collapse changed lines into bands, sorted by first line (added before modified on ties).
pub fn changed_line_bands(changes: &LineChanges) -> Vec<LineBand> {
    let mut out = Vec::new();
    collapse(&changes.added, LineChangeKind::Added, &mut out);
    collapse(&changes.modified, LineChangeKind::Modified, &mut out);
    out.sort_by_key(|band| (band.first, band.kind));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_are_collapsed_per_kind() {
        let changes = LineChanges {
            added: vec![7, 5, 6, 6, 12],
            modified: vec![2, 3, 8],
        };
        let bands = changed_line_bands(&changes);
        assert_eq!(
            bands,
            vec![
                LineBand {
                    first: 2,
                    last: 3,
                    kind: LineChangeKind::Modified,
                },
                LineBand {
                    first: 5,
                    last: 7,
                    kind: LineChangeKind::Added,
                },
                LineBand {
                    first: 8,
                    last: 8,
                    kind: LineChangeKind::Modified,
                },
                LineBand {
                    first: 12,
                    last: 12,
                    kind: LineChangeKind::Added,
                },
            ]
        );
    }

    #[test]
    fn test_no_changes() {
        assert!(changed_line_bands(&LineChanges::default()).is_empty());
    }
}
