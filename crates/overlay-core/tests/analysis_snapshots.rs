use overlay_core::{
    Analysis, Analyzer, Diagnostic, DiagnosticSeverity, LinePosition, LineSpan, OverlayOptions,
    OverlayState, SnapshotTracker, TextSnapshot, all_indices_of, build_overlay,
};

/// Flags every `TODO` as a warning.
struct TodoAnalyzer;

impl Analyzer for TodoAnalyzer {
    type Model = usize;

    fn analyze(&self, snapshot: &TextSnapshot) -> Analysis<usize> {
        let mut diagnostics = Vec::new();
        for (line_no, line) in snapshot.text.lines().enumerate() {
            for col in all_indices_of(line, "TODO", false) {
                diagnostics.push(Diagnostic::new(
                    DiagnosticSeverity::Warning,
                    "TODO",
                    "unfinished work",
                    LineSpan::new(
                        LinePosition::new(line_no, col),
                        LinePosition::new(line_no, col + 4),
                    ),
                ));
            }
        }
        Analysis {
            version: snapshot.version,
            model: diagnostics.len(),
            diagnostics,
        }
    }
}

#[test]
fn test_stale_analysis_is_discarded() {
    let mut tracker = SnapshotTracker::new();
    let mut state = OverlayState::new("TODO one\n");

    let old_snapshot = tracker.issue(state.text());
    let old = TodoAnalyzer.analyze(&old_snapshot);

    // The user keeps typing before the first analysis lands.
    let newer_snapshot = tracker.issue("TODO one TODO two\n");
    let newer = TodoAnalyzer.analyze(&newer_snapshot);

    assert!(tracker.accept(old.version, old).is_none());

    let accepted = tracker.accept(newer.version, newer).unwrap();
    assert_eq!(accepted.model, 2);
    let mut fresh = OverlayState::new(&newer_snapshot.text);
    fresh.apply_overlay_pass(build_overlay(
        fresh.text(),
        &accepted.diagnostics,
        OverlayOptions::default(),
    ));
    assert_eq!(fresh.counts().warnings, 2);
    assert_eq!(state.counts().warnings, 0);

    state.apply_overlay_pass(build_overlay(
        state.text(),
        &TodoAnalyzer.analyze(&tracker.issue(state.text())).diagnostics,
        OverlayOptions::default(),
    ));
    assert_eq!(state.counts().warnings, 1);
}
