//! Local variables offered at the caret.

use crate::model::SemanticModel;
use crate::symbol::SymbolId;

/// Locals that can be referenced at `offset`, in declaration order.
///
/// A local whose scope cannot be analyzed is left out.
pub fn visible_locals(model: &impl SemanticModel, offset: usize) -> Vec<SymbolId> {
    model
        .locals()
        .iter()
        .copied()
        .filter(|local| match model.local_scope(*local) {
            Ok(scope) => scope.admits(offset),
            Err(err) => {
                log::debug!("treating {local:?} as inaccessible: {err}");
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::model::{LocalScope, SymbolTable};
    use crate::symbol::{Symbol, SymbolKind};
    use overlay_core::TextSpan;

    #[test]
    fn test_scope_and_declaration_order_decide_visibility() {
        let mut table = SymbolTable::new();
        let early = table.add(Symbol::new("count", SymbolKind::Local));
        let late = table.add(Symbol::new("total", SymbolKind::Local));
        let nested = table.add(Symbol::new("item", SymbolKind::Local));
        table.set_local_scope(
            early,
            Ok(LocalScope {
                declared_at: 10,
                block: TextSpan::new(0, 100),
            }),
        );
        table.set_local_scope(
            late,
            Ok(LocalScope {
                declared_at: 60,
                block: TextSpan::new(0, 100),
            }),
        );
        table.set_local_scope(
            nested,
            Ok(LocalScope {
                declared_at: 20,
                block: TextSpan::new(20, 10),
            }),
        );

        assert_eq!(visible_locals(&table, 50), vec![early]);
        assert_eq!(visible_locals(&table, 25), vec![early, nested]);
        assert_eq!(visible_locals(&table, 70), vec![early, late]);
    }

    #[test]
    fn test_failed_scope_analysis_is_inaccessible() {
        let mut table = SymbolTable::new();
        let broken = table.add(Symbol::new("x", SymbolKind::Local));
        let fine = table.add(Symbol::new("y", SymbolKind::Local));
        table.set_local_scope(
            broken,
            Err(AnalysisError::ScopeUnavailable {
                symbol: broken,
                reason: "unbalanced braces".into(),
            }),
        );
        table.set_local_scope(
            fine,
            Ok(LocalScope {
                declared_at: 0,
                block: TextSpan::new(0, 10),
            }),
        );
        assert_eq!(visible_locals(&table, 5), vec![fine]);
    }
}
