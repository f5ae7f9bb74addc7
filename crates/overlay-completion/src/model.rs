//! Semantic model seam.
//!
//! Completion never parses or type-checks. It queries a [`SemanticModel`] produced by the
//! analysis collaborator for one immutable text snapshot. [`SymbolTable`] is a plain in-memory
//! model used by hosts that precompute symbols, and by tests.

use crate::error::AnalysisError;
use crate::symbol::{Binding, Symbol, SymbolId, SymbolKind};
use overlay_core::TextSpan;
use std::collections::HashMap;

/// Where a local variable can be referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalScope {
    /// Offset of the declaration; the local is usable after it.
    pub declared_at: usize,
    /// Enclosing block.
    pub block: TextSpan,
}

impl LocalScope {
    /// Whether a caret at `offset` can reference the local.
    pub fn admits(&self, offset: usize) -> bool {
        self.declared_at <= offset && self.block.start <= offset && offset <= self.block.end()
    }
}

/// Queries completion needs from the analysis of one snapshot.
pub trait SemanticModel {
    /// Look up a symbol.
    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    /// Members of a namespace or type, in declaration order.
    fn members(&self, container: SymbolId) -> &[SymbolId];

    /// The symbol(s) bound at a caret offset.
    fn binding_at(&self, offset: usize) -> Binding;

    /// All locals declared in the snapshot, in declaration order.
    fn locals(&self) -> &[SymbolId];

    /// Scope of a local. Fails when the code around it does not analyze cleanly.
    fn local_scope(&self, local: SymbolId) -> Result<LocalScope, AnalysisError>;
}

/// In-memory [`SemanticModel`].
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    members: HashMap<SymbolId, Vec<SymbolId>>,
    locals: Vec<SymbolId>,
    bindings: Vec<(TextSpan, Binding)>,
    scopes: HashMap<SymbolId, Result<LocalScope, AnalysisError>>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol, assigning its id. Symbols with a container are appended to its members.
    pub fn add(&mut self, mut symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        symbol.id = id;
        if let Some(container) = symbol.container {
            self.members.entry(container).or_default().push(id);
        }
        if symbol.kind == SymbolKind::Local {
            self.locals.push(id);
        }
        self.symbols.push(symbol);
        id
    }

    /// Record what is bound over `span`.
    pub fn bind(&mut self, span: TextSpan, binding: Binding) {
        self.bindings.push((span, binding));
    }

    /// Record the scope analysis outcome for a local.
    pub fn set_local_scope(&mut self, local: SymbolId, scope: Result<LocalScope, AnalysisError>) {
        self.scopes.insert(local, scope);
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the table holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SemanticModel for SymbolTable {
    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    fn members(&self, container: SymbolId) -> &[SymbolId] {
        self.members.get(&container).map(Vec::as_slice).unwrap_or_default()
    }

    // A caret right after an identifier still binds to it.
    fn binding_at(&self, offset: usize) -> Binding {
        self.bindings
            .iter()
            .find(|(span, _)| span.start <= offset && offset <= span.end())
            .map(|(_, binding)| binding.clone())
            .unwrap_or_default()
    }

    fn locals(&self) -> &[SymbolId] {
        &self.locals
    }

    fn local_scope(&self, local: SymbolId) -> Result<LocalScope, AnalysisError> {
        match self.scopes.get(&local) {
            Some(scope) => scope.clone(),
            None if self.symbol(local).is_some() => Err(AnalysisError::ScopeUnavailable {
                symbol: local,
                reason: "no scope recorded".to_string(),
            }),
            None => Err(AnalysisError::UnknownSymbol(local)),
        }
    }
}
