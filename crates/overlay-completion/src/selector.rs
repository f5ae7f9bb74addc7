//! Candidate selection for the overload and generic-argument popups.
//!
//! Both modes start from what the analysis bound at the caret. The resulting list is ranked by
//! origin (bound symbols first) and then by declaration order, with each symbol appearing once.

use crate::model::SemanticModel;
use crate::symbol::{Binding, DisplayPart, PartKind, Symbol, SymbolId, SymbolKind};
use std::collections::HashSet;

/// Which popup the list feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionMode {
    /// Inside an argument list: overloads of the invoked method or constructors of the type.
    InvocationArgument,
    /// Inside a generic argument list: generic siblings of the named method or type.
    GenericTypeArgument,
}

/// One entry of a candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Symbol identity; unique within a list.
    pub symbol_id: SymbolId,
    /// Rendered signature.
    pub display_parts: Vec<DisplayPart>,
    /// Generic arity.
    pub arity: usize,
    /// Containing namespace or type.
    pub containing_scope: Option<SymbolId>,
}

impl CompletionCandidate {
    /// Build a candidate for `symbol`.
    pub fn from_symbol(model: &impl SemanticModel, symbol: &Symbol) -> Self {
        Self {
            symbol_id: symbol.id,
            display_parts: display_parts(model, symbol),
            arity: symbol.arity(),
            containing_scope: symbol.container,
        }
    }
}

/// A ranked candidate list for one caret position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    /// Mode the list was built for.
    pub mode: CompletionMode,
    /// Candidates in display order.
    pub candidates: Vec<CompletionCandidate>,
}

impl CandidateList {
    /// Whether the popup should be shown for this list.
    ///
    /// Invocation popups need one candidate; generic popups are only useful when there is a
    /// choice.
    pub fn should_show(&self) -> bool {
        match self.mode {
            CompletionMode::InvocationArgument => !self.candidates.is_empty(),
            CompletionMode::GenericTypeArgument => self.candidates.len() > 1,
        }
    }

    /// Candidate identities in order.
    pub fn ids(&self) -> Vec<SymbolId> {
        self.candidates.iter().map(|c| c.symbol_id).collect()
    }
}

/// Build the candidate list for the binding at `offset`.
pub fn candidates_at(
    model: &impl SemanticModel,
    offset: usize,
    mode: CompletionMode,
) -> CandidateList {
    let binding = model.binding_at(offset);
    match mode {
        CompletionMode::InvocationArgument => invocation_candidates(model, &binding),
        CompletionMode::GenericTypeArgument => generic_candidates(model, &binding),
    }
}

/// Invocation-argument candidates.
///
/// The bound symbols come first. They are followed by same-name sibling methods of each bound
/// method, and by the constructors of each bound type. A bound constructor pulls in its sibling
/// constructors.
pub fn invocation_candidates(model: &impl SemanticModel, binding: &Binding) -> CandidateList {
    let mut ids = UniqueIds::default();
    let originals: Vec<&Symbol> = binding
        .symbols()
        .iter()
        .filter_map(|id| model.symbol(*id))
        .collect();

    for symbol in &originals {
        ids.push(symbol.id);
    }
    for symbol in &originals {
        match symbol.kind {
            SymbolKind::Method => {
                if let Some(container) = symbol.container {
                    ids.extend(siblings(model, container, |s| {
                        s.kind == SymbolKind::Method && s.name == symbol.name
                    }));
                }
            }
            SymbolKind::Constructor => {
                if let Some(container) = symbol.container {
                    ids.extend(siblings(model, container, |s| {
                        s.kind == SymbolKind::Constructor
                    }));
                }
            }
            SymbolKind::Type => {
                ids.extend(siblings(model, symbol.id, |s| {
                    s.kind == SymbolKind::Constructor
                }));
            }
            _ => {}
        }
    }

    log::trace!("invocation candidates: {} from {} bound", ids.len(), originals.len());
    CandidateList {
        mode: CompletionMode::InvocationArgument,
        candidates: ids.into_candidates(model),
    }
}

/// Generic-type-argument candidates.
///
/// For a bound method: same-name generic methods of its containing type. For a bound type:
/// same-name generic types of its containing scope, which is the namespace when the type is
/// declared in one and the outer type otherwise. Non-generic symbols never appear.
pub fn generic_candidates(model: &impl SemanticModel, binding: &Binding) -> CandidateList {
    let mut ids = UniqueIds::default();

    for symbol in binding.symbols().iter().filter_map(|id| model.symbol(*id)) {
        let Some(container) = symbol.container else {
            continue;
        };
        let wanted = match symbol.kind {
            SymbolKind::Method => SymbolKind::Method,
            SymbolKind::Type => {
                let scope = model.symbol(container).map(|c| c.kind);
                if !matches!(scope, Some(SymbolKind::Namespace | SymbolKind::Type)) {
                    continue;
                }
                SymbolKind::Type
            }
            _ => continue,
        };
        ids.extend(siblings(model, container, |s| {
            s.kind == wanted && s.name == symbol.name && s.arity() > 0
        }));
    }

    CandidateList {
        mode: CompletionMode::GenericTypeArgument,
        candidates: ids.into_candidates(model),
    }
}

fn siblings<'m, M: SemanticModel>(
    model: &'m M,
    container: SymbolId,
    keep: impl Fn(&Symbol) -> bool + 'm,
) -> impl Iterator<Item = SymbolId> + 'm {
    model
        .members(container)
        .iter()
        .filter_map(move |id| model.symbol(*id))
        .filter(move |s| keep(*s))
        .map(|s| s.id)
}

/// Insertion-ordered set of symbol ids.
#[derive(Default)]
struct UniqueIds {
    seen: HashSet<SymbolId>,
    order: Vec<SymbolId>,
}

impl UniqueIds {
    fn push(&mut self, id: SymbolId) {
        if self.seen.insert(id) {
            self.order.push(id);
        }
    }

    fn extend(&mut self, ids: impl IntoIterator<Item = SymbolId>) {
        for id in ids {
            self.push(id);
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn into_candidates(self, model: &impl SemanticModel) -> Vec<CompletionCandidate> {
        self.order
            .into_iter()
            .filter_map(|id| model.symbol(id))
            .map(|symbol| CompletionCandidate::from_symbol(model, symbol))
            .collect()
    }
}

/// Render a symbol's signature as classified parts.
///
/// Methods render as `Container.Name<T>(Type name, ...)`, constructors as `Container(...)`,
/// types as `Name<T>`.
pub fn display_parts(model: &impl SemanticModel, symbol: &Symbol) -> Vec<DisplayPart> {
    let mut parts = Vec::new();
    let container = symbol.container.and_then(|id| model.symbol(id));

    match symbol.kind {
        SymbolKind::Constructor => {
            let name = container.map_or(symbol.name.as_str(), |c| c.name.as_str());
            parts.push(DisplayPart::new(PartKind::TypeName, name));
        }
        SymbolKind::Method => {
            if let Some(container) = container {
                parts.push(DisplayPart::new(PartKind::TypeName, container.name.clone()));
                parts.push(DisplayPart::new(PartKind::Punctuation, "."));
            }
            parts.push(DisplayPart::new(PartKind::MethodName, symbol.name.clone()));
        }
        _ => parts.push(DisplayPart::new(PartKind::TypeName, symbol.name.clone())),
    }

    if !symbol.type_parameters.is_empty() {
        parts.push(DisplayPart::new(PartKind::Punctuation, "<"));
        for (i, name) in symbol.type_parameters.iter().enumerate() {
            if i > 0 {
                parts.push(DisplayPart::new(PartKind::Punctuation, ", "));
            }
            parts.push(DisplayPart::new(PartKind::TypeParameter, name.clone()));
        }
        parts.push(DisplayPart::new(PartKind::Punctuation, ">"));
    }

    if symbol.is_invocable() {
        parts.push(DisplayPart::new(PartKind::Punctuation, "("));
        for (i, param) in symbol.parameters.iter().enumerate() {
            if i > 0 {
                parts.push(DisplayPart::new(PartKind::Punctuation, ", "));
            }
            parts.push(DisplayPart::new(PartKind::TypeName, param.type_name.clone()));
            parts.push(DisplayPart::new(PartKind::Punctuation, " "));
            parts.push(DisplayPart::new(PartKind::ParameterName, param.name.clone()));
        }
        parts.push(DisplayPart::new(PartKind::Punctuation, ")"));
    }

    parts
}
