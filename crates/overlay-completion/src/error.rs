use crate::symbol::SymbolId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported by the semantic model.
pub enum AnalysisError {
    #[error("scope of {symbol:?} could not be determined: {reason}")]
    /// Scope analysis failed, usually on malformed or ambiguous code.
    ScopeUnavailable {
        /// The local whose scope was requested.
        symbol: SymbolId,
        /// Collaborator-provided reason.
        reason: String,
    },

    #[error("symbol {0:?} is not part of this model")]
    /// The id was not issued by this model.
    UnknownSymbol(SymbolId),
}

#[derive(Debug, Error)]
/// Failures loading a reference documentation dictionary.
pub enum DocsError {
    #[error("malformed documentation dictionary: {0}")]
    /// The JSON did not decode into an id to XML map.
    Json(#[from] serde_json::Error),
}
