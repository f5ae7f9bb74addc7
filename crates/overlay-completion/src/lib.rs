#![warn(missing_docs)]
//! Completion and overload popups.
//!
//! Given what the analysis bound at the caret, this crate builds the ranked candidate list for
//! the parameter-hint popup (invocation arguments) or the generic-argument popup, renders a
//! description for the selected candidate from XML doc comments, and places the popup next to
//! the caret.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ CompletionController (snapshot versions)   │
//! ├────────────────────────────────────────────┤
//! │ OverloadPopup (cycling, placement)         │
//! ├──────────────────────┬─────────────────────┤
//! │ selector (two modes) │ description / docs  │
//! ├──────────────────────┴─────────────────────┤
//! │ SemanticModel (analysis collaborator)      │
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```
//! use overlay_completion::{
//!     Binding, Parameter, Symbol, SymbolKind, SymbolTable, invocation_candidates,
//! };
//!
//! let mut table = SymbolTable::new();
//! let point = table.add(Symbol::new("Point", SymbolKind::Type));
//! let xy = table.add(
//!     Symbol::new(".ctor", SymbolKind::Constructor)
//!         .in_container(point)
//!         .with_parameters(vec![Parameter::new("x", "int"), Parameter::new("y", "int")]),
//! );
//!
//! let list = invocation_candidates(&table, &Binding::Resolved(xy));
//! assert_eq!(list.ids(), vec![xy]);
//! assert!(list.should_show());
//! ```

pub mod controller;
pub mod description;
pub mod docs;
mod error;
pub mod locals;
pub mod model;
pub mod overload;
pub mod popup;
pub mod selector;
pub mod symbol;

pub use controller::{CompletionController, CompletionRequest, CompletionResponse, compute};
pub use description::{Description, ParameterDoc, describe};
pub use docs::{DocComment, ReferenceDocs, documentation_xml};
pub use error::{AnalysisError, DocsError};
pub use locals::visible_locals;
pub use model::{LocalScope, SemanticModel, SymbolTable};
pub use overload::OverloadPopup;
pub use popup::{
    Placement, PopupAnchor, PopupLayout, PopupOptions, PopupSize, measure, place, place_popup,
};
pub use selector::{
    CandidateList, CompletionCandidate, CompletionMode, candidates_at, display_parts,
    generic_candidates, invocation_candidates,
};
pub use symbol::{
    Binding, DisplayPart, Parameter, PartKind, Symbol, SymbolId, SymbolKind, parts_to_string,
};
