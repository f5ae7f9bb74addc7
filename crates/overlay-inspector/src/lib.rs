#![warn(missing_docs)]
//! Debugger variable inspector.
//!
//! Builds a browsable tree over a value that is either materialized locally or lives in another
//! process. Large indexed collections are split into decimal chunks (`[0..99]`, `[100..199]`, …)
//! and every level is materialized only when it is first expanded, so collections with millions of
//! entries never produce more than a handful of nodes per expansion.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ VariableTree (arena)         │  expand / collapse / visible_rows
//! ├──────────────────────────────┤
//! │ chunk (decimal partitioning) │
//! ├──────────────────────────────┤
//! │ LocalValue │ RemoteObjects   │  materialized values or lazy getters
//! └──────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```
//! use overlay_inspector::{InspectorOptions, LocalValue, VariableTree};
//!
//! let items = LocalValue::sequence((0..25).map(LocalValue::scalar).collect());
//! let mut tree = VariableTree::local("items", items, InspectorOptions::default());
//!
//! let root = tree.root();
//! let chunks = tree.expand(root).unwrap().to_vec();
//! assert_eq!(tree.node(chunks[0]).unwrap().label(), "[0..9]");
//! assert_eq!(tree.node(chunks[2]).unwrap().label(), "[20..24]");
//! ```

pub mod chunk;
pub mod label;
pub mod remote;
pub mod tree;
pub mod value;

pub use chunk::{Chunking, IndexRange, LEAF_LIMIT, chunk, chunk_step};
pub use label::{ELLIPSIS, truncate_graphemes};
pub use remote::{Detached, RemoteError, RemoteId, RemoteObjects};
pub use tree::{
    DeclaredKind, InspectorError, InspectorOptions, NodeId, NodeKind, NodeValue, VariableNode,
    VariableTree, VisibleRow,
};
pub use value::{LocalMember, LocalValue, MemberDecl, MemberKind, RemoteValue, ValueShape};
