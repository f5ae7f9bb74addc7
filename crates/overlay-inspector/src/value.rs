//! Value snapshots fed into the inspector.
//!
//! Local values are fully materialized up front. Remote values describe only their own display
//! text and *shape*; their children are fetched on demand through
//! [`RemoteObjects`](crate::remote::RemoteObjects).

use crate::remote::RemoteId;
use std::sync::Arc;

/// Whether a named member is a property or a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Property (accessor-backed).
    Property,
    /// Field (storage-backed).
    Field,
}

/// Declaration of a named member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    /// Member name.
    pub name: String,
    /// Property or field.
    pub kind: MemberKind,
    /// Public accessibility.
    pub is_public: bool,
}

impl MemberDecl {
    /// A public property.
    pub fn property(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property,
            is_public: true,
        }
    }

    /// A field with explicit accessibility.
    pub fn field(name: impl Into<String>, is_public: bool) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            is_public,
        }
    }
}

/// A materialized local value.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalValue {
    /// Leaf value, already formatted for display.
    Scalar(String),
    /// Ordered sequence of values.
    Sequence(Arc<[LocalValue]>),
    /// Named properties and fields.
    Mapping(Arc<[LocalMember]>),
}

/// A named member of a local mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMember {
    /// Declaration.
    pub decl: MemberDecl,
    /// Value.
    pub value: LocalValue,
}

impl LocalValue {
    /// A scalar from anything displayable.
    pub fn scalar(value: impl ToString) -> Self {
        Self::Scalar(value.to_string())
    }

    /// A sequence.
    pub fn sequence(items: Vec<LocalValue>) -> Self {
        Self::Sequence(items.into())
    }

    /// A mapping.
    pub fn mapping(members: Vec<(MemberDecl, LocalValue)>) -> Self {
        Self::Mapping(
            members
                .into_iter()
                .map(|(decl, value)| LocalMember { decl, value })
                .collect(),
        )
    }

    /// Display text for the value row.
    pub fn display(&self) -> String {
        match self {
            Self::Scalar(text) => text.clone(),
            Self::Sequence(items) => format!("Count = {}", items.len()),
            Self::Mapping(members) => format!("{{{} members}}", members.len()),
        }
    }
}

/// The expandable shape of a remote value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueShape {
    /// No children.
    Scalar,
    /// An indexed collection of `len` items.
    Sequence {
        /// Item count.
        len: usize,
    },
    /// Named members, fetched one by one.
    Mapping {
        /// Member declarations.
        members: Vec<MemberDecl>,
    },
}

/// An immutable snapshot of a remote value, as returned by the remote collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteValue {
    /// Handle for fetching children; `None` for values without identity (e.g. primitives).
    pub id: Option<RemoteId>,
    /// Runtime type tag.
    pub type_tag: String,
    /// Display text.
    pub display: String,
    /// Expandable shape.
    pub shape: ValueShape,
}

impl RemoteValue {
    /// A primitive remote value.
    pub fn scalar(type_tag: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            id: None,
            type_tag: type_tag.into(),
            display: display.into(),
            shape: ValueShape::Scalar,
        }
    }
}
