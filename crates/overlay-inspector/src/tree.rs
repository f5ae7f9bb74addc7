//! Arena-backed variable tree with lazy, chunked expansion.

use crate::chunk::{Chunking, IndexRange, chunk};
use crate::label::{item_label, range_label, truncate_graphemes};
use crate::remote::{Detached, RemoteError, RemoteId, RemoteObjects};
use crate::value::{LocalMember, LocalValue, MemberDecl, MemberKind, RemoteValue, ValueShape};
use std::sync::Arc;
use thiserror::Error;

/// Stable handle of a node inside one [`VariableTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors from tree operations.
pub enum InspectorError {
    #[error("node {0:?} does not belong to this tree")]
    /// The id was not issued by this tree.
    UnknownNode(NodeId),
}

/// How the node's value was declared by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredKind {
    /// Indexed collection item (or the root).
    Item,
    /// Named property.
    Property,
    /// Named field.
    Field,
}

impl From<MemberKind> for DeclaredKind {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Property => Self::Property,
            MemberKind::Field => Self::Field,
        }
    }
}

/// Presentation variant of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A value row. Expandable when the value has children and the depth limit allows it.
    Leaf,
    /// Placeholder covering `min_index..=max_index` of its owner's items.
    Range {
        /// First index.
        min_index: usize,
        /// Last index (inclusive).
        max_index: usize,
    },
}

/// What a value row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    /// Display text, already truncated.
    Text(String),
    /// The remote getter failed; passed through unchanged.
    Failed(RemoteError),
}

impl NodeValue {
    /// Display text of the value row.
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Failed(err) => format!("<{err}>"),
        }
    }
}

#[derive(Debug, Clone)]
enum ChildSource {
    LocalItems(Arc<[LocalValue]>),
    LocalMembers(Arc<[LocalMember]>),
    RemoteItems { owner: RemoteId, len: usize },
    RemoteMembers { owner: RemoteId, members: Arc<[MemberDecl]> },
}

/// One row of the inspector.
#[derive(Debug, Clone)]
pub struct VariableNode {
    id: NodeId,
    parent: Option<NodeId>,
    label: String,
    declared_kind: DeclaredKind,
    is_public: bool,
    type_tag: Option<String>,
    value: NodeValue,
    kind: NodeKind,
    depth: usize,
    expanded: bool,
    children: Option<Vec<NodeId>>,
    source: Option<ChildSource>,
}

impl VariableNode {
    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Owning node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Row label: a member name, `[index]`, or `[min..max]`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Declared kind.
    pub fn declared_kind(&self) -> DeclaredKind {
        self.declared_kind
    }

    /// Whether the member is public. Items and ranges are always public.
    pub fn is_public(&self) -> bool {
        self.is_public
    }

    /// Runtime type tag, known for remote values only.
    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }

    /// Value shown on the row.
    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    /// Leaf or range placeholder.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Object nesting depth; range placeholders share the depth of their owner.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the node is currently expanded.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether expanding the node can produce children.
    pub fn is_expandable(&self) -> bool {
        self.source.is_some()
    }

    /// Materialized children, `None` until the first expansion.
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }
}

/// Tree construction knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectorOptions {
    /// Values nested deeper than this are shown as leaves.
    pub max_depth: usize,
    /// Value text is cut to this many grapheme clusters.
    pub max_value_graphemes: usize,
}

impl Default for InspectorOptions {
    fn default() -> Self {
        Self {
            max_depth: 16,
            max_value_graphemes: 256,
        }
    }
}

/// A row produced by [`VariableTree::visible_rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    /// Node shown on the row.
    pub id: NodeId,
    /// Indentation level, the root is 0.
    pub indent: usize,
}

type VisibilityQuery = Box<dyn Fn() -> bool + Send + Sync>;

/// A browsable variable tree.
///
/// Nodes live in an arena and are only ever appended. Children are materialized on the first
/// expansion of a node and reused afterwards, so every remote getter runs at most once for the
/// children of a given node. The "show non-public members" toggle is a query owned by the host;
/// flipping it changes [`VariableTree::is_visible`] without touching any node.
pub struct VariableTree<R = Detached> {
    nodes: Vec<VariableNode>,
    remote: R,
    options: InspectorOptions,
    show_non_public: VisibilityQuery,
}

impl<R> std::fmt::Debug for VariableTree<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableTree")
            .field("nodes", &self.nodes.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl VariableTree<Detached> {
    /// Tree over an already materialized value.
    pub fn local(label: impl Into<String>, value: LocalValue, options: InspectorOptions) -> Self {
        let mut tree = Self::empty(Detached, options);
        tree.push_local(None, label.into(), DeclaredKind::Item, true, &value, 0);
        tree
    }
}

impl<R: RemoteObjects> VariableTree<R> {
    /// Tree over a remote value whose children are fetched through `remote`.
    pub fn remote(
        label: impl Into<String>,
        value: RemoteValue,
        remote: R,
        options: InspectorOptions,
    ) -> Self {
        let mut tree = Self::empty(remote, options);
        tree.push_remote(None, label.into(), DeclaredKind::Item, true, Ok(value), 0);
        tree
    }

    fn empty(remote: R, options: InspectorOptions) -> Self {
        Self {
            nodes: Vec::new(),
            remote,
            options,
            show_non_public: Box::new(|| false),
        }
    }

    /// Install the host's "show non-public members" query.
    pub fn with_visibility(mut self, query: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.show_non_public = Box::new(query);
        self
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of materialized nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&VariableNode> {
        self.nodes.get(id.0)
    }

    /// The remote collaborator.
    pub fn remote_objects(&self) -> &R {
        &self.remote
    }

    /// Options the tree was built with.
    pub fn options(&self) -> InspectorOptions {
        self.options
    }

    /// Expand a node, materializing its children on first use.
    ///
    /// Expanding a node that cannot have children is a no-op returning no children.
    pub fn expand(&mut self, id: NodeId) -> Result<&[NodeId], InspectorError> {
        self.check(id)?;
        if self.nodes[id.0].children.is_none() {
            let children = self.materialize(id);
            self.nodes[id.0].children = Some(children);
        }
        let node = &mut self.nodes[id.0];
        node.expanded = node.source.is_some();
        Ok(node.children.as_deref().unwrap_or_default())
    }

    /// Collapse a node. Its children stay materialized.
    pub fn collapse(&mut self, id: NodeId) -> Result<(), InspectorError> {
        self.check(id)?;
        self.nodes[id.0].expanded = false;
        Ok(())
    }

    /// Expand a collapsed node or collapse an expanded one.
    pub fn toggle(&mut self, id: NodeId) -> Result<(), InspectorError> {
        self.check(id)?;
        if self.nodes[id.0].expanded {
            self.collapse(id)
        } else {
            self.expand(id).map(|_| ())
        }
    }

    /// Whether a node is shown under the current visibility toggle.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node(id)
            .is_some_and(|node| node.is_public || (self.show_non_public)())
    }

    /// Materialized children that are currently visible.
    pub fn visible_children(&self, id: NodeId) -> Option<Vec<NodeId>> {
        let children = self.node(id)?.children.as_ref()?;
        Some(
            children
                .iter()
                .copied()
                .filter(|child| self.is_visible(*child))
                .collect(),
        )
    }

    /// Rows to render: the root plus the visible children of every expanded node, depth first.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        let mut stack = vec![VisibleRow {
            id: self.root(),
            indent: 0,
        }];
        while let Some(row) = stack.pop() {
            rows.push(row);
            let node = &self.nodes[row.id.0];
            if !node.expanded {
                continue;
            }
            if let Some(children) = self.visible_children(row.id) {
                stack.extend(children.into_iter().rev().map(|id| VisibleRow {
                    id,
                    indent: row.indent + 1,
                }));
            }
        }
        rows
    }

    fn check(&self, id: NodeId) -> Result<(), InspectorError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(InspectorError::UnknownNode(id))
        }
    }

    fn materialize(&mut self, id: NodeId) -> Vec<NodeId> {
        let node = &self.nodes[id.0];
        let Some(source) = node.source.clone() else {
            return Vec::new();
        };
        let depth = node.depth;
        let range = match node.kind {
            NodeKind::Range {
                min_index,
                max_index,
            } => Some(IndexRange::new(min_index, max_index)),
            NodeKind::Leaf => match &source {
                ChildSource::LocalItems(items) => IndexRange::of_len(items.len()),
                ChildSource::RemoteItems { len, .. } => IndexRange::of_len(*len),
                ChildSource::LocalMembers(_) | ChildSource::RemoteMembers { .. } => None,
            },
        };

        match (source, range) {
            (ChildSource::LocalMembers(members), _) => {
                let mut sorted: Vec<&LocalMember> = members.iter().collect();
                sorted.sort_by(|a, b| a.decl.name.cmp(&b.decl.name));
                sorted
                    .into_iter()
                    .map(|member| {
                        self.push_local(
                            Some(id),
                            member.decl.name.clone(),
                            member.decl.kind.into(),
                            member.decl.is_public,
                            &member.value,
                            depth + 1,
                        )
                    })
                    .collect()
            }
            (ChildSource::RemoteMembers { owner, members }, _) => {
                let mut sorted: Vec<&MemberDecl> = members.iter().collect();
                sorted.sort_by(|a, b| a.name.cmp(&b.name));
                log::debug!("fetching {} members of {owner:?}", sorted.len());
                sorted
                    .into_iter()
                    .map(|decl| {
                        let fetched = self.remote.property_or_field(
                            owner,
                            &decl.name,
                            decl.kind == MemberKind::Property,
                        );
                        self.push_remote(
                            Some(id),
                            decl.name.clone(),
                            decl.kind.into(),
                            decl.is_public,
                            fetched,
                            depth + 1,
                        )
                    })
                    .collect()
            }
            (_, None) => Vec::new(),
            (source, Some(range)) => match chunk(range) {
                Chunking::Ranges(subs) => subs
                    .into_iter()
                    .map(|sub| self.push_range(id, sub, source.clone(), depth))
                    .collect(),
                Chunking::Leaves(leaves) => self.push_items(id, leaves, &source, depth + 1),
            },
        }
    }

    fn push_items(
        &mut self,
        parent: NodeId,
        range: IndexRange,
        source: &ChildSource,
        depth: usize,
    ) -> Vec<NodeId> {
        match source {
            ChildSource::LocalItems(items) => (range.min..=range.max)
                .filter_map(|index| {
                    let value = items.get(index)?;
                    Some(self.push_local(
                        Some(parent),
                        item_label(index),
                        DeclaredKind::Item,
                        true,
                        value,
                        depth,
                    ))
                })
                .collect(),
            ChildSource::RemoteItems { owner, .. } => {
                log::debug!("fetching items {}..={} of {owner:?}", range.min, range.max);
                let fetched: Vec<Result<RemoteValue, RemoteError>> =
                    match self.remote.items(*owner, range) {
                        Ok(values) => {
                            if values.len() != range.count() {
                                log::warn!(
                                    "{owner:?} returned {} items for a range of {}",
                                    values.len(),
                                    range.count()
                                );
                            }
                            values.into_iter().map(Ok).collect()
                        }
                        Err(err) => vec![Err(err); range.count()],
                    };
                (range.min..=range.max)
                    .zip(fetched)
                    .map(|(index, value)| {
                        self.push_remote(
                            Some(parent),
                            item_label(index),
                            DeclaredKind::Item,
                            true,
                            value,
                            depth,
                        )
                    })
                    .collect()
            }
            ChildSource::LocalMembers(_) | ChildSource::RemoteMembers { .. } => Vec::new(),
        }
    }

    fn push_range(
        &mut self,
        parent: NodeId,
        range: IndexRange,
        source: ChildSource,
        depth: usize,
    ) -> NodeId {
        self.push(VariableNode {
            id: NodeId(0),
            parent: Some(parent),
            label: range_label(range.min, range.max),
            declared_kind: DeclaredKind::Item,
            is_public: true,
            type_tag: None,
            value: NodeValue::Text(String::new()),
            kind: NodeKind::Range {
                min_index: range.min,
                max_index: range.max,
            },
            depth,
            expanded: false,
            children: None,
            source: Some(source),
        })
    }

    fn push_local(
        &mut self,
        parent: Option<NodeId>,
        label: String,
        declared_kind: DeclaredKind,
        is_public: bool,
        value: &LocalValue,
        depth: usize,
    ) -> NodeId {
        let source = match value {
            LocalValue::Scalar(_) => None,
            LocalValue::Sequence(items) => Some(ChildSource::LocalItems(items.clone())),
            LocalValue::Mapping(members) => Some(ChildSource::LocalMembers(members.clone())),
        };
        let text = value.display();
        self.push_value(
            parent,
            label,
            declared_kind,
            is_public,
            None,
            NodeValue::Text(text),
            source,
            depth,
        )
    }

    fn push_remote(
        &mut self,
        parent: Option<NodeId>,
        label: String,
        declared_kind: DeclaredKind,
        is_public: bool,
        value: Result<RemoteValue, RemoteError>,
        depth: usize,
    ) -> NodeId {
        match value {
            Ok(value) => {
                let source = match (value.id, value.shape) {
                    (Some(owner), ValueShape::Sequence { len }) => {
                        Some(ChildSource::RemoteItems { owner, len })
                    }
                    (Some(owner), ValueShape::Mapping { members }) => {
                        Some(ChildSource::RemoteMembers {
                            owner,
                            members: members.into(),
                        })
                    }
                    _ => None,
                };
                self.push_value(
                    parent,
                    label,
                    declared_kind,
                    is_public,
                    Some(value.type_tag),
                    NodeValue::Text(value.display),
                    source,
                    depth,
                )
            }
            Err(err) => {
                log::debug!("remote value for {label} failed: {err}");
                self.push_value(
                    parent,
                    label,
                    declared_kind,
                    is_public,
                    None,
                    NodeValue::Failed(err),
                    None,
                    depth,
                )
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_value(
        &mut self,
        parent: Option<NodeId>,
        label: String,
        declared_kind: DeclaredKind,
        is_public: bool,
        type_tag: Option<String>,
        value: NodeValue,
        source: Option<ChildSource>,
        depth: usize,
    ) -> NodeId {
        let value = match value {
            NodeValue::Text(text) => NodeValue::Text(
                truncate_graphemes(&text, self.options.max_value_graphemes).into_owned(),
            ),
            failed => failed,
        };
        let source = if depth >= self.options.max_depth {
            None
        } else {
            source
        };
        self.push(VariableNode {
            id: NodeId(0),
            parent,
            label,
            declared_kind,
            is_public,
            type_tag,
            value,
            kind: NodeKind::Leaf,
            depth,
            expanded: false,
            children: None,
            source,
        })
    }

    fn push(&mut self, mut node: VariableNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.id = id;
        self.nodes.push(node);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbers(count: usize) -> LocalValue {
        LocalValue::sequence((0..count).map(LocalValue::scalar).collect())
    }

    fn labels<R: RemoteObjects>(tree: &VariableTree<R>, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| tree.node(*id).map(|n| n.label().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_ten_items_are_leaves() {
        let mut tree = VariableTree::local("xs", numbers(10), InspectorOptions::default());
        let root = tree.root();
        let children = tree.expand(root).unwrap().to_vec();
        assert_eq!(children.len(), 10);
        assert!(
            children
                .iter()
                .all(|id| tree.node(*id).unwrap().kind() == NodeKind::Leaf)
        );
        assert_eq!(
            tree.node(children[3]).unwrap().value(),
            &NodeValue::Text("3".into())
        );
    }

    #[test]
    fn test_eleven_items_make_two_ranges() {
        let mut tree = VariableTree::local("xs", numbers(11), InspectorOptions::default());
        let root = tree.root();
        let children = tree.expand(root).unwrap().to_vec();
        assert_eq!(labels(&tree, &children), vec!["[0..9]", "[10..10]"]);

        let last = tree.expand(children[1]).unwrap().to_vec();
        assert_eq!(labels(&tree, &last), vec!["[10]"]);
    }

    #[test]
    fn test_ranges_are_materialized_lazily() {
        let mut tree = VariableTree::local("xs", numbers(1000), InspectorOptions::default());
        let root = tree.root();
        let children = tree.expand(root).unwrap().to_vec();
        assert_eq!(children.len(), 10);
        assert_eq!(tree.len(), 11);
        assert!(tree.node(children[0]).unwrap().children().is_none());

        let inner = tree.expand(children[2]).unwrap().to_vec();
        assert_eq!(labels(&tree, &inner[..2]), vec!["[200..209]", "[210..219]"]);
        assert_eq!(tree.len(), 21);
    }

    #[test]
    fn test_members_sorted_by_name() {
        let value = LocalValue::mapping(vec![
            (MemberDecl::property("b"), LocalValue::scalar(2)),
            (MemberDecl::field("_a", false), LocalValue::scalar(1)),
            (MemberDecl::property("a"), LocalValue::scalar(0)),
        ]);
        let mut tree = VariableTree::local("obj", value, InspectorOptions::default());
        let root = tree.root();
        let children = tree.expand(root).unwrap().to_vec();
        assert_eq!(labels(&tree, &children), vec!["_a", "a", "b"]);
        assert_eq!(
            tree.node(children[0]).unwrap().declared_kind(),
            DeclaredKind::Field
        );
    }

    #[test]
    fn test_depth_limit_turns_values_into_leaves() {
        let nested = LocalValue::sequence(vec![LocalValue::sequence(vec![numbers(2)])]);
        let options = InspectorOptions {
            max_depth: 1,
            ..InspectorOptions::default()
        };
        let mut tree = VariableTree::local("deep", nested, options);
        let root = tree.root();
        let children = tree.expand(root).unwrap().to_vec();
        let child = tree.node(children[0]).unwrap();
        assert!(!child.is_expandable());
        assert_eq!(tree.expand(children[0]).unwrap(), &[] as &[NodeId]);
        assert!(!tree.node(children[0]).unwrap().is_expanded());
    }

    #[test]
    fn test_long_values_are_truncated() {
        let options = InspectorOptions {
            max_value_graphemes: 5,
            ..InspectorOptions::default()
        };
        let tree = VariableTree::local("s", LocalValue::scalar("abcdefgh"), options);
        assert_eq!(
            tree.node(tree.root()).unwrap().value(),
            &NodeValue::Text("abcd…".into())
        );
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let mut other = VariableTree::local("xs", numbers(3), InspectorOptions::default());
        let root = other.root();
        let foreign = other.expand(root).unwrap()[2];

        let mut tree = VariableTree::local("x", LocalValue::scalar(1), InspectorOptions::default());
        assert_eq!(
            tree.expand(foreign),
            Err(InspectorError::UnknownNode(foreign))
        );
    }
}
