use overlay_inspector::{
    DeclaredKind, IndexRange, InspectorOptions, LocalValue, MemberDecl, NodeKind, NodeValue,
    RemoteError, RemoteId, RemoteObjects, RemoteValue, ValueShape, VariableTree,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory debuggee that records every getter call.
#[derive(Default)]
struct FakeDebuggee {
    members: HashMap<(u64, String), RemoteValue>,
    failing_items: Vec<u64>,
    member_calls: Vec<(u64, String, bool)>,
    item_calls: Vec<(u64, IndexRange)>,
}

impl FakeDebuggee {
    fn with_member(mut self, owner: u64, name: &str, value: RemoteValue) -> Self {
        self.members.insert((owner, name.to_string()), value);
        self
    }
}

impl RemoteObjects for FakeDebuggee {
    fn property_or_field(
        &mut self,
        owner: RemoteId,
        name: &str,
        is_property: bool,
    ) -> Result<RemoteValue, RemoteError> {
        self.member_calls.push((owner.0, name.to_string(), is_property));
        self.members
            .get(&(owner.0, name.to_string()))
            .cloned()
            .ok_or_else(|| RemoteError::Evaluation(format!("{name} threw")))
    }

    fn items(
        &mut self,
        owner: RemoteId,
        range: IndexRange,
    ) -> Result<Vec<RemoteValue>, RemoteError> {
        self.item_calls.push((owner.0, range));
        if self.failing_items.contains(&owner.0) {
            return Err(RemoteError::Gone(owner));
        }
        Ok((range.min..=range.max)
            .map(|i| RemoteValue::scalar("Int32", i.to_string()))
            .collect())
    }
}

fn remote_list(id: u64, len: usize) -> RemoteValue {
    RemoteValue {
        id: Some(RemoteId(id)),
        type_tag: "List`1".into(),
        display: format!("Count = {len}"),
        shape: ValueShape::Sequence { len },
    }
}

fn remote_object(id: u64, members: Vec<MemberDecl>) -> RemoteValue {
    RemoteValue {
        id: Some(RemoteId(id)),
        type_tag: "Customer".into(),
        display: "{Customer}".into(),
        shape: ValueShape::Mapping { members },
    }
}

#[test]
fn test_item_getter_runs_once_across_expand_collapse_expand() {
    let mut tree = VariableTree::remote(
        "numbers",
        remote_list(1, 8),
        FakeDebuggee::default(),
        InspectorOptions::default(),
    );
    let root = tree.root();

    let first = tree.expand(root).unwrap().to_vec();
    tree.collapse(root).unwrap();
    assert!(!tree.node(root).unwrap().is_expanded());
    let second = tree.expand(root).unwrap().to_vec();

    assert_eq!(first, second);
    assert_eq!(first.len(), 8);
    assert_eq!(tree.remote_objects().item_calls, vec![(1, IndexRange::new(0, 7))]);
    assert_eq!(
        tree.node(first[5]).unwrap().value(),
        &NodeValue::Text("5".into())
    );
    assert_eq!(tree.node(first[5]).unwrap().type_tag(), Some("Int32"));
}

#[test]
fn test_member_getter_runs_once_per_member() {
    let debuggee = FakeDebuggee::default()
        .with_member(7, "Name", RemoteValue::scalar("String", "\"Ada\""))
        .with_member(7, "id", RemoteValue::scalar("Int32", "42"));
    let mut tree = VariableTree::remote(
        "customer",
        remote_object(
            7,
            vec![MemberDecl::property("Name"), MemberDecl::field("id", false)],
        ),
        debuggee,
        InspectorOptions::default(),
    );
    let root = tree.root();

    tree.expand(root).unwrap();
    tree.toggle(root).unwrap();
    tree.toggle(root).unwrap();
    tree.expand(root).unwrap();

    assert_eq!(
        tree.remote_objects().member_calls,
        vec![(7, "Name".to_string(), true), (7, "id".to_string(), false)]
    );
}

#[test]
fn test_large_remote_collection_fetches_only_the_opened_chunk() {
    let mut tree = VariableTree::remote(
        "big",
        remote_list(3, 1_000_000),
        FakeDebuggee::default(),
        InspectorOptions::default(),
    );
    let root = tree.root();

    let top = tree.expand(root).unwrap().to_vec();
    assert_eq!(top.len(), 10);
    assert_eq!(
        tree.node(top[9]).unwrap().kind(),
        NodeKind::Range {
            min_index: 900_000,
            max_index: 999_999
        }
    );
    assert!(tree.remote_objects().item_calls.is_empty());

    let mut node = top[9];
    while tree.node(node).unwrap().kind() != NodeKind::Leaf {
        let children = tree.expand(node).unwrap().to_vec();
        node = children[children.len() - 1];
    }
    assert_eq!(tree.node(node).unwrap().label(), "[999999]");
    assert_eq!(
        tree.remote_objects().item_calls,
        vec![(3, IndexRange::new(999_990, 999_999))]
    );
}

#[test]
fn test_failed_getter_becomes_leaf_carrying_failure() {
    let mut debuggee = FakeDebuggee::default();
    debuggee.failing_items.push(5);
    let mut tree = VariableTree::remote(
        "gone",
        remote_list(5, 2),
        debuggee,
        InspectorOptions::default(),
    );
    let root = tree.root();

    let children = tree.expand(root).unwrap().to_vec();
    assert_eq!(children.len(), 2);
    let node = tree.node(children[1]).unwrap();
    assert_eq!(node.value(), &NodeValue::Failed(RemoteError::Gone(RemoteId(5))));
    assert!(!node.is_expandable());

    // Re-expanding does not retry.
    tree.collapse(root).unwrap();
    tree.expand(root).unwrap();
    assert_eq!(tree.remote_objects().item_calls.len(), 1);
}

#[test]
fn test_missing_member_is_reported_not_retried() {
    let mut tree = VariableTree::remote(
        "obj",
        remote_object(9, vec![MemberDecl::property("Broken")]),
        FakeDebuggee::default(),
        InspectorOptions::default(),
    );
    let root = tree.root();
    let children = tree.expand(root).unwrap().to_vec();
    let node = tree.node(children[0]).unwrap();
    assert_eq!(node.declared_kind(), DeclaredKind::Property);
    assert_eq!(node.value().display(), "<evaluation failed: Broken threw>");
}

#[test]
fn test_visibility_toggle_is_read_without_rebuilding() {
    let show_private = Arc::new(AtomicBool::new(false));
    let toggle = Arc::clone(&show_private);
    let value = LocalValue::mapping(vec![
        (MemberDecl::property("Total"), LocalValue::scalar(10)),
        (MemberDecl::field("cache", false), LocalValue::scalar("null")),
    ]);
    let mut tree = VariableTree::local("order", value, InspectorOptions::default())
        .with_visibility(move || toggle.load(Ordering::Relaxed));
    let root = tree.root();
    tree.expand(root).unwrap();
    let nodes_before = tree.len();

    let visible: Vec<_> = tree
        .visible_children(root)
        .unwrap()
        .into_iter()
        .map(|id| tree.node(id).unwrap().label().to_string())
        .collect();
    assert_eq!(visible, vec!["Total"]);

    show_private.store(true, Ordering::Relaxed);
    let visible: Vec<_> = tree
        .visible_children(root)
        .unwrap()
        .into_iter()
        .map(|id| tree.node(id).unwrap().label().to_string())
        .collect();
    assert_eq!(visible, vec!["Total", "cache"]);
    assert_eq!(tree.len(), nodes_before);
}

#[test]
fn test_visible_rows_follow_expansion() {
    let value = LocalValue::mapping(vec![
        (
            MemberDecl::property("Lines"),
            LocalValue::sequence(vec![LocalValue::scalar("a"), LocalValue::scalar("b")]),
        ),
        (MemberDecl::property("Id"), LocalValue::scalar(1)),
    ]);
    let mut tree = VariableTree::local("doc", value, InspectorOptions::default());
    let root = tree.root();
    let members = tree.expand(root).unwrap().to_vec();
    // "Id" sorts before "Lines".
    tree.expand(members[1]).unwrap();

    let rows: Vec<(String, usize)> = tree
        .visible_rows()
        .into_iter()
        .map(|row| (tree.node(row.id).unwrap().label().to_string(), row.indent))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("doc".to_string(), 0),
            ("Id".to_string(), 1),
            ("Lines".to_string(), 1),
            ("[0]".to_string(), 2),
            ("[1]".to_string(), 2),
        ]
    );

    tree.collapse(members[1]).unwrap();
    assert_eq!(tree.visible_rows().len(), 3);
}
