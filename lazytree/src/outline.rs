//! Headless pull-based walks over a [`TreeDataProvider`].
//!
//! These helpers only use the provider's query surface, so they behave the
//! way a renderer does: children are fetched when a row is expanded and
//! nothing else is read.

use crate::id::NodeId;
use crate::item::TreeItem;
use crate::model::TreeDataProvider;
use crate::node::Node;

/// Ids from the root to a row.
pub type NodePath = Vec<NodeId>;

/// Visible row produced by [`flatten_tree`].
#[derive(Debug, Clone)]
pub struct FlattenedNode {
    /// Zero-based tree depth (`0` for root-level rows).
    pub depth: usize,
    pub node: Node,
    /// Descriptor as returned by [`TreeDataProvider::tree_item`].
    pub item: TreeItem,
    pub path: NodePath,
}

/// Flatten the visible part of a tree into depth-first rows.
///
/// Rows keep presentation (insertion) order. Children are requested only
/// for expandable rows for which `is_expanded` returns `true`.
pub fn flatten_tree<P>(
    provider: &P,
    is_expanded: impl Fn(&Node) -> bool,
) -> Vec<FlattenedNode>
where
    P: TreeDataProvider + ?Sized,
{
    let mut entries = Vec::new();
    let mut path = Vec::new();
    for node in provider.children(None) {
        push_node(provider, &is_expanded, node, 0, &mut path, &mut entries);
    }
    entries
}

fn push_node<P>(
    provider: &P,
    is_expanded: &impl Fn(&Node) -> bool,
    node: Node,
    depth: usize,
    path: &mut NodePath,
    entries: &mut Vec<FlattenedNode>,
) where
    P: TreeDataProvider + ?Sized,
{
    let item = provider.tree_item(&node);
    let expand = item.collapsible_state.is_expandable() && is_expanded(&node);

    path.push(node.id());
    entries.push(FlattenedNode {
        depth,
        node: node.clone(),
        item,
        path: path.clone(),
    });

    if expand {
        for child in provider.children(Some(&node)) {
            push_node(provider, is_expanded, child, depth + 1, path, entries);
        }
    }

    path.pop();
}

/// Ancestor chain of `node`, root first and ending with `node`.
///
/// This is what a renderer expands when honoring a reveal request.
pub fn reveal_path<P>(provider: &P, node: &Node) -> Vec<Node>
where
    P: TreeDataProvider + ?Sized,
{
    let mut chain = vec![node.clone()];
    let mut current = provider.parent(node);
    while let Some(parent) = current {
        current = provider.parent(&parent);
        chain.push(parent);
    }
    chain.reverse();
    chain
}
