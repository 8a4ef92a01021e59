use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::SystemTime;

use crate::id::{IdAllocator, NodeId};
use crate::item::{Command, Icon, Locator};

/// Non-owning parent link.
type WeakNodePtr = Weak<RefCell<NodeData>>;

/// Fields of a tree node.
///
/// The owning application edits these directly through
/// [`Node::borrow_mut`] and then reports the change with
/// [`TreeModel::update_node`](crate::TreeModel::update_node).
#[derive(Debug)]
pub struct NodeData {
    id: NodeId,
    parent: WeakNodePtr,
    pub label: String,
    pub locator: Option<Locator>,
    /// Presentation order; never sorted by the model.
    pub children: Vec<Node>,
    pub context_value: Option<String>,
    pub command: Option<Command>,
    pub time: Option<SystemTime>,
    pub icon: Option<Icon>,
}

impl NodeData {
    /// See [`Node::id`].
    pub fn id(&self) -> NodeId {
        self.id
    }
}

/// Shared handle to one tree node.
///
/// Children are owned through their parent's `children` list (or the root
/// list of a [`TreeModel`](crate::TreeModel)); the parent link is weak.
/// Two handles are equal only when they point at the same node.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    /// Create a node with a fresh id.
    ///
    /// `parent` only sets the back-reference; append the node to
    /// `parent.children` (or the root list) separately, or use
    /// [`Node::append_child`].
    pub fn new(
        ids: &IdAllocator,
        label: impl Into<String>,
        parent: Option<&Node>,
        icon: Option<&str>,
    ) -> Self {
        let parent = parent.map(Node::downgrade).unwrap_or_default();
        Self(Rc::new(RefCell::new(NodeData {
            id: ids.next_id(),
            parent,
            label: label.into(),
            locator: None,
            children: Vec::new(),
            context_value: None,
            command: None,
            time: None,
            icon: icon.map(Icon::new),
        })))
    }

    /// Id assigned at construction; never changes.
    pub fn id(&self) -> NodeId {
        self.0.borrow().id
    }

    /// Copy of the raw label (empty labels are not substituted here).
    pub fn label(&self) -> String {
        self.0.borrow().label.clone()
    }

    /// Owning node, or `None` for root-level nodes and orphans whose parent
    /// was dropped.
    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// Replace the back-reference without touching any child list.
    pub fn set_parent(&self, parent: Option<&Node>) {
        self.0.borrow_mut().parent =
            parent.map(Node::downgrade).unwrap_or_default();
    }

    /// Snapshot of the current children.
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Whether a renderer should offer to expand this node.
    pub fn has_children(&self) -> bool {
        !self.0.borrow().children.is_empty()
    }

    /// Append `child` and point its parent link at `self`.
    ///
    /// `child` is first removed from its current parent's list, so it is
    /// never listed twice; re-appending to the same parent moves it last.
    /// Root-list membership is owned by the model; detach from there with
    /// [`TreeModel::roots_mut`](crate::TreeModel::roots_mut).
    pub fn append_child(&self, child: &Node) {
        if let Some(old_parent) = child.parent() {
            old_parent.remove_child(child.id());
        }
        child.set_parent(Some(self));
        self.0.borrow_mut().children.push(child.clone());
    }

    /// Detach the child with `id`, clearing its parent link.
    pub fn remove_child(&self, id: NodeId) -> Option<Node> {
        let removed = {
            let mut data = self.0.borrow_mut();
            let index =
                data.children.iter().position(|child| child.id() == id)?;
            data.children.remove(index)
        };
        removed.set_parent(None);
        Some(removed)
    }

    /// Shared access to the node fields.
    pub fn borrow(&self) -> Ref<'_, NodeData> {
        self.0.borrow()
    }

    /// Exclusive access to the node fields. Report edits with
    /// [`TreeModel::update_node`](crate::TreeModel::update_node).
    pub fn borrow_mut(&self) -> RefMut<'_, NodeData> {
        self.0.borrow_mut()
    }

    fn downgrade(&self) -> WeakNodePtr {
        Rc::downgrade(&self.0)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(data) => f
                .debug_struct("Node")
                .field("id", &data.id)
                .field("label", &data.label)
                .field("children", &data.children.len())
                .finish(),
            Err(_) => f.write_str("Node(<borrowed>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_has_fresh_id_and_no_children() {
        let ids = IdAllocator::new();
        let root = Node::new(&ids, "Root", None, None);
        let other = Node::new(&ids, "Other", None, None);

        assert_ne!(root.id(), other.id());
        assert!(root.id() < other.id());
        assert_eq!(root.label(), "Root");
        assert!(root.parent().is_none());
        assert!(root.children().is_empty());
        assert!(!root.has_children());
    }

    #[test]
    fn icon_is_set_only_when_key_given() {
        let ids = IdAllocator::new();
        let plain = Node::new(&ids, "plain", None, None);
        let iconic = Node::new(&ids, "iconic", None, Some("filter"));

        assert!(plain.borrow().icon.is_none());
        assert_eq!(iconic.borrow().icon, Some(Icon::new("filter")));
    }

    #[test]
    fn constructor_sets_parent_link_only() {
        let ids = IdAllocator::new();
        let root = Node::new(&ids, "Root", None, None);
        let child = Node::new(&ids, "child", Some(&root), None);

        assert_eq!(child.parent(), Some(root.clone()));
        assert_eq!(root.child_count(), 0);

        root.borrow_mut().children.push(child.clone());
        assert_eq!(root.children(), vec![child]);
    }

    #[test]
    fn append_and_remove_keep_links_consistent() {
        let ids = IdAllocator::new();
        let root = Node::new(&ids, "Root", None, None);
        let first = Node::new(&ids, "first", None, None);
        let second = Node::new(&ids, "second", None, None);

        root.append_child(&first);
        root.append_child(&second);
        assert_eq!(root.children(), vec![first.clone(), second.clone()]);
        assert_eq!(second.parent(), Some(root.clone()));

        let removed = root.remove_child(first.id()).expect("child removed");
        assert_eq!(removed, first);
        assert!(first.parent().is_none());
        assert_eq!(root.children(), vec![second]);
        assert!(root.remove_child(first.id()).is_none());
    }

    #[test]
    fn append_child_moves_node_between_parents() {
        let ids = IdAllocator::new();
        let first = Node::new(&ids, "A", None, None);
        let second = Node::new(&ids, "B", None, None);
        let child = Node::new(&ids, "C", None, None);

        first.append_child(&child);
        second.append_child(&child);

        assert!(first.children().is_empty());
        assert_eq!(second.children(), vec![child.clone()]);
        assert_eq!(child.parent(), Some(second));
    }

    #[test]
    fn append_child_to_same_parent_moves_it_last() {
        let ids = IdAllocator::new();
        let root = Node::new(&ids, "Root", None, None);
        let first = Node::new(&ids, "first", None, None);
        let second = Node::new(&ids, "second", None, None);
        root.append_child(&first);
        root.append_child(&second);

        root.append_child(&first);

        assert_eq!(root.children(), vec![second, first.clone()]);
        assert_eq!(first.parent(), Some(root));
    }

    #[test]
    fn parent_link_does_not_keep_parent_alive() {
        let ids = IdAllocator::new();
        let child = {
            let root = Node::new(&ids, "Root", None, None);
            let child = Node::new(&ids, "child", None, None);
            root.append_child(&child);
            child
        };

        assert!(child.parent().is_none());
    }

    #[test]
    fn handles_compare_by_identity() {
        let ids = IdAllocator::new();
        let a = Node::new(&ids, "same", None, None);
        let b = Node::new(&ids, "same", None, None);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn fields_are_mutable_in_place() {
        let ids = IdAllocator::new();
        let node = Node::new(&ids, "before", None, None);
        {
            let mut data = node.borrow_mut();
            data.label = String::from("after");
            data.context_value = Some(String::from("removable"));
            data.locator = Some(Locator::new("log://trace#2"));
            data.time = Some(SystemTime::UNIX_EPOCH);
        }

        assert_eq!(node.label(), "after");
        let data = node.borrow();
        assert_eq!(data.context_value.as_deref(), Some("removable"));
        assert_eq!(
            data.locator.as_ref().and_then(Locator::fragment),
            Some("2")
        );
        assert_eq!(data.time, Some(SystemTime::UNIX_EPOCH));
    }
}
