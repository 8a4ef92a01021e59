use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::Result;
use crate::event::{EventSender, TreeDataChange, TreeEvents, build_channel};
use crate::item::{CollapsibleState, TreeItem};
use crate::node::Node;
use crate::options::TreeOptions;
use crate::view::TreeViewHandle;

/// Capability set a renderer consumes.
///
/// Renderers pull structure lazily through `children`/`tree_item`/`parent`
/// and re-query whatever a [`TreeDataChange`] names.
pub trait TreeDataProvider {
    /// Children of `element`, or the root list when `element` is `None`.
    fn children(&self, element: Option<&Node>) -> Vec<Node>;
    /// Parent of `element`, `None` for root-level nodes.
    fn parent(&self, element: &Node) -> Option<Node>;
    /// Presentation descriptor for `element`.
    fn tree_item(&self, element: &Node) -> TreeItem;
    /// Open a new change subscription.
    fn subscribe(&self) -> TreeEvents;
}

/// Tree provider: owns the root list and the change channel.
///
/// Node contents are edited by the owning application; the model only
/// answers queries and forwards [`TreeModel::update_node`] notifications.
pub struct TreeModel {
    roots: Vec<Node>,
    options: TreeOptions,
    listeners: RefCell<Vec<EventSender>>,
    view: RefCell<Option<Rc<dyn TreeViewHandle>>>,
    disposed: Cell<bool>,
}

impl TreeModel {
    /// Empty model with default [`TreeOptions`].
    pub fn new() -> Self {
        Self::build(TreeOptions::default())
    }

    /// Empty model with caller-supplied options.
    ///
    /// Fails with [`Error::InvalidOptions`](crate::Error::InvalidOptions)
    /// when the options would make notifications undeliverable.
    pub fn with_options(options: TreeOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(options))
    }

    fn build(options: TreeOptions) -> Self {
        Self {
            roots: Vec::new(),
            options,
            listeners: RefCell::new(Vec::new()),
            view: RefCell::new(None),
            disposed: Cell::new(false),
        }
    }

    /// Options the model was built with.
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Snapshot of the root-level nodes.
    pub fn roots(&self) -> Vec<Node> {
        self.roots.clone()
    }

    /// Direct access to the root list. Call [`TreeModel::update_node`]
    /// with `None` afterwards.
    pub fn roots_mut(&mut self) -> &mut Vec<Node> {
        &mut self.roots
    }

    /// Append a root-level node, detaching it from wherever it was.
    ///
    /// A node already in the root list moves to the end.
    pub fn push_root(&mut self, node: Node) {
        if let Some(old_parent) = node.parent() {
            old_parent.remove_child(node.id());
        }
        node.set_parent(None);
        self.roots.retain(|root| root != &node);
        self.roots.push(node);
    }

    /// Bind the live view used for reveal requests, replacing any previous
    /// binding.
    pub fn bind_view(&self, view: impl TreeViewHandle + 'static) {
        if self.disposed.get() {
            log::debug!("tree model disposed, ignoring view binding");
            return;
        }

        log::debug!("tree view bound");
        *self.view.borrow_mut() = Some(Rc::new(view));
    }

    /// Drop the view binding; later reveals are skipped.
    pub fn unbind_view(&self) {
        if self.view.borrow_mut().take().is_some() {
            log::debug!("tree view unbound");
        }
    }

    /// Whether a view is currently bound.
    pub fn has_view(&self) -> bool {
        self.view.borrow().is_some()
    }

    /// Number of live subscriptions as of the last emission.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether [`TreeModel::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Report that the subtree rooted at `node` changed.
    ///
    /// With `update_parent`, the parent is invalidated first (a root-level
    /// node invalidates the whole tree). `node == None` invalidates the whole
    /// tree. With `reveal`, a bound view is asked to show `node`.
    pub fn update_node(
        &self,
        node: Option<&Node>,
        reveal: bool,
        update_parent: bool,
    ) {
        if self.disposed.get() {
            log::debug!("tree model disposed, dropping update");
            return;
        }

        if update_parent {
            if let Some(node) = node {
                let parent = node.parent();
                self.fire(TreeDataChange::for_node(parent.as_ref()));
            }
        }

        self.fire(TreeDataChange::for_node(node));

        if !reveal {
            return;
        }

        let Some(node) = node else {
            return;
        };

        // Clone the binding out so the view may call back into the model.
        let view = self.view.borrow().clone();
        match view {
            Some(view) => {
                log::debug!("revealing tree node {}", node.id());
                view.reveal(node, self.options.reveal);
            },
            None => {
                log::trace!("no tree view bound, skipping reveal");
            },
        }
    }

    /// Release every subscription and the view binding.
    ///
    /// Subscribers observe a disconnected channel; later updates are
    /// ignored.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }

        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        let view = self.view.borrow_mut().take();
        log::debug!(
            "tree model disposed ({} subscribers, view bound: {})",
            listeners.len(),
            view.is_some()
        );
    }

    fn fire(&self, change: TreeDataChange) {
        log::trace!("tree data changed: {:?}", change.node().map(Node::id));
        self.listeners
            .borrow_mut()
            .retain(|sender| sender.deliver(change.clone()));
    }
}

impl TreeDataProvider for TreeModel {
    fn children(&self, element: Option<&Node>) -> Vec<Node> {
        match element {
            Some(node) => node.children(),
            None => self.roots(),
        }
    }

    fn parent(&self, element: &Node) -> Option<Node> {
        element.parent()
    }

    fn tree_item(&self, element: &Node) -> TreeItem {
        let data = element.borrow();
        let label = if data.label.is_empty() {
            self.options.empty_label.clone()
        } else {
            data.label.clone()
        };

        TreeItem {
            id: data.id().to_string(),
            label,
            context_value: data.context_value.clone(),
            command: data.command.clone(),
            collapsible_state: CollapsibleState::from_child_count(
                data.children.len(),
            ),
            icon: data.icon.clone(),
        }
    }

    fn subscribe(&self) -> TreeEvents {
        let (sender, events) = build_channel(self.options.event_capacity);
        if self.disposed.get() {
            log::debug!("tree model disposed, subscription closed");
            return events;
        }

        self.listeners.borrow_mut().push(sender);
        log::debug!(
            "tree subscriber added ({} total)",
            self.listeners.borrow().len()
        );
        events
    }
}

impl Default for TreeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TreeModel {
    fn drop(&mut self) {
        self.dispose();
    }
}
