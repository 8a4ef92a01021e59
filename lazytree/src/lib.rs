//! Tree view model with lazy queries and pushed invalidation.
//!
//! The crate is split into three layers:
//! - data ([`Node`], [`IdAllocator`]) owned and edited by the application;
//! - the provider ([`TreeModel`]) that answers renderer queries through
//!   [`TreeDataProvider`] and pushes [`TreeDataChange`]s to subscribers;
//! - headless helpers ([`flatten_tree`], [`reveal_path`]) that walk a provider
//!   the way a renderer does.
//!
//! The usual flow:
//! 1. build nodes with [`Node::new`] and attach them with
//!    [`Node::append_child`] or [`TreeModel::push_root`];
//! 2. let the renderer [`subscribe`](TreeDataProvider::subscribe) and bind
//!    itself with [`TreeModel::bind_view`];
//! 3. after every edit call [`TreeModel::update_node`], optionally asking the
//!    renderer to reveal the node.
//!
//! See `examples/outline.rs` for a complete runnable example.
//!
//! # Quick Example
//!
//! ```no_run
//! use lazytree::{
//!     IdAllocator, Node, TreeDataChange, TreeDataProvider, TreeModel,
//! };
//!
//! let ids = IdAllocator::new();
//! let mut model = TreeModel::new();
//! let events = model.subscribe();
//!
//! let root = Node::new(&ids, "Filters", None, Some("filter"));
//! model.push_root(root.clone());
//! model.update_node(None, false, false);
//!
//! let child = Node::new(&ids, "", Some(&root), None);
//! root.borrow_mut().children.push(child.clone());
//! model.update_node(Some(&child), true, true);
//!
//! assert_eq!(model.tree_item(&child).label, "<treeview empty>");
//! assert_eq!(
//!     events.drain(),
//!     vec![
//!         TreeDataChange::All,
//!         TreeDataChange::Node(root),
//!         TreeDataChange::Node(child),
//!     ]
//! );
//! ```

mod error;
mod event;
mod id;
mod item;
mod model;
mod node;
mod options;
mod outline;
mod view;

pub use error::{Error, Result};
pub use event::{
    ChannelRecvError, ChannelRecvResult, ChannelTryRecvError,
    ChannelTryRecvResult, TreeDataChange, TreeEvents,
};
pub use id::{IdAllocator, NodeId};
pub use item::{
    CollapsibleState, Command, EMPTY_LABEL_PLACEHOLDER, Icon, Locator,
    TreeItem,
};
pub use model::{TreeDataProvider, TreeModel};
pub use node::{Node, NodeData};
pub use options::TreeOptions;
pub use outline::{FlattenedNode, NodePath, flatten_tree, reveal_path};
pub use view::{RevealFlags, TreeViewHandle};
