use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::node::Node;

bitflags! {
    /// How a renderer should treat a reveal request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RevealFlags: u8 {
        /// Move the selection to the revealed row.
        const SELECT = 1;
        /// Give the view keyboard focus.
        const FOCUS  = 1 << 1;
        /// Expand the revealed row if it has children.
        const EXPAND = 1 << 2;
    }
}

impl Default for RevealFlags {
    fn default() -> Self {
        Self::EXPAND
    }
}

/// Live view bound to a [`TreeModel`](crate::TreeModel).
///
/// Implemented by the renderer; the model only uses it to forward reveal
/// requests.
pub trait TreeViewHandle {
    /// Scroll `node` into view, expanding its ancestors.
    fn reveal(&self, node: &Node, flags: RevealFlags);
}

impl<F> TreeViewHandle for F
where
    F: Fn(&Node, RevealFlags),
{
    fn reveal(&self, node: &Node, flags: RevealFlags) {
        (self)(node, flags)
    }
}
