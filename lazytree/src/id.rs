use std::cell::Cell;
use std::fmt;

use serde::Serialize;

const FIRST_NODE_ID: u64 = 1;

/// Process-unique identity of a [`Node`](crate::Node).
///
/// Rendered as a decimal string when handed to a renderer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Raw counter value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic source of [`NodeId`]s.
///
/// Ids are never reused, even after the node that carried one is dropped.
/// Keep one allocator per tree (or per process) and pass it to
/// [`Node::new`](crate::Node::new).
///
/// The id space ends at `u64::MAX`; that id is still handed out, after
/// which the allocator is exhausted.
#[derive(Debug)]
pub struct IdAllocator {
    /// `None` once `u64::MAX` has been handed out.
    next: Cell<Option<u64>>,
}

impl IdAllocator {
    /// Allocator whose first id is `1`.
    pub fn new() -> Self {
        Self::starting_at(FIRST_NODE_ID)
    }

    /// Create an allocator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Cell::new(Some(first)),
        }
    }

    /// Hand out the next id.
    ///
    /// # Panics
    ///
    /// Panics when the id space is exhausted. Use
    /// [`IdAllocator::try_next_id`] to handle exhaustion.
    pub fn next_id(&self) -> NodeId {
        match self.try_next_id() {
            Some(id) => id,
            None => panic!("node id space exhausted"),
        }
    }

    /// Hand out the next id, or `None` once the id space is exhausted.
    pub fn try_next_id(&self) -> Option<NodeId> {
        let id = self.next.get()?;
        self.next.set(id.checked_add(1));
        Some(NodeId(id))
    }

    /// The id the next call to [`IdAllocator::next_id`] will return.
    pub fn peek(&self) -> Option<NodeId> {
        self.next.get().map(NodeId)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_starts_at_one() {
        let ids = IdAllocator::new();
        assert_eq!(ids.next_id().as_u64(), 1);
        assert_eq!(ids.next_id().to_string(), "2");
    }

    #[test]
    fn allocator_ids_are_strictly_increasing() {
        let ids = IdAllocator::new();
        let allocated: Vec<NodeId> = (0..64).map(|_| ids.next_id()).collect();

        for pair in allocated.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].as_u64() + 1, pair[1].as_u64());
        }
    }

    #[test]
    fn peek_does_not_consume() {
        let ids = IdAllocator::starting_at(40);
        assert_eq!(ids.peek().map(NodeId::as_u64), Some(40));
        assert_eq!(ids.peek().map(NodeId::as_u64), Some(40));
        assert_eq!(ids.next_id().as_u64(), 40);
        assert_eq!(ids.peek().map(NodeId::as_u64), Some(41));
    }

    #[test]
    fn allocator_hands_out_last_id_then_reports_exhaustion() {
        let ids = IdAllocator::starting_at(u64::MAX - 1);
        assert_eq!(ids.next_id().as_u64(), u64::MAX - 1);
        assert_eq!(ids.try_next_id().map(NodeId::as_u64), Some(u64::MAX));
        assert_eq!(ids.peek(), None);
        assert_eq!(ids.try_next_id(), None);
        assert_eq!(ids.try_next_id(), None);
    }

    #[test]
    #[should_panic(expected = "node id space exhausted")]
    fn next_id_panics_when_exhausted() {
        let ids = IdAllocator::starting_at(u64::MAX);
        ids.next_id();
        ids.next_id();
    }

    #[test]
    fn separate_allocators_are_independent() {
        let first = IdAllocator::new();
        let second = IdAllocator::new();
        first.next_id();
        first.next_id();
        assert_eq!(second.next_id().as_u64(), 1);
    }

    #[test]
    fn node_id_serializes_as_number() {
        let ids = IdAllocator::starting_at(7);
        let json = serde_json::to_string(&ids.next_id()).expect("serialize");
        assert_eq!(json, "7");
    }
}
