use std::cell::Cell;
use std::rc::Rc;

use flume::{
    Receiver, Sender, TryRecvError as FlumeTryRecvError, TrySendError,
};

use crate::node::Node;

/// Invalidation pushed to subscribers by
/// [`TreeModel::update_node`](crate::TreeModel::update_node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeDataChange {
    /// Everything changed; re-query the root list.
    All,
    /// Re-query this node and its children.
    Node(Node),
}

impl TreeDataChange {
    pub(crate) fn for_node(node: Option<&Node>) -> Self {
        node.map_or(Self::All, |node| Self::Node(node.clone()))
    }

    /// The invalidated node, or `None` for [`TreeDataChange::All`].
    pub fn node(&self) -> Option<&Node> {
        match self {
            Self::All => None,
            Self::Node(node) => Some(node),
        }
    }
}

/// Error returned when receiving from a closed channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelRecvError {
    Disconnected,
}

/// Error returned when a non-blocking receive fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelTryRecvError {
    Empty,
    Disconnected,
}

pub type ChannelRecvResult<T> = std::result::Result<T, ChannelRecvError>;
pub type ChannelTryRecvResult<T> = std::result::Result<T, ChannelTryRecvError>;

/// Receiving end of one subscription.
///
/// Dropping it unsubscribes; the model prunes the sender on its next
/// emission. When a bounded queue overflowed, a single
/// [`TreeDataChange::All`] is yielded once the queue has been drained.
#[derive(Debug)]
pub struct TreeEvents {
    receiver: Receiver<TreeDataChange>,
    overflowed: Rc<Cell<bool>>,
}

impl TreeEvents {
    /// Receive without blocking.
    pub fn try_recv(&self) -> ChannelTryRecvResult<TreeDataChange> {
        match self.receiver.try_recv() {
            Ok(change) => Ok(change),
            Err(FlumeTryRecvError::Empty) if self.overflowed.replace(false) => {
                Ok(TreeDataChange::All)
            },
            Err(err) => Err(map_try_recv_error(err)),
        }
    }

    /// Blocking receive.
    ///
    /// The model runs on the same thread as its subscribers, so only call
    /// this when a change is known to be queued.
    pub fn recv(&self) -> ChannelRecvResult<TreeDataChange> {
        match self.try_recv() {
            Ok(change) => Ok(change),
            Err(ChannelTryRecvError::Disconnected) => {
                Err(ChannelRecvError::Disconnected)
            },
            Err(ChannelTryRecvError::Empty) => self
                .receiver
                .recv()
                .map_err(|_| ChannelRecvError::Disconnected),
        }
    }

    /// Async receive.
    pub async fn recv_async(&self) -> ChannelRecvResult<TreeDataChange> {
        match self.try_recv() {
            Ok(change) => Ok(change),
            Err(ChannelTryRecvError::Disconnected) => {
                Err(ChannelRecvError::Disconnected)
            },
            Err(ChannelTryRecvError::Empty) => self
                .receiver
                .recv_async()
                .await
                .map_err(|_| ChannelRecvError::Disconnected),
        }
    }

    /// Take every queued change in emission order.
    pub fn drain(&self) -> Vec<TreeDataChange> {
        std::iter::from_fn(|| self.try_recv().ok()).collect()
    }

    /// Number of pending changes, including a pending overflow refresh.
    pub fn len(&self) -> usize {
        self.receiver.len() + usize::from(self.overflowed.get())
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the model side has been disposed or dropped.
    pub fn is_disconnected(&self) -> bool {
        self.receiver.is_disconnected()
    }
}

/// Model side of one subscription.
#[derive(Debug)]
pub(crate) struct EventSender {
    sender: Sender<TreeDataChange>,
    overflowed: Rc<Cell<bool>>,
}

impl EventSender {
    /// Queue `change`; returns `false` once the receiver is gone.
    ///
    /// A full queue marks the subscription overflowed instead of losing the
    /// change silently; the receiver then gets a full refresh.
    pub(crate) fn deliver(&self, change: TreeDataChange) -> bool {
        if self.overflowed.get() {
            return !self.sender.is_disconnected();
        }

        match self.sender.try_send(change) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::warn!(
                    "tree subscriber queue full, falling back to full refresh"
                );
                self.overflowed.set(true);
                true
            },
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Build one subscription; `None` means an unbounded queue.
///
/// `Some(0)` is rejected by
/// [`TreeOptions::validate`](crate::TreeOptions::validate) before a model
/// exists.
pub(crate) fn build_channel(
    capacity: Option<usize>,
) -> (EventSender, TreeEvents) {
    let (sender, receiver) = match capacity {
        Some(cap) => flume::bounded(cap),
        None => flume::unbounded(),
    };
    let overflowed = Rc::new(Cell::new(false));
    (
        EventSender {
            sender,
            overflowed: Rc::clone(&overflowed),
        },
        TreeEvents {
            receiver,
            overflowed,
        },
    )
}

fn map_try_recv_error(err: FlumeTryRecvError) -> ChannelTryRecvError {
    match err {
        FlumeTryRecvError::Empty => ChannelTryRecvError::Empty,
        FlumeTryRecvError::Disconnected => ChannelTryRecvError::Disconnected,
    }
}
