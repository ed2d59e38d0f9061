//! Arena-resident Fibonacci heap nodes
//!
//! Nodes are stored in a [`SlotMap`] owned by the heap and refer to each other
//! through generational [`NodeKey`]s. Parent, child and sibling links are
//! plain keys, so the cyclic sibling rings need no reference counting and a
//! removed node can never be reached through a stale link without the arena
//! noticing.

use crate::rank::Rank;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena key of a heap node
    pub(crate) struct NodeKey;
}

/// Node storage for one heap.
pub(crate) type Arena<E, P> = SlotMap<NodeKey, Node<E, P>>;

pub(crate) struct Node<E, P> {
    pub(crate) element: E,
    pub(crate) priority: P,
    pub(crate) parent: Option<NodeKey>,
    /// Any one member of this node's children ring
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
    pub(crate) rank: Rank,
    /// Lost a child since it last became a child of `parent`
    pub(crate) marked: bool,
}

impl<E, P> Node<E, P> {
    /// Allocates a parentless, childless node forming a ring of one.
    pub(crate) fn alloc(arena: &mut Arena<E, P>, element: E, priority: P) -> NodeKey {
        arena.insert_with_key(|key| Node {
            element,
            priority,
            parent: None,
            child: None,
            left: key,
            right: key,
            rank: 0,
            marked: false,
        })
    }

    #[inline]
    pub(crate) fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
