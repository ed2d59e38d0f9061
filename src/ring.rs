//! Circular doubly linked rings of arena nodes.
//!
//! Both the root list and every children list are rings threaded through the
//! `left`/`right` keys of [`Node`]. A ring has no head: any member is an
//! entry point, and a lone node points to itself in both directions.
//!
//! All operations are O(1) except [`members`], which walks the ring once.

use crate::node::{Arena, Node, NodeKey};
use smallvec::SmallVec;

/// Keys of one ring, collected before the ring is restructured.
pub(crate) type Members = SmallVec<[NodeKey; 16]>;

/// Joins the ring containing `b` into the ring containing `a`.
///
/// The members of `b`'s ring are placed directly to the right of `a`, in
/// order. Splicing a singleton is an insertion.
pub(crate) fn splice<E, P>(arena: &mut Arena<E, P>, a: NodeKey, b: NodeKey) {
    debug_assert_ne!(a, b, "cannot splice a node into its own ring");

    let a_right = arena[a].right;
    let b_left = arena[b].left;

    arena[a].right = b;
    arena[b].left = a;
    arena[b_left].right = a_right;
    arena[a_right].left = b_left;
}

/// Removes `x` from its ring, leaving it as a ring of one.
///
/// Returns a surviving neighbour, or `None` if `x` was alone.
pub(crate) fn remove<E, P>(arena: &mut Arena<E, P>, x: NodeKey) -> Option<NodeKey> {
    let Node { left, right, .. } = arena[x];
    if right == x {
        return None;
    }

    arena[left].right = right;
    arena[right].left = left;
    arena[x].left = x;
    arena[x].right = x;
    Some(right)
}

/// Collects every member of the ring containing `start`, walking rightwards.
pub(crate) fn members<E, P>(arena: &Arena<E, P>, start: NodeKey) -> Members {
    let mut keys = Members::new();
    let mut current = start;
    loop {
        keys.push(current);
        current = arena[current].right;
        if current == start {
            break;
        }
    }
    keys
}

/// Iterates the ring containing `start` without collecting it.
pub(crate) fn iter<E, P>(arena: &Arena<E, P>, start: NodeKey) -> RingIter<'_, E, P> {
    RingIter {
        arena,
        start,
        next: Some(start),
    }
}

pub(crate) struct RingIter<'a, E, P> {
    arena: &'a Arena<E, P>,
    start: NodeKey,
    next: Option<NodeKey>,
}

impl<'a, E, P> Iterator for RingIter<'a, E, P> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        let right = self.arena[current].right;
        self.next = (right != self.start).then_some(right);
        Some(current)
    }
}
