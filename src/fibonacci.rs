//! Keyed Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert and find-minimum
//! - O(1) amortized decrease-key
//! - O(log n) amortized extract-minimum and delete
//! - union in time proportional to the smaller heap
//!
//! The structure consists of a collection of heap-ordered trees whose roots
//! are linked in a circular doubly linked list. The heap keeps a link to the
//! minimum root. Work is deferred: inserts and unions only splice rings, and
//! trees are merged by rank the next time the minimum is extracted.
//!
//! Elements are addressed by value rather than by handle. Every element owns
//! exactly one node, and a hash index maps each element to its node, so
//! `contains`, `priority`, `decrease_priority` and `delete` take the element
//! itself. Node links are arena keys, which keeps restructuring free of
//! dangling references.

use crate::error::{HeapError, UnionError};
use crate::node::{Arena, Node, NodeKey};
use crate::order::{FnOrder, MinOrder, PriorityOrder};
use crate::rank::{
    checked_increment, fibonacci_lower_bound, rank_capacity_hint, saturating_decrement,
};
use crate::ring;
use crate::traits::Update;
use rustc_hash::FxHashMap;
use slotmap::SecondaryMap;
use smallvec::{smallvec, SmallVec};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;

/// Fibonacci Heap keyed by element
///
/// `O` decides which priority comes out first; the default [`MinOrder`]
/// yields the smallest priority.
///
/// # Example
///
/// ```rust
/// use keyed_fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert("a", 5).unwrap();
/// heap.insert("b", 3).unwrap();
/// heap.decrease_priority(&"a", 1).unwrap();
/// assert_eq!(heap.peek(), Some((&"a", &1)));
/// assert_eq!(heap.extract_minimum(), Some(("a", 1)));
/// ```
pub struct FibonacciHeap<E, P, O = MinOrder> {
    nodes: Arena<E, P>,
    index: FxHashMap<E, NodeKey>,
    min: Option<NodeKey>,
    order: O,
}

impl<E, P> FibonacciHeap<E, P, MinOrder> {
    /// Creates an empty min-heap
    pub fn new() -> Self {
        Self::with_order(MinOrder)
    }

    /// Creates an empty min-heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, MinOrder)
    }
}

impl<E, P, F> FibonacciHeap<E, P, FnOrder<F>>
where
    F: Fn(&P, &P) -> bool,
{
    /// Creates an empty heap ordered by a `less(a, b)` closure
    ///
    /// ```rust
    /// use keyed_fibonacci_heap::FibonacciHeap;
    ///
    /// let mut heap = FibonacciHeap::with_comparator(|a: &i32, b: &i32| a > b);
    /// heap.insert('x', 1).unwrap();
    /// heap.insert('y', 9).unwrap();
    /// assert_eq!(heap.minimum(), Some(&'y'));
    /// ```
    pub fn with_comparator(less: F) -> Self {
        Self::with_order(FnOrder::new(less))
    }
}

impl<E, P, O> FibonacciHeap<E, P, O> {
    /// Creates an empty heap using the given ordering strategy
    pub fn with_order(order: O) -> Self {
        Self {
            nodes: Arena::with_key(),
            index: FxHashMap::default(),
            min: None,
            order,
        }
    }

    /// Creates an empty heap with room for `capacity` elements
    pub fn with_capacity_and_order(capacity: usize, order: O) -> Self {
        Self {
            nodes: Arena::with_capacity_and_key(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            min: None,
            order,
        }
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the ordering strategy
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Returns the element that would be extracted next
    pub fn minimum(&self) -> Option<&E> {
        self.min.map(|min| &self.nodes[min].element)
    }

    /// Returns the priority of the element that would be extracted next
    pub fn minimum_priority(&self) -> Option<&P> {
        self.min.map(|min| &self.nodes[min].priority)
    }

    /// Returns the next element and its priority without removing them
    pub fn peek(&self) -> Option<(&E, &P)> {
        self.min.map(|min| {
            let node = &self.nodes[min];
            (&node.element, &node.priority)
        })
    }

    /// Iterates over all elements and priorities in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&E, &P)> + '_ {
        self.nodes
            .values()
            .map(|node| (&node.element, &node.priority))
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.min = None;
    }
}

impl<E, P, O> FibonacciHeap<E, P, O>
where
    E: Hash + Eq + Clone,
    O: PriorityOrder<P>,
{
    /// Inserts an element with the given priority
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateElement` if the element is already
    /// present. The heap is left unchanged.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, element: E, priority: P) -> Result<(), HeapError> {
        use std::collections::hash_map::Entry;

        let key = match self.index.entry(element) {
            Entry::Occupied(_) => return Err(HeapError::DuplicateElement),
            Entry::Vacant(slot) => {
                let key = Node::alloc(&mut self.nodes, slot.key().clone(), priority);
                slot.insert(key);
                key
            }
        };
        self.add_root(key);
        Ok(())
    }

    /// Returns true if the element is in the heap
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(element)
    }

    /// Returns the current priority of an element
    pub fn priority<Q>(&self, element: &Q) -> Option<&P>
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(element).map(|&key| &self.nodes[key].priority)
    }

    /// Removes and returns the element with the minimum priority
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_minimum(&mut self) -> Option<(E, P)> {
        let min = self.min?;

        // Children become roots
        if let Some(child) = self.nodes[min].child.take() {
            let mut current = child;
            loop {
                let node = &mut self.nodes[current];
                node.parent = None;
                node.marked = false;
                current = node.right;
                if current == child {
                    break;
                }
            }
            ring::splice(&mut self.nodes, min, child);
            self.nodes[min].rank = 0;
        }

        match ring::remove(&mut self.nodes, min) {
            None => self.min = None,
            Some(survivor) => {
                self.min = Some(survivor);
                self.consolidate(survivor);
            }
        }

        let node = self.nodes.remove(min)?;
        self.index.remove(&node.element);
        Some((node.element, node.priority))
    }

    /// Decreases the priority of an element
    ///
    /// # Errors
    /// - `HeapError::NoSuchElement` if the element is not in the heap
    /// - `HeapError::NotSmaller` if `priority` does not come strictly before
    ///   the current priority
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_priority<Q>(&mut self, element: &Q, priority: P) -> Result<(), HeapError>
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let key = *self.index.get(element).ok_or(HeapError::NoSuchElement)?;
        if !self.order.less(&priority, &self.nodes[key].priority) {
            return Err(HeapError::NotSmaller);
        }
        self.decrease_at(key, priority);
        Ok(())
    }

    /// Inserts a missing element, or decreases the priority of a present one
    ///
    /// A present element whose priority does not improve is left alone. This
    /// is the relaxation step of label-setting shortest path searches.
    pub fn insert_or_decrease(&mut self, element: E, priority: P) -> Update {
        match self.index.get(&element).copied() {
            None => {
                let key = Node::alloc(&mut self.nodes, element.clone(), priority);
                self.index.insert(element, key);
                self.add_root(key);
                Update::Inserted
            }
            Some(key) => {
                if self.order.less(&priority, &self.nodes[key].priority) {
                    self.decrease_at(key, priority);
                    Update::Decreased
                } else {
                    Update::Unchanged
                }
            }
        }
    }

    /// Removes an element regardless of its priority
    ///
    /// Returns the removed element and its priority, or `None` (doing
    /// nothing) if the element is not in the heap.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete<Q>(&mut self, element: &Q) -> Option<(E, P)>
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let key = *self.index.get(element)?;

        // Treat the node as smaller than everything: cut it free unconditionally
        if let Some(parent) = self.nodes[key].parent {
            self.cut(key, parent);
            self.cascading_cut(parent);
        }
        self.min = Some(key);
        self.extract_minimum()
    }

    /// Moves every element of `other` into this heap, leaving `other` empty
    ///
    /// Both heaps must share the same ordering. The root rings are joined in
    /// O(1); the nodes of the smaller heap are then moved into the larger
    /// heap's arena, so the whole operation is O(min(|self|, |other|)).
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateElement` if the heaps share an element.
    /// Neither heap is modified in that case.
    pub fn append(&mut self, other: &mut Self) -> Result<(), HeapError> {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            self.take_storage(other);
            return Ok(());
        }

        let (smaller, larger) = if self.len() < other.len() {
            (&*self, &*other)
        } else {
            (&*other, &*self)
        };
        if smaller.index.keys().any(|element| larger.index.contains_key(element)) {
            return Err(HeapError::DuplicateElement);
        }

        if self.len() < other.len() {
            mem::swap(&mut self.nodes, &mut other.nodes);
            mem::swap(&mut self.index, &mut other.index);
            mem::swap(&mut self.min, &mut other.min);
        }

        let (Some(self_min), Some(donor_min)) = (self.min, self.adopt(other)) else {
            return Ok(());
        };
        ring::splice(&mut self.nodes, self_min, donor_min);
        if self.less(donor_min, self_min) {
            self.min = Some(donor_min);
        }
        Ok(())
    }

    /// Unites two heaps, consuming both
    ///
    /// # Errors
    /// If the heaps share an element, both are returned unchanged inside the
    /// [`UnionError`].
    ///
    /// ```rust
    /// use keyed_fibonacci_heap::FibonacciHeap;
    ///
    /// let mut a = FibonacciHeap::new();
    /// a.insert(1, 10).unwrap();
    /// let mut b = FibonacciHeap::new();
    /// b.insert(2, 5).unwrap();
    ///
    /// let merged = a.union(b).unwrap();
    /// assert_eq!(merged.len(), 2);
    /// assert_eq!(merged.minimum(), Some(&2));
    /// ```
    pub fn union(mut self, mut other: Self) -> Result<Self, UnionError<Self>> {
        match self.append(&mut other) {
            Ok(()) => Ok(self),
            Err(reason) => Err(UnionError {
                reason,
                left: self,
                right: other,
            }),
        }
    }

    /// Drains the heap in extraction order
    pub fn into_sorted_vec(mut self) -> Vec<(E, P)> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(entry) = self.extract_minimum() {
            sorted.push(entry);
        }
        sorted
    }

    /// Checks every structural invariant of the heap
    ///
    /// Verifies heap order, ring symmetry, parent links, that each rank
    /// equals the number of children, the Fibonacci size bound on every
    /// subtree, that roots are unmarked, that the minimum is a minimal root,
    /// and that the index and the node arena agree.
    pub fn verify_structure(&self) -> bool {
        let Some(min) = self.min else {
            return self.nodes.is_empty() && self.index.is_empty();
        };
        if self.index.len() != self.nodes.len() {
            return false;
        }
        let indexed = self.index.iter().all(|(element, &key)| {
            self.nodes
                .get(key)
                .is_some_and(|node| node.element == *element)
        });
        if !indexed || !self.nodes.contains_key(min) || !self.nodes[min].is_root() {
            return false;
        }

        let mut total = 0;
        for root in ring::iter(&self.nodes, min) {
            let node = &self.nodes[root];
            if !node.is_root() || node.marked || self.less(root, min) {
                return false;
            }
            match self.verify_subtree(root) {
                Some(size) => total += size,
                None => return false,
            }
        }
        total == self.nodes.len()
    }

    /// Returns the subtree size, or `None` if any invariant fails below `key`.
    fn verify_subtree(&self, key: NodeKey) -> Option<usize> {
        let node = &self.nodes[key];
        if self.nodes[node.right].left != key || self.nodes[node.left].right != key {
            return None;
        }

        let mut size = 1;
        let mut children = 0usize;
        if let Some(child) = node.child {
            for member in ring::iter(&self.nodes, child) {
                if self.nodes[member].parent != Some(key) || self.less(member, key) {
                    return None;
                }
                children += 1;
                size += self.verify_subtree(member)?;
            }
        }

        let bound_holds = size >= fibonacci_lower_bound(node.rank);
        (children == node.rank as usize && bound_holds).then_some(size)
    }

    #[inline]
    fn less(&self, a: NodeKey, b: NodeKey) -> bool {
        self.order
            .less(&self.nodes[a].priority, &self.nodes[b].priority)
    }

    /// Adds a lone parentless node to the root ring.
    fn add_root(&mut self, key: NodeKey) {
        match self.min {
            None => self.min = Some(key),
            Some(min) => {
                ring::splice(&mut self.nodes, min, key);
                if self.less(key, min) {
                    self.min = Some(key);
                }
            }
        }
    }

    fn decrease_at(&mut self, key: NodeKey, priority: P) {
        self.nodes[key].priority = priority;

        if let Some(parent) = self.nodes[key].parent {
            if self.less(key, parent) {
                self.cut(key, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if self.less(key, min) {
                self.min = Some(key);
            }
        }
    }

    /// Links trees of equal rank until every root rank is distinct, then
    /// selects the new minimum among the surviving roots.
    fn consolidate(&mut self, start: NodeKey) {
        let roots = ring::members(&self.nodes, start);
        let mut by_rank: SmallVec<[Option<NodeKey>; 32]> =
            smallvec![None; rank_capacity_hint(self.nodes.len())];

        for &root in &roots {
            let mut x = root;
            let mut rank = self.nodes[x].rank as usize;
            loop {
                if rank >= by_rank.len() {
                    by_rank.resize(rank + 1, None);
                }
                let Some(mut y) = by_rank[rank].take() else {
                    by_rank[rank] = Some(x);
                    break;
                };
                if self.less(y, x) {
                    mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                rank += 1;
            }
        }

        // Linking unlinks the losers, so the table now holds the whole root ring
        self.min = None;
        let mut survivors = 0usize;
        for root in by_rank.into_iter().flatten() {
            survivors += 1;
            if self.min.map_or(true, |min| self.less(root, min)) {
                self.min = Some(root);
            }
        }

        tracing::trace!(
            roots_before = roots.len(),
            roots_after = survivors,
            "consolidated root ring"
        );
    }

    /// Makes root `y` a child of root `x`.
    fn link(&mut self, y: NodeKey, x: NodeKey) {
        ring::remove(&mut self.nodes, y);
        let node = &mut self.nodes[y];
        node.parent = Some(x);
        node.marked = false;

        match self.nodes[x].child {
            Some(child) => ring::splice(&mut self.nodes, child, y),
            None => self.nodes[x].child = Some(y),
        }
        let parent = &mut self.nodes[x];
        parent.rank = checked_increment(parent.rank);
    }

    /// Detaches `x` from its parent `y` and makes it a root.
    fn cut(&mut self, x: NodeKey, y: NodeKey) {
        let sibling = ring::remove(&mut self.nodes, x);
        let parent = &mut self.nodes[y];
        if parent.child == Some(x) {
            parent.child = sibling;
        }
        parent.rank = saturating_decrement(parent.rank);

        let node = &mut self.nodes[x];
        node.parent = None;
        node.marked = false;

        match self.min {
            Some(min) => ring::splice(&mut self.nodes, min, x),
            None => self.min = Some(x),
        }
    }

    /// Marks `y`, or cuts it too if it already lost a child, walking upwards.
    fn cascading_cut(&mut self, mut y: NodeKey) {
        let mut cuts = 0usize;
        while let Some(parent) = self.nodes[y].parent {
            if !self.nodes[y].marked {
                self.nodes[y].marked = true;
                break;
            }
            self.cut(y, parent);
            cuts += 1;
            y = parent;
        }

        if cuts > 0 {
            tracing::trace!(cuts, "cascading cut");
        }
    }

    /// Moves `other`'s storage into this empty heap.
    fn take_storage(&mut self, other: &mut Self) {
        self.nodes = mem::take(&mut other.nodes);
        self.index = mem::take(&mut other.index);
        self.min = other.min.take();
    }

    /// Moves every node of `donor` into this heap's arena, rewriting links.
    ///
    /// The donor's trees are not joined to the root ring. Returns the new
    /// key of the donor's minimum root.
    fn adopt(&mut self, donor: &mut Self) -> Option<NodeKey> {
        let donor_min = donor.min.take()?;
        let mut remap: SecondaryMap<NodeKey, NodeKey> =
            SecondaryMap::with_capacity(donor.nodes.len());

        for (old, node) in donor.nodes.drain() {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
        }
        for &new in remap.values() {
            let node = &mut self.nodes[new];
            node.left = remap[node.left];
            node.right = remap[node.right];
            node.parent = node.parent.map(|parent| remap[parent]);
            node.child = node.child.map(|child| remap[child]);
        }
        for (element, old) in donor.index.drain() {
            self.index.insert(element, remap[old]);
        }

        tracing::trace!(moved = remap.len(), "moved donor nodes into receiver arena");
        Some(remap[donor_min])
    }
}

impl<E, P> Default for FibonacciHeap<E, P, MinOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P, O> Extend<(E, P)> for FibonacciHeap<E, P, O>
where
    E: Hash + Eq + Clone,
    O: PriorityOrder<P>,
{
    /// Inserts every pair; an element already present keeps its priority.
    fn extend<I: IntoIterator<Item = (E, P)>>(&mut self, iter: I) {
        for (element, priority) in iter {
            if self.contains(&element) {
                continue;
            }
            let inserted = self.insert(element, priority);
            debug_assert!(inserted.is_ok());
        }
    }
}

impl<E, P> FromIterator<(E, P)> for FibonacciHeap<E, P, MinOrder>
where
    E: Hash + Eq + Clone,
    P: Ord,
{
    fn from_iter<I: IntoIterator<Item = (E, P)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<E: fmt::Debug, P: fmt::Debug, O> fmt::Debug for FibonacciHeap<E, P, O> {
    /// Renders every tree as `([element, priority]: children...)`, roots
    /// starting from the minimum.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FibonacciHeap<count: {}, contents:", self.len())?;
        match self.min {
            None => f.write_str(" nil")?,
            Some(min) => {
                for root in ring::iter(&self.nodes, min) {
                    f.write_str(" ")?;
                    self.fmt_tree(f, root)?;
                }
            }
        }
        f.write_str(">")
    }
}

impl<E: fmt::Debug, P: fmt::Debug, O> FibonacciHeap<E, P, O> {
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, key: NodeKey) -> fmt::Result {
        let node = &self.nodes[key];
        write!(f, "([{:?}, {:?}]", node.element, node.priority)?;
        if let Some(child) = node.child {
            f.write_str(":")?;
            for member in ring::iter(&self.nodes, child) {
                f.write_str(" ")?;
                self.fmt_tree(f, member)?;
            }
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::MaxOrder;
    use tracing_test::traced_test;

    fn drain<E, P, O>(heap: &mut FibonacciHeap<E, P, O>) -> Vec<(E, P)>
    where
        E: Hash + Eq + Clone,
        O: PriorityOrder<P>,
    {
        let mut out = Vec::new();
        while let Some(entry) = heap.extract_minimum() {
            assert!(heap.verify_structure());
            out.push(entry);
        }
        out
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert("a", 5).unwrap();
        heap.insert("b", 3).unwrap();
        heap.insert("c", 7).unwrap();

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Some((&"b", &3)));
        assert_eq!(heap.minimum(), Some(&"b"));
        assert_eq!(heap.minimum_priority(), Some(&3));

        assert_eq!(heap.extract_minimum(), Some(("b", 3)));
        assert_eq!(heap.peek(), Some((&"a", &5)));
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_empty_heap() {
        let mut heap: FibonacciHeap<u32, u32> = FibonacciHeap::new();
        assert_eq!(heap.minimum(), None);
        assert_eq!(heap.minimum_priority(), None);
        assert_eq!(heap.extract_minimum(), None);
        assert_eq!(heap.delete(&3), None);
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut heap = FibonacciHeap::new();
        heap.insert("a", 5).unwrap();
        assert_eq!(heap.insert("a", 1), Err(HeapError::DuplicateElement));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.priority("a"), Some(&5));
    }

    #[test]
    fn test_decrease_priority() {
        let mut heap = FibonacciHeap::new();
        heap.insert("a", 10).unwrap();
        heap.insert("b", 20).unwrap();
        heap.insert("c", 30).unwrap();

        heap.decrease_priority("b", 5).unwrap();
        assert_eq!(heap.peek(), Some((&"b", &5)));

        heap.decrease_priority("c", 1).unwrap();
        assert_eq!(heap.peek(), Some((&"c", &1)));
    }

    #[test]
    fn test_decrease_priority_errors() {
        let mut heap = FibonacciHeap::new();
        heap.insert("a", 10).unwrap();

        assert_eq!(heap.decrease_priority("z", 1), Err(HeapError::NoSuchElement));
        assert_eq!(heap.decrease_priority("a", 10), Err(HeapError::NotSmaller));
        assert_eq!(heap.decrease_priority("a", 11), Err(HeapError::NotSmaller));
        assert_eq!(heap.priority("a"), Some(&10));
    }

    #[test]
    fn test_decrease_inside_tree_cuts_and_marks() {
        let mut heap = FibonacciHeap::new();
        for i in 0..9 {
            heap.insert(i, i * 10).unwrap();
        }
        // One extraction consolidates the eight survivors into one tree of rank 3
        assert_eq!(heap.extract_minimum(), Some((0, 0)));
        assert!(heap.verify_structure());
        let roots = ring::iter(&heap.nodes, heap.min.unwrap()).count();
        assert_eq!(roots, 1);

        // Pick a grandchild of the root and cut it out
        let leaf = heap
            .nodes
            .values()
            .find(|n| n.parent.is_some_and(|p| heap.nodes[p].parent.is_some()))
            .map(|n| n.element)
            .unwrap();
        heap.decrease_priority(&leaf, -1).unwrap();
        assert_eq!(heap.minimum(), Some(&leaf));
        assert!(heap.verify_structure());

        let marked = heap.nodes.values().filter(|n| n.marked).count();
        assert_eq!(marked, 1);
    }

    #[test]
    fn test_cascading_cut() {
        let mut heap = FibonacciHeap::new();
        for i in 0..17 {
            heap.insert(i, i).unwrap();
        }
        heap.extract_minimum();
        // 16 nodes form a single binomial tree of rank 4; cutting out two
        // children of the same non-root parent cascades.
        let deep = heap
            .nodes
            .values()
            .find(|n| n.rank >= 2 && n.parent.is_some())
            .map(|n| n.element)
            .unwrap();
        let key = heap.index[&deep];
        let children: Vec<i32> = ring::iter(&heap.nodes, heap.nodes[key].child.unwrap())
            .map(|k| heap.nodes[k].element)
            .collect();

        heap.decrease_priority(&children[0], -10).unwrap();
        assert!(heap.nodes[heap.index[&deep]].marked);
        heap.decrease_priority(&children[1], -20).unwrap();
        assert!(heap.nodes[heap.index[&deep]].is_root());
        assert!(!heap.nodes[heap.index[&deep]].marked);
        assert!(heap.verify_structure());

        let sorted: Vec<i32> = drain(&mut heap).into_iter().map(|(_, p)| p).collect();
        let mut expected = sorted.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_delete() {
        let mut heap = FibonacciHeap::new();
        for i in 0..10 {
            heap.insert(i, i).unwrap();
        }
        heap.extract_minimum();

        assert_eq!(heap.delete(&5), Some((5, 5)));
        assert_eq!(heap.delete(&5), None);
        assert!(!heap.contains(&5));
        assert_eq!(heap.len(), 8);
        assert!(heap.verify_structure());

        let order: Vec<i32> = drain(&mut heap).into_iter().map(|(e, _)| e).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn test_delete_minimum_and_last() {
        let mut heap = FibonacciHeap::new();
        heap.insert('x', 1).unwrap();
        heap.insert('y', 2).unwrap();
        assert_eq!(heap.delete(&'x'), Some(('x', 1)));
        assert_eq!(heap.minimum(), Some(&'y'));
        assert_eq!(heap.delete(&'y'), Some(('y', 2)));
        assert!(heap.is_empty());
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_append() {
        let mut heap1 = FibonacciHeap::new();
        heap1.insert("a", 5).unwrap();
        heap1.insert("b", 10).unwrap();

        let mut heap2 = FibonacciHeap::new();
        heap2.insert("c", 3).unwrap();
        heap2.insert("d", 7).unwrap();
        heap2.insert("e", 1).unwrap();

        heap1.append(&mut heap2).unwrap();
        assert_eq!(heap1.peek(), Some((&"e", &1)));
        assert_eq!(heap1.len(), 5);
        assert!(heap2.is_empty());
        assert_eq!(heap2.len(), 0);
        assert!(heap1.verify_structure());
        assert!(heap2.verify_structure());

        // Donor remains usable
        heap2.insert("a", 0).unwrap();
        assert_eq!(heap2.minimum(), Some(&"a"));
    }

    #[test]
    fn test_append_after_restructuring_keeps_links() {
        let mut heap1 = FibonacciHeap::new();
        let mut heap2 = FibonacciHeap::new();
        for i in 0..20 {
            heap1.insert(i, i).unwrap();
        }
        for i in 100..140 {
            heap2.insert(i, i - 150).unwrap();
        }
        heap1.extract_minimum();
        heap2.extract_minimum();
        heap2.decrease_priority(&120, -1000).unwrap();

        heap1.append(&mut heap2).unwrap();
        assert!(heap1.verify_structure());
        assert_eq!(heap1.len(), 19 + 39);
        assert_eq!(heap1.extract_minimum(), Some((120, -1000)));
        assert_eq!(heap1.extract_minimum(), Some((101, -49)));
    }

    #[test]
    fn test_append_rejects_shared_elements() {
        let mut heap1 = FibonacciHeap::new();
        heap1.insert("a", 5).unwrap();
        let mut heap2 = FibonacciHeap::new();
        heap2.insert("a", 1).unwrap();
        heap2.insert("b", 2).unwrap();

        assert_eq!(heap1.append(&mut heap2), Err(HeapError::DuplicateElement));
        assert_eq!(heap1.len(), 1);
        assert_eq!(heap2.len(), 2);
    }

    #[test]
    fn test_union_error_returns_operands() {
        let mut heap1 = FibonacciHeap::new();
        heap1.insert(1, 1).unwrap();
        let mut heap2 = FibonacciHeap::new();
        heap2.insert(1, 2).unwrap();

        let err = heap1.union(heap2).unwrap_err();
        assert_eq!(err.reason, HeapError::DuplicateElement);
        let (left, right) = err.into_parts();
        assert_eq!(left.priority(&1), Some(&1));
        assert_eq!(right.priority(&1), Some(&2));
    }

    #[test]
    fn test_insert_or_decrease() {
        let mut heap = FibonacciHeap::new();
        assert_eq!(heap.insert_or_decrease("a", 5), Update::Inserted);
        assert_eq!(heap.insert_or_decrease("a", 7), Update::Unchanged);
        assert_eq!(heap.insert_or_decrease("a", 5), Update::Unchanged);
        assert_eq!(heap.insert_or_decrease("a", 2), Update::Decreased);
        assert_eq!(heap.priority("a"), Some(&2));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_max_order() {
        let mut heap = FibonacciHeap::with_order(MaxOrder);
        for i in [3, 9, 1, 7] {
            heap.insert(i, i).unwrap();
        }
        heap.decrease_priority(&1, 20).unwrap();
        assert_eq!(heap.decrease_priority(&9, 2), Err(HeapError::NotSmaller));

        let order: Vec<i32> = drain(&mut heap).into_iter().map(|(_, p)| p).collect();
        assert_eq!(order, vec![20, 9, 7, 3]);
    }

    #[test]
    fn test_comparator_by_length() {
        let mut heap = FibonacciHeap::with_comparator(|a: &String, b: &String| a.len() < b.len());
        heap.insert(1, "ccc".to_string()).unwrap();
        heap.insert(2, "a".to_string()).unwrap();
        heap.insert(3, "bb".to_string()).unwrap();
        assert_eq!(heap.minimum(), Some(&2));
    }

    #[test]
    fn test_debug_rendering() {
        let mut heap = FibonacciHeap::new();
        assert_eq!(format!("{heap:?}"), "FibonacciHeap<count: 0, contents: nil>");

        heap.insert('a', 1).unwrap();
        heap.insert('b', 2).unwrap();
        heap.insert('c', 3).unwrap();
        assert_eq!(
            format!("{heap:?}"),
            "FibonacciHeap<count: 3, contents: (['a', 1]) (['c', 3]) (['b', 2])>"
        );

        heap.insert('d', 0).unwrap();
        heap.extract_minimum();
        assert_eq!(
            format!("{heap:?}"),
            "FibonacciHeap<count: 3, contents: (['a', 1]) (['b', 2]: (['c', 3]))>"
        );
    }

    #[test]
    fn test_iter_extend_and_collect() {
        let mut heap: FibonacciHeap<&str, i32> = [("x", 3), ("y", 1)].into_iter().collect();
        heap.extend([("z", 2), ("x", 0)]);
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.priority("x"), Some(&3));

        let mut seen: Vec<(&str, i32)> = heap.iter().map(|(e, p)| (*e, *p)).collect();
        seen.sort();
        assert_eq!(seen, vec![("x", 3), ("y", 1), ("z", 2)]);

        assert_eq!(heap.into_sorted_vec(), vec![("y", 1), ("z", 2), ("x", 3)]);
    }

    #[test]
    fn test_clear() {
        let mut heap = FibonacciHeap::with_capacity(8);
        for i in 0..8 {
            heap.insert(i, i).unwrap();
        }
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.contains(&3));
        assert!(heap.verify_structure());
        heap.insert(3, 3).unwrap();
        assert_eq!(heap.len(), 1);
    }

    #[test]
    #[traced_test]
    fn test_restructuring_is_traced() {
        let mut heap = FibonacciHeap::new();
        for i in 0..16 {
            heap.insert(i, i).unwrap();
        }
        heap.extract_minimum();
        assert!(logs_contain("consolidated root ring"));
        assert!(logs_contain("roots_before=15"));
        assert!(logs_contain("roots_after=4"));

        let mut other = FibonacciHeap::new();
        other.insert(100, 100).unwrap();
        heap.append(&mut other).unwrap();
        assert!(logs_contain("moved=1"));
    }

    #[test]
    fn test_extend_keeps_first_occurrence() {
        let mut heap: FibonacciHeap<&str, i32> =
            [("a", 5), ("b", 3), ("a", 1)].into_iter().collect();
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.priority("a"), Some(&5));

        heap.extend([("b", 0), ("c", 4), ("c", 2)]);
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.priority("b"), Some(&3));
        assert_eq!(heap.priority("c"), Some(&4));
        assert!(heap.verify_structure());
        assert_eq!(heap.into_sorted_vec(), vec![("b", 3), ("c", 4), ("a", 5)]);
    }
}
