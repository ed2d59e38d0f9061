//! Common traits for element-keyed priority queues
//!
//! [`KeyedHeap`] is the operation set consumed by the pathfinding algorithms.
//! [`FibonacciHeap`] is the implementation shipped here; callers can supply
//! their own queue (a pairing heap, or a flat vector for tiny graphs) and pass
//! it to [`dijkstra`](crate::pathfinding::dijkstra) or
//! [`astar`](crate::pathfinding::astar) as the `H` type parameter.
//! Unlike handle-based heaps, elements are addressed by value: the queue keeps
//! its own index from element to position, so callers never hold references
//! into the structure.

use crate::error::HeapError;
use crate::fibonacci::FibonacciHeap;
use crate::order::PriorityOrder;
use std::hash::Hash;

/// Outcome of [`KeyedHeap::insert_or_decrease`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// The element was not present and has been inserted
    Inserted,
    /// The element was present and its priority improved
    Decreased,
    /// The element was present and the offered priority was no better
    Unchanged,
}

/// Priority queue whose entries are addressed by a unique element
///
/// Implement this to run the searches in [`crate::pathfinding`] on a queue
/// other than [`FibonacciHeap`]. The searches drive it through
/// `insert_or_decrease` and `extract_minimum`.
///
/// # Example
///
/// ```rust
/// use keyed_fibonacci_heap::{FibonacciHeap, KeyedHeap, Update};
///
/// fn relax<H: KeyedHeap<u32, u64>>(heap: &mut H, vertex: u32, distance: u64) -> bool {
///     heap.insert_or_decrease(vertex, distance) != Update::Unchanged
/// }
///
/// let mut heap: FibonacciHeap<u32, u64> = KeyedHeap::new();
/// assert!(relax(&mut heap, 7, 10));
/// assert!(!relax(&mut heap, 7, 12));
/// assert_eq!(heap.extract_minimum(), Some((7, 10)));
/// ```
pub trait KeyedHeap<E, P> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateElement` if the element is present.
    fn insert(&mut self, element: E, priority: P) -> Result<(), HeapError>;

    /// Returns the next element and its priority without removing them
    fn peek(&self) -> Option<(&E, &P)>;

    /// Removes and returns the next element and its priority
    fn extract_minimum(&mut self) -> Option<(E, P)>;

    /// Returns true if the element is in the heap
    fn contains(&self, element: &E) -> bool;

    /// Returns the current priority of an element
    fn priority(&self, element: &E) -> Option<&P>;

    /// Lowers the priority of an element that is already present
    ///
    /// # Errors
    /// `HeapError::NoSuchElement` for a missing element,
    /// `HeapError::NotSmaller` if the priority would not improve.
    fn decrease_priority(&mut self, element: &E, priority: P) -> Result<(), HeapError>;

    /// Inserts the element, or lowers its priority if that improves it
    fn insert_or_decrease(&mut self, element: E, priority: P) -> Update;

    /// Removes an element, returning it with its priority if it was present
    fn delete(&mut self, element: &E) -> Option<(E, P)>;

    /// Moves every element of `other` into this heap, leaving it empty
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateElement` if the heaps share an element.
    fn append(&mut self, other: &mut Self) -> Result<(), HeapError>;
}

impl<E, P, O> KeyedHeap<E, P> for FibonacciHeap<E, P, O>
where
    E: Hash + Eq + Clone,
    O: PriorityOrder<P> + Default,
{
    fn new() -> Self {
        FibonacciHeap::with_order(O::default())
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn insert(&mut self, element: E, priority: P) -> Result<(), HeapError> {
        FibonacciHeap::insert(self, element, priority)
    }

    fn peek(&self) -> Option<(&E, &P)> {
        FibonacciHeap::peek(self)
    }

    fn extract_minimum(&mut self) -> Option<(E, P)> {
        FibonacciHeap::extract_minimum(self)
    }

    fn contains(&self, element: &E) -> bool {
        FibonacciHeap::contains(self, element)
    }

    fn priority(&self, element: &E) -> Option<&P> {
        FibonacciHeap::priority(self, element)
    }

    fn decrease_priority(&mut self, element: &E, priority: P) -> Result<(), HeapError> {
        FibonacciHeap::decrease_priority(self, element, priority)
    }

    fn insert_or_decrease(&mut self, element: E, priority: P) -> Update {
        FibonacciHeap::insert_or_decrease(self, element, priority)
    }

    fn delete(&mut self, element: &E) -> Option<(E, P)> {
        FibonacciHeap::delete(self, element)
    }

    fn append(&mut self, other: &mut Self) -> Result<(), HeapError> {
        FibonacciHeap::append(self, other)
    }
}
