//! Priority ordering strategies
//!
//! A heap is parameterised by a [`PriorityOrder`] instead of requiring
//! `P: Ord`, so the same structure serves as a min-heap, a max-heap, or a heap
//! over priorities ordered by any caller-supplied relation.
//!
//! The relation must be a strict weak ordering: irreflexive, asymmetric and
//! transitive. Heap behaviour is unspecified otherwise, but never unsafe.

use std::fmt;

/// A strict "comes before" relation over priorities.
pub trait PriorityOrder<P> {
    /// Returns true if `a` must be extracted strictly before `b`.
    fn less(&self, a: &P, b: &P) -> bool;
}

/// Smallest priority first, using `Ord`. The default strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinOrder;

impl<P: Ord> PriorityOrder<P> for MinOrder {
    #[inline]
    fn less(&self, a: &P, b: &P) -> bool {
        a < b
    }
}

/// Largest priority first, using `Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxOrder;

impl<P: Ord> PriorityOrder<P> for MaxOrder {
    #[inline]
    fn less(&self, a: &P, b: &P) -> bool {
        a > b
    }
}

/// Adapts a comparator closure into a [`PriorityOrder`].
///
/// ```rust
/// use keyed_fibonacci_heap::order::{FnOrder, PriorityOrder};
///
/// let by_len = FnOrder::new(|a: &&str, b: &&str| a.len() < b.len());
/// assert!(by_len.less(&"ab", &"abc"));
/// assert!(!by_len.less(&"abc", &"xyz"));
/// ```
#[derive(Clone, Copy)]
pub struct FnOrder<F>(F);

impl<F> FnOrder<F> {
    /// Wraps a `less(a, b)` closure.
    pub fn new(less: F) -> Self {
        FnOrder(less)
    }
}

impl<P, F> PriorityOrder<P> for FnOrder<F>
where
    F: Fn(&P, &P) -> bool,
{
    #[inline]
    fn less(&self, a: &P, b: &P) -> bool {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for FnOrder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnOrder")
    }
}
