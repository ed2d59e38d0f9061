//! Rank (degree) type for Fibonacci heap nodes.
//!
//! The rank of a node is the number of children it holds. Cascading cuts keep
//! every node of rank `d` at the root of a subtree with at least `F(d + 2)`
//! nodes, where `F` is the Fibonacci sequence. Because `F(d + 2)` grows like
//! `φ^d`, the rank never exceeds `log_φ(n)`, which is under 100 even for
//! `n = 2^64`. A `u8` is therefore plenty, and keeps the node compact.

/// Type alias for node rank/degree.
pub type Rank = u8;

/// Maximum representable rank.
pub const MAX_RANK: Rank = u8::MAX;

/// Increment a rank, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`. Reaching it would require a heap with more
/// than `F(257)` live nodes, so a panic here means the structure is corrupt.
///
/// # Example
///
/// ```rust
/// use keyed_fibonacci_heap::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1)
        .expect("rank overflow: a Fibonacci heap node can never reach 255 children")
}

/// Decrement a rank, saturating at zero.
///
/// ```rust
/// use keyed_fibonacci_heap::rank::saturating_decrement;
///
/// assert_eq!(saturating_decrement(5), 4);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(rank: Rank) -> Rank {
    rank.saturating_sub(1)
}

/// Minimum subtree size of a node with the given rank: `F(rank + 2)`.
///
/// Saturates at `usize::MAX` for ranks whose bound does not fit.
///
/// ```rust
/// use keyed_fibonacci_heap::rank::fibonacci_lower_bound;
///
/// assert_eq!(fibonacci_lower_bound(0), 1);
/// assert_eq!(fibonacci_lower_bound(1), 2);
/// assert_eq!(fibonacci_lower_bound(4), 8);
/// ```
pub fn fibonacci_lower_bound(rank: Rank) -> usize {
    // (F(k), F(k + 1)) starting at k = 0
    let (mut a, mut b) = (0usize, 1usize);
    for _ in 0..(rank as usize + 2) {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    a
}

/// Size of the rank table needed to consolidate `len` nodes.
///
/// This is only a capacity hint: the consolidation table still grows on
/// demand, since ranks are not tied to the live count after deletions.
pub(crate) fn rank_capacity_hint(len: usize) -> usize {
    // (fibonacci_lower_bound(rank + 1), fibonacci_lower_bound(rank + 2))
    let (mut bound, mut next) = (2usize, 3usize);
    let mut rank = 0usize;
    while bound <= len && bound != usize::MAX && rank < MAX_RANK as usize {
        rank += 1;
        (bound, next) = (next, bound.saturating_add(next));
    }
    rank + 1
}
