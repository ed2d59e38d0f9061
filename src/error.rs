//! Error types for keyed heap operations.

use std::fmt;

/// Error type for heap operations
///
/// Every variant is a caller precondition violation. The heap is left
/// exactly as it was before the failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    /// The element is already stored in the heap
    #[error("element is already present in the heap")]
    DuplicateElement,
    /// The element is not stored in the heap
    #[error("element is not present in the heap")]
    NoSuchElement,
    /// The new priority does not compare strictly less than the current one
    #[error("new priority is not smaller than the current priority")]
    NotSmaller,
}

/// Returned by a consuming union that could not merge its operands.
///
/// Both heaps are handed back untouched so no element is lost.
#[derive(thiserror::Error)]
#[error("cannot union heaps: {reason}")]
pub struct UnionError<H> {
    /// Why the union was rejected
    pub reason: HeapError,
    /// The receiver of the union
    pub left: H,
    /// The argument of the union
    pub right: H,
}

impl<H> UnionError<H> {
    /// Returns both operands, left first.
    pub fn into_parts(self) -> (H, H) {
        (self.left, self.right)
    }
}

impl<H> fmt::Debug for UnionError<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionError")
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}
