//! Keyed Fibonacci Heap for Rust
//!
//! This crate provides a mergeable priority queue in which every entry is a
//! unique *element* paired with a *priority*. Elements are addressed by value:
//! the heap keeps an index from element to node, so `contains`, `priority`,
//! `decrease_priority` and `delete` take the element itself rather than a
//! handle.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) insert, minimum and amortized decrease-priority;
//!   O(log n) amortized extract-minimum and delete
//! - **Pluggable ordering**: min-heap, max-heap or any comparator via
//!   [`PriorityOrder`]
//! - **Merging**: [`FibonacciHeap::append`] and [`FibonacciHeap::union`] move
//!   the smaller heap into the larger one, rejecting shared elements
//! - **Pathfinding**: Dijkstra and A* over implicit graphs, and single-source
//!   shortest paths over a [`graph::WeightedDigraph`]
//!
//! # Example
//!
//! ```rust
//! use keyed_fibonacci_heap::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! heap.insert("a", 5).unwrap();
//! heap.insert("b", 3).unwrap();
//! heap.decrease_priority(&"a", 1).unwrap();
//! assert_eq!(heap.peek(), Some((&"a", &1)));
//! assert_eq!(heap.extract_minimum(), Some(("a", 1)));
//! assert_eq!(heap.extract_minimum(), Some(("b", 3)));
//! assert!(heap.is_empty());
//! ```

pub mod error;
pub mod fibonacci;
pub mod graph;
mod node;
pub mod order;
pub mod pathfinding;
pub mod rank;
mod ring;
pub mod traits;

pub use error::{HeapError, UnionError};
pub use fibonacci::FibonacciHeap;
pub use order::{FnOrder, MaxOrder, MinOrder, PriorityOrder};
pub use traits::{KeyedHeap, Update};
