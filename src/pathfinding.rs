//! Dijkstra's and A* pathfinding over implicit graphs
//!
//! The search drives any [`KeyedHeap`] through `insert_or_decrease`: a
//! vertex enters the open set the first time it is discovered and has its
//! priority lowered whenever a cheaper route to it is found. Because the heap
//! is keyed by vertex, every vertex sits in the open set at most once and no
//! stale entries are ever popped.
//!
//! For performance, only lightweight indices are stored in the heap rather
//! than full node data. A fast hash map (using FxHash) maps node states to
//! their indices.
//!
//! Dijkstra is A* with a zero heuristic. The node type carries its own goal
//! context and implements `is_goal()` to determine when the search stops.
//!
//! # Example
//!
//! ```rust
//! use keyed_fibonacci_heap::pathfinding::{SearchNode, dijkstra};
//! use keyed_fibonacci_heap::FibonacciHeap;
//!
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, ..self.clone() }, 1),
//!             (GridPos { x: self.x - 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y + 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y - 1, ..self.clone() }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//! let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&start).unwrap();
//! assert_eq!(cost, 4);
//! assert_eq!(path.len(), 5);
//! ```

use crate::traits::KeyedHeap;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// Costs must be totally ordered and copyable, with `Default` as zero.
/// Implemented for the primitive integer types.
pub trait Cost: Ord + Copy + Default {
    /// Sum of two costs, or `None` if it is not representable.
    fn checked_add(self, other: Self) -> Option<Self>;

    /// Sum of two costs, clamped to the largest representable cost.
    fn saturating_add(self, other: Self) -> Self;
}

macro_rules! integer_cost {
    ($($t:ty),* $(,)?) => {
        $(
            impl Cost for $t {
                #[inline]
                fn checked_add(self, other: Self) -> Option<Self> {
                    <$t>::checked_add(self, other)
                }

                #[inline]
                fn saturating_add(self, other: Self) -> Self {
                    <$t>::saturating_add(self, other)
                }
            }
        )*
    };
}

integer_cost!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate successors and to decide
/// whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Trait for nodes that can provide a heuristic estimate for A* search.
pub trait AStarNode: SearchNode {
    /// Estimated cost from this node to the nearest goal.
    ///
    /// Must never overestimate for A* to return optimal paths.
    fn heuristic(&self) -> Self::Cost;
}

/// Open-set priority, ordered by f-score only.
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// g + h (h = 0 for Dijkstra), saturating
    pub f_score: C,
    /// Cost from the start
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

/// Index of a discovered node; this is the element stored in the heap.
pub type NodeIndex = usize;

struct NodeEntry<N: SearchNode> {
    node: N,
    g_score: N::Cost,
    came_from: Option<NodeIndex>,
    closed: bool,
}

/// Bookkeeping for discovered nodes: states, best costs and back links.
struct PathFinder<N: SearchNode> {
    entries: Vec<NodeEntry<N>>,
    state_to_index: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode> PathFinder<N> {
    fn new() -> Self {
        PathFinder {
            entries: Vec::new(),
            state_to_index: FxHashMap::default(),
        }
    }

    /// Gets or creates an index for a node state.
    fn get_or_create_index(&mut self, node: N, g_score: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.state_to_index.get(&node) {
            return (index, false);
        }
        let index = self.entries.len();
        self.state_to_index.insert(node.clone(), index);
        self.entries.push(NodeEntry {
            node,
            g_score,
            came_from: None,
            closed: false,
        });
        (index, true)
    }

    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = Vec::new();
        loop {
            let entry = &self.entries[current];
            path.push(entry.node.clone());
            match entry.came_from {
                Some(prev) => current = prev,
                None => break,
            }
        }
        path.reverse();
        path
    }
}

/// Runs Dijkstra's algorithm from `start` until `is_goal()` returns true.
///
/// Returns the path (start and goal inclusive) and its cost, or `None` if no
/// goal is reachable.
pub fn dijkstra<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: KeyedHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    PathFinderBuilder::new(start.clone()).dijkstra::<H>()
}

/// Runs A* search from `start`, guided by the node's `heuristic()`.
pub fn astar<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: AStarNode,
    H: KeyedHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    PathFinderBuilder::new(start.clone()).astar::<H>()
}

/// Builder for pathfinding queries with search limits.
///
/// ```rust
/// use keyed_fibonacci_heap::pathfinding::{PathFinderBuilder, SearchNode};
/// use keyed_fibonacci_heap::FibonacciHeap;
///
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Line(u32);
///
/// impl SearchNode for Line {
///     type Cost = u32;
///     fn successors(&self) -> Vec<(Self, u32)> { vec![(Line(self.0 + 1), 1)] }
///     fn is_goal(&self) -> bool { self.0 == 50 }
/// }
///
/// let capped = PathFinderBuilder::new(Line(0)).max_cost(10);
/// assert!(capped.dijkstra::<FibonacciHeap<_, _>>().is_none());
/// ```
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    max_cost: Option<N::Cost>,
    max_nodes: Option<usize>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            max_cost: None,
            max_nodes: None,
        }
    }

    /// Never expands paths whose cost exceeds `cost`.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.max_cost = Some(cost);
        self
    }

    /// Gives up after expanding `count` nodes.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured limits.
    pub fn dijkstra<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        H: KeyedHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        self.search::<H>(|_| N::Cost::default())
    }

    /// Runs A* search with the configured limits.
    pub fn astar<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
        H: KeyedHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        self.search::<H>(|n| n.heuristic())
    }

    fn search<H>(self, heuristic: impl Fn(&N) -> N::Cost) -> Option<(Vec<N>, N::Cost)>
    where
        H: KeyedHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        let mut heap = H::new();
        let mut finder = PathFinder::new();
        let mut expanded = 0usize;

        let zero = N::Cost::default();
        let start_h = heuristic(&self.start);
        let (start_index, _) = finder.get_or_create_index(self.start, zero);
        heap.insert_or_decrease(
            start_index,
            PriorityCost {
                f_score: start_h,
                g_score: zero,
            },
        );

        while let Some((current, _)) = heap.extract_minimum() {
            if self.max_nodes.is_some_and(|max| expanded >= max) {
                tracing::debug!(expanded, "search stopped at node limit");
                return None;
            }
            expanded += 1;

            let entry = &mut finder.entries[current];
            entry.closed = true;
            // Saturated f-scores can hide a lower g from the queue
            let current_g = entry.g_score;
            let current_node = entry.node.clone();

            if current_node.is_goal() {
                tracing::debug!(expanded, "search reached goal");
                return Some((finder.reconstruct_path(current), current_g));
            }

            for (neighbor, edge_cost) in current_node.successors() {
                // A path whose cost overflows is never taken
                let Some(tentative_g) = current_g.checked_add(edge_cost) else {
                    continue;
                };
                if self.max_cost.is_some_and(|max| tentative_g > max) {
                    continue;
                }

                let h = heuristic(&neighbor);
                let (index, is_new) = finder.get_or_create_index(neighbor, tentative_g);
                let entry = &mut finder.entries[index];
                if entry.closed || !(is_new || tentative_g < entry.g_score) {
                    continue;
                }

                entry.g_score = tentative_g;
                entry.came_from = Some(current);
                heap.insert_or_decrease(
                    index,
                    PriorityCost {
                        f_score: tentative_g.saturating_add(h),
                        g_score: tentative_g,
                    },
                );
            }
        }

        tracing::debug!(expanded, "search exhausted open set");
        None
    }
}
