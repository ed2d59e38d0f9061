//! Weighted directed graphs and single-source shortest paths
//!
//! [`WeightedDigraph`] is an adjacency-list graph over dense vertex indices.
//! [`ShortestPaths`] runs Dijkstra's algorithm on it with a
//! [`FibonacciHeap`] keyed by vertex, relaxing edges through
//! `insert_or_decrease` so that each vertex occupies the open set at most once.
//!
//! Weights only need `PartialOrd`, so `f64` works directly; negative and
//! unordered (NaN) weights are rejected when the edge is added. A path whose
//! length does not fit the weight type is treated as absent.

use crate::fibonacci::FibonacciHeap;
use crate::order::PriorityOrder;
use thiserror::Error;

/// Vertex identifier: an index in `0..vertex_count`.
pub type Vertex = usize;

/// Trait for edge weights.
///
/// `Default` must be the additive identity.
pub trait Weight: Copy + PartialOrd + Default {
    /// Sum of two path lengths, or `None` if it is not representable.
    fn checked_add(self, other: Self) -> Option<Self>;
}

macro_rules! integer_weight {
    ($($t:ty),* $(,)?) => {
        $(
            impl Weight for $t {
                #[inline]
                fn checked_add(self, other: Self) -> Option<Self> {
                    <$t>::checked_add(self, other)
                }
            }
        )*
    };
}

integer_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! float_weight {
    ($($t:ty),* $(,)?) => {
        $(
            /// Infinite sums count as unrepresentable, so an infinite edge
            /// weight behaves like a missing edge.
            impl Weight for $t {
                #[inline]
                fn checked_add(self, other: Self) -> Option<Self> {
                    let sum = self + other;
                    sum.is_finite().then_some(sum)
                }
            }
        )*
    };
}

float_weight!(f32, f64);

/// Errors raised while building a graph or querying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex index is not below the vertex count
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: Vertex, vertex_count: usize },
    /// An edge weight is negative or not comparable with zero
    #[error("edge {from} -> {to} has a negative or unordered weight")]
    InvalidWeight { from: Vertex, to: Vertex },
}

/// A directed edge with a weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge<W> {
    pub from: Vertex,
    pub to: Vertex,
    pub weight: W,
}

impl<W> WeightedEdge<W> {
    pub fn new(from: Vertex, to: Vertex, weight: W) -> Self {
        WeightedEdge { from, to, weight }
    }
}

/// Directed graph with weighted edges, stored as per-vertex adjacency lists.
///
/// Parallel edges and self-loops are allowed.
#[derive(Debug, Clone)]
pub struct WeightedDigraph<W> {
    adjacency: Vec<Vec<WeightedEdge<W>>>,
    edge_count: usize,
}

impl<W: Weight> WeightedDigraph<W> {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        WeightedDigraph {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Creates a graph from an edge list.
    ///
    /// Edges with an endpoint outside `0..vertex_count` or an invalid weight
    /// are skipped.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = WeightedEdge<W>>,
    {
        let mut graph = Self::new(vertex_count);
        for edge in edges {
            if let Err(err) = graph.add_edge(edge.from, edge.to, edge.weight) {
                tracing::debug!(%err, "skipping edge");
            }
        }
        graph
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Appends a new isolated vertex and returns its index.
    pub fn add_vertex(&mut self) -> Vertex {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    /// Adds the edge `from -> to`.
    ///
    /// # Errors
    /// `GraphError::VertexOutOfRange` if either endpoint is not in the graph,
    /// `GraphError::InvalidWeight` if the weight is negative or NaN.
    pub fn add_edge(&mut self, from: Vertex, to: Vertex, weight: W) -> Result<(), GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if !(weight >= W::default()) {
            return Err(GraphError::InvalidWeight { from, to });
        }
        self.adjacency[from].push(WeightedEdge::new(from, to, weight));
        self.edge_count += 1;
        Ok(())
    }

    /// Edges leaving `vertex`, in insertion order.
    pub fn adjacent_edges(&self, vertex: Vertex) -> Result<&[WeightedEdge<W>], GraphError> {
        self.check_vertex(vertex)?;
        Ok(&self.adjacency[vertex])
    }

    /// Heads of the edges leaving `vertex`.
    pub fn adjacent_vertices(
        &self,
        vertex: Vertex,
    ) -> Result<impl Iterator<Item = Vertex> + '_, GraphError> {
        Ok(self.adjacent_edges(vertex)?.iter().map(|edge| edge.to))
    }

    /// Out-degree of `vertex`.
    pub fn degree(&self, vertex: Vertex) -> Result<usize, GraphError> {
        Ok(self.adjacent_edges(vertex)?.len())
    }

    fn check_vertex(&self, vertex: Vertex) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }
}

/// Orders weights that are only `PartialOrd`; edges with unordered weights
/// never reach the heap.
#[derive(Debug, Clone, Copy, Default)]
struct WeightOrder;

impl<W: PartialOrd> PriorityOrder<W> for WeightOrder {
    #[inline]
    fn less(&self, a: &W, b: &W) -> bool {
        a < b
    }
}

/// Shortest-path tree from one source vertex.
///
/// # Example
///
/// ```rust
/// use keyed_fibonacci_heap::graph::{ShortestPaths, WeightedDigraph};
///
/// let mut graph = WeightedDigraph::new(3);
/// graph.add_edge(0, 1, 4.0).unwrap();
/// graph.add_edge(0, 2, 1.0).unwrap();
/// graph.add_edge(2, 1, 2.0).unwrap();
///
/// let paths = ShortestPaths::compute(&graph, 0).unwrap();
/// assert_eq!(paths.distance_to(1), Some(3.0));
/// let hops: Vec<usize> = paths.path_to(1).unwrap().iter().map(|e| e.to).collect();
/// assert_eq!(hops, vec![2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct ShortestPaths<W> {
    source: Vertex,
    dist_to: Vec<Option<W>>,
    edge_to: Vec<Option<WeightedEdge<W>>>,
}

impl<W: Weight> ShortestPaths<W> {
    /// Runs Dijkstra's algorithm from `source` over the whole graph.
    ///
    /// # Errors
    /// `GraphError::VertexOutOfRange` if `source` is not in the graph.
    ///
    /// # Time Complexity
    /// O(E + V log V) amortized
    pub fn compute(graph: &WeightedDigraph<W>, source: Vertex) -> Result<Self, GraphError> {
        graph.check_vertex(source)?;

        let vertex_count = graph.vertex_count();
        let mut paths = ShortestPaths {
            source,
            dist_to: vec![None; vertex_count],
            edge_to: vec![None; vertex_count],
        };
        let mut open: FibonacciHeap<Vertex, W, WeightOrder> =
            FibonacciHeap::with_capacity_and_order(vertex_count, WeightOrder);

        paths.dist_to[source] = Some(W::default());
        open.insert_or_decrease(source, W::default());

        let mut settled = 0usize;
        while let Some((vertex, distance)) = open.extract_minimum() {
            settled += 1;
            for edge in &graph.adjacency[vertex] {
                paths.relax(&mut open, edge, distance);
            }
        }

        tracing::debug!(source, settled, vertex_count, "computed shortest paths");
        Ok(paths)
    }

    fn relax(
        &mut self,
        open: &mut FibonacciHeap<Vertex, W, WeightOrder>,
        edge: &WeightedEdge<W>,
        distance: W,
    ) {
        let Some(candidate) = distance.checked_add(edge.weight) else {
            return;
        };
        let improves = match self.dist_to[edge.to] {
            None => true,
            Some(current) => candidate < current,
        };
        if improves {
            self.dist_to[edge.to] = Some(candidate);
            self.edge_to[edge.to] = Some(*edge);
            open.insert_or_decrease(edge.to, candidate);
        }
    }

    /// The vertex the paths start from.
    pub fn source(&self) -> Vertex {
        self.source
    }

    /// Length of the shortest path to `vertex`, or `None` if it is
    /// unreachable or not in the graph.
    pub fn distance_to(&self, vertex: Vertex) -> Option<W> {
        self.dist_to.get(vertex).copied().flatten()
    }

    /// Returns true if `vertex` is reachable from the source.
    pub fn has_path_to(&self, vertex: Vertex) -> bool {
        self.distance_to(vertex).is_some()
    }

    /// Edges of a shortest path from the source to `vertex`, in travel order.
    ///
    /// The path to the source itself is empty.
    pub fn path_to(&self, vertex: Vertex) -> Option<Vec<WeightedEdge<W>>> {
        if !self.has_path_to(vertex) {
            return None;
        }
        let mut path = Vec::new();
        let mut current = vertex;
        while let Some(edge) = self.edge_to[current] {
            path.push(edge);
            current = edge.from;
        }
        path.reverse();
        Some(path)
    }
}
