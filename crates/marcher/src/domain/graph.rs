//! Weighted adjacency-list graph.

use crate::heap::ElementId;
use crate::march::MarchError;

use super::Neighborhood;

/// Adjacency lists of `(neighbour, cost)` pairs over `[0, len)`.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyGraph {
    adj: Vec<Vec<(ElementId, f64)>>,
}

impl AdjacencyGraph {
    /// Graph with `len` isolated nodes.
    pub fn new(len: usize) -> Self {
        Self {
            adj: vec![Vec::new(); len],
        }
    }

    /// Undirected edge `a - b`. Panics on out-of-range ids.
    pub fn add_edge(&mut self, a: ElementId, b: ElementId, cost: f64) {
        self.add_arc(a, b, cost);
        self.add_arc(b, a, cost);
    }

    /// Directed arc `from → to`. Panics on out-of-range ids.
    pub fn add_arc(&mut self, from: ElementId, to: ElementId, cost: f64) {
        debug_assert!(cost >= 0.0, "negative cost {cost} on {from} -> {to}");
        assert!(from < self.adj.len(), "arc source {from} out of range");
        assert!(to < self.adj.len(), "arc target {to} out of range");
        self.adj[from].push((to, cost));
    }

    /// Build an undirected graph from external edge data, validating every entry.
    pub fn from_edges<I>(len: usize, edges: I) -> Result<Self, MarchError>
    where
        I: IntoIterator<Item = (ElementId, ElementId, f64)>,
    {
        let mut g = Self::new(len);
        for (from, to, cost) in edges {
            for id in [from, to] {
                if id >= len {
                    return Err(MarchError::ElementOutOfRange { id, len });
                }
            }
            if cost.is_nan() || cost < 0.0 {
                return Err(MarchError::InvalidCost { from, to, cost });
            }
            g.add_edge(from, to, cost);
        }
        Ok(g)
    }

    /// Path `0 - 1 - … - len-1` with uniform edge cost.
    pub fn path(len: usize, cost: f64) -> Self {
        let mut g = Self::new(len);
        for i in 1..len {
            g.add_edge(i - 1, i, cost);
        }
        g
    }

    pub fn neighbors(&self, e: ElementId) -> &[(ElementId, f64)] {
        &self.adj[e]
    }

    /// Number of stored arcs (undirected edges count twice).
    pub fn arc_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }
}

impl Neighborhood for AdjacencyGraph {
    fn len(&self) -> usize {
        self.adj.len()
    }

    fn for_each_neighbor<F: FnMut(ElementId, f64)>(&self, e: ElementId, mut visit: F) {
        for &(n, cost) in &self.adj[e] {
            visit(n, cost);
        }
    }
}
