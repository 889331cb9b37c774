//! Discretized domains the engine can march over.
//!
//! The engine owns no geometry. It only asks a `Neighborhood` for the
//! neighbours of an element and the cost of stepping to each one.
//!
//! - `AdjacencyGraph`: explicit weighted edges.
//! - `PointGrid3`: regular 3D lattice with an activity mask and a 26-neighbour stencil.
//! - `rand`: reproducible random geometric graphs for experiments and benches.

pub mod graph;
pub mod grid;
pub mod rand;

pub use graph::AdjacencyGraph;
pub use grid::{GridCfg, PointGrid3, Propagation};

use crate::heap::ElementId;

/// Neighbour and edge-cost oracle for a fixed universe `[0, len)`.
///
/// Implementations are read-only during a march, so one instance may be shared
/// by several engines as long as it is safe for concurrent reads.
pub trait Neighborhood {
    /// Size of the element universe.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `visit(n, cost)` for every neighbour `n` of `e`. Costs must be >= 0.
    fn for_each_neighbor<F: FnMut(ElementId, f64)>(&self, e: ElementId, visit: F);

    /// Tentative distance of `to` when reached from `from` (labelled `seed`).
    fn candidate(
        &self,
        _seed: ElementId,
        _from: ElementId,
        _to: ElementId,
        from_distance: f64,
        cost: f64,
    ) -> f64 {
        from_distance + cost
    }
}

impl<N: Neighborhood> Neighborhood for &N {
    fn len(&self) -> usize {
        (**self).len()
    }
    fn for_each_neighbor<F: FnMut(ElementId, f64)>(&self, e: ElementId, visit: F) {
        (**self).for_each_neighbor(e, visit)
    }
    fn candidate(
        &self,
        seed: ElementId,
        from: ElementId,
        to: ElementId,
        from_distance: f64,
        cost: f64,
    ) -> f64 {
        (**self).candidate(seed, from, to, from_distance, cost)
    }
}
