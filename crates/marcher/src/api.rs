//! Curated flat surface for orchestration code (CLI, benches, notebooks).
//!
//! Prefer these re-exports over reaching into submodules.

pub use crate::domain::rand::{random_geometric_graph, GraphGenCfg, ReplayToken};
pub use crate::domain::{AdjacencyGraph, GridCfg, Neighborhood, PointGrid3, Propagation};
pub use crate::heap::{ElementId, HeapKind, IndexedHeap, KeyOrder};
pub use crate::march::{MarchCfg, MarchError, MarchingEngine, RunPhase, Status};
pub use crate::sampling::farthest_point_sampling;

/// Nodes of a spherical cloud inscribed in a `dims` lattice with unit spacing.
///
/// Nodes outside the sphere are inactive; the sphere touches the shortest axis.
pub fn sphere_grid(dims: [usize; 3], propagation: Propagation) -> PointGrid3 {
    let half = dims.map(|d| d.saturating_sub(1) as f64 / 2.0);
    let radius = half.iter().copied().fold(f64::INFINITY, f64::min) + 1e-9;
    let center = nalgebra::Point3::new(half[0], half[1], half[2]);
    let cfg = GridCfg {
        dims,
        propagation,
        ..GridCfg::default()
    };
    PointGrid3::from_fn(cfg, |p| (*p - center).norm() <= radius)
}
