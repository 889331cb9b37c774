//! Indexed heap and generalized fast marching.
//!
//! - `heap`: priority queue over integer ids with O(log n) update/remove.
//! - `march`: monotone front propagation computing distances and nearest-seed
//!   (Voronoi) labels, with a step-wise API for budgeted execution.
//! - `domain`: neighbour/cost oracles (graphs, point lattices, random graphs).
//! - `sampling`: farthest-point sampling on top of warm-restarted marches.
//!
//! The kernel is synchronous and single-threaded. One engine belongs to one
//! caller; parallel marches use separate engines over a shared domain.

pub mod api;
pub mod domain;
pub mod heap;
pub mod march;
pub mod sampling;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use heap::{ElementId, HeapKind, IndexedHeap, KeyOrder};
pub use march::{MarchCfg, MarchError, MarchingEngine, RunPhase, Status};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::domain::{AdjacencyGraph, GridCfg, Neighborhood, PointGrid3, Propagation};
    pub use crate::heap::{ElementId, HeapKind, IndexedHeap, KeyOrder};
    pub use crate::march::{MarchCfg, MarchError, MarchingEngine, RunPhase, Status};
    pub use crate::sampling::farthest_point_sampling;
}
