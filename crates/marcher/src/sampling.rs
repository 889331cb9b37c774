//! Farthest-point sampling driven by warm-restarted marches.
//!
//! Each new sample is the element with the largest current distance to all
//! previous samples; marching from it only tightens distances, so the
//! all-elements heap always answers the next query in O(1).

use tracing::debug;

use crate::domain::Neighborhood;
use crate::heap::ElementId;
use crate::march::{MarchError, MarchingEngine};

/// Pick up to `count` well-spread elements.
///
/// Uses the engine's current distances as the starting coverage, so callers can
/// `exclude` ids or pre-seed coverage beforehand. Stops early once the farthest
/// remaining distance is not positive.
pub fn farthest_point_sampling<D: Neighborhood>(
    engine: &mut MarchingEngine<D>,
    count: usize,
) -> Result<Vec<ElementId>, MarchError> {
    if engine.all_elements_heap().is_none() {
        engine.attach_all_elements_heap();
    }
    let mut samples = Vec::with_capacity(count);
    while samples.len() < count {
        let Some(next) = engine.farthest() else {
            break;
        };
        let gap = engine.distance()[next];
        if gap <= 0.0 {
            break;
        }
        debug!(sample = samples.len(), id = next, gap, "farthest point");
        samples.push(next);
        engine.march(&[next])?;
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AdjacencyGraph, GridCfg, PointGrid3};

    #[test]
    fn path_samples_spread_out() {
        let mut eng = MarchingEngine::new(AdjacencyGraph::path(9, 1.0));
        eng.run(&[0]).unwrap();
        let picks = farthest_point_sampling(&mut eng, 3).unwrap();
        assert_eq!(picks[0], 8);
        assert_eq!(picks[1], 4);
        assert!(picks[2] == 2 || picks[2] == 6);
        assert!(eng.distance().iter().all(|&d| d <= 2.0));
    }

    #[test]
    fn stops_when_everything_is_covered() {
        let mut eng = MarchingEngine::new(AdjacencyGraph::path(3, 1.0));
        let picks = farthest_point_sampling(&mut eng, 10).unwrap();
        assert_eq!(picks.len(), 3);
        let mut sorted = picks.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
        assert!(eng.distance().iter().all(|&d| d == 0.0));
    }

    #[test]
    fn excluded_grid_nodes_are_never_sampled() {
        let grid = PointGrid3::from_fn(
            GridCfg {
                dims: [6, 6, 6],
                ..GridCfg::default()
            },
            |p| (*p - nalgebra::Point3::new(2.5, 2.5, 2.5)).norm() < 2.6,
        );
        let inactive = grid.inactive_ids();
        assert!(!inactive.is_empty());
        let mut eng = MarchingEngine::new(grid);
        eng.exclude(&inactive).unwrap();
        let picks = farthest_point_sampling(&mut eng, 8).unwrap();
        assert_eq!(picks.len(), 8);
        for id in picks {
            assert!(eng.domain().is_active(id));
        }
    }
}
