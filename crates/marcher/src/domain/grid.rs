//! Regular 3D point lattice with an activity mask.
//!
//! Elements are lattice nodes indexed `k + j*nz + i*ny*nz` for node `(i, j, k)`.
//! Inactive nodes have no neighbours and are never reached. Edges join each
//! active node to the active nodes of its 26-neighbourhood at Euclidean cost.

use nalgebra::{Point3, Vector3};

use crate::heap::ElementId;

use super::Neighborhood;

/// How a tentative distance is derived when the front crosses an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Sum of edge costs along the path (graph geodesic).
    #[default]
    Accumulated,
    /// Straight-line distance to the seed that labels the source node.
    Radial,
}

/// Lattice layout.
#[derive(Clone, Copy, Debug)]
pub struct GridCfg {
    pub dims: [usize; 3],
    pub origin: Point3<f64>,
    pub spacing: Vector3<f64>,
    pub propagation: Propagation,
}

impl Default for GridCfg {
    fn default() -> Self {
        Self {
            dims: [10, 10, 10],
            origin: Point3::origin(),
            spacing: Vector3::new(1.0, 1.0, 1.0),
            propagation: Propagation::Accumulated,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PointGrid3 {
    cfg: GridCfg,
    active: Vec<bool>,
}

impl PointGrid3 {
    /// Every node active.
    pub fn new(cfg: GridCfg) -> Self {
        let n = cfg.dims.iter().product();
        Self {
            cfg,
            active: vec![true; n],
        }
    }

    /// Nodes whose position satisfies `inside` are active.
    pub fn from_fn(cfg: GridCfg, inside: impl Fn(&Point3<f64>) -> bool) -> Self {
        let mut grid = Self::new(cfg);
        for id in 0..grid.active.len() {
            grid.active[id] = inside(&grid.point(id));
        }
        grid
    }

    #[inline]
    pub fn cfg(&self) -> &GridCfg {
        &self.cfg
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> ElementId {
        let [_, ny, nz] = self.cfg.dims;
        k + j * nz + i * ny * nz
    }

    #[inline]
    pub fn coords(&self, id: ElementId) -> [usize; 3] {
        let [_, ny, nz] = self.cfg.dims;
        [id / (ny * nz), (id / nz) % ny, id % nz]
    }

    pub fn point(&self, id: ElementId) -> Point3<f64> {
        let [i, j, k] = self.coords(id);
        let offset = Vector3::new(i as f64, j as f64, k as f64).component_mul(&self.cfg.spacing);
        self.cfg.origin + offset
    }

    #[inline]
    pub fn is_active(&self, id: ElementId) -> bool {
        self.active[id]
    }

    pub fn set_active(&mut self, id: ElementId, on: bool) {
        self.active[id] = on;
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Ids of inactive nodes, e.g. to exclude them from sampling.
    pub fn inactive_ids(&self) -> Vec<ElementId> {
        (0..self.active.len()).filter(|&id| !self.active[id]).collect()
    }
}

impl Neighborhood for PointGrid3 {
    fn len(&self) -> usize {
        self.active.len()
    }

    fn for_each_neighbor<F: FnMut(ElementId, f64)>(&self, e: ElementId, mut visit: F) {
        if !self.active[e] {
            return;
        }
        let dims = self.cfg.dims;
        let base = self.coords(e);
        let here = self.point(e);
        for di in -1i64..=1 {
            for dj in -1i64..=1 {
                for dk in -1i64..=1 {
                    if di == 0 && dj == 0 && dk == 0 {
                        continue;
                    }
                    let step = [di, dj, dk];
                    let mut c = [0usize; 3];
                    let mut inside = true;
                    for axis in 0..3 {
                        let v = base[axis] as i64 + step[axis];
                        if v < 0 || v >= dims[axis] as i64 {
                            inside = false;
                            break;
                        }
                        c[axis] = v as usize;
                    }
                    if !inside {
                        continue;
                    }
                    let n = self.index(c[0], c[1], c[2]);
                    if self.active[n] {
                        visit(n, (self.point(n) - here).norm());
                    }
                }
            }
        }
    }

    fn candidate(
        &self,
        seed: ElementId,
        _from: ElementId,
        to: ElementId,
        from_distance: f64,
        cost: f64,
    ) -> f64 {
        match self.cfg.propagation {
            Propagation::Accumulated => from_distance + cost,
            Propagation::Radial => (self.point(to) - self.point(seed)).norm(),
        }
    }
}
