//! Front-propagation engine.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::domain::Neighborhood;
use crate::heap::{ElementId, HeapKind, IndexedHeap};

use super::types::{check_ids, check_len, MarchCfg, MarchError, RunPhase, Status};

/// Dijkstra-style marcher computing distance and nearest-seed labels.
///
/// Owns the per-element arrays and the frontier; the domain is only queried.
/// Equal candidate distances from different seeds are resolved by heap order,
/// which is unspecified: callers must not rely on which label wins a tie.
pub struct MarchingEngine<D: Neighborhood> {
    domain: D,
    cfg: MarchCfg,
    status: Vec<Status>,
    distance: Vec<f64>,
    voronoi: Vec<Option<ElementId>>,
    frontier: IndexedHeap,
    farthest: Option<IndexedHeap>,
    phase: RunPhase,
    frozen: usize,
}

impl<D: Neighborhood> MarchingEngine<D> {
    pub fn new(domain: D) -> Self {
        Self::with_cfg(domain, MarchCfg::default())
    }

    pub fn with_cfg(domain: D, cfg: MarchCfg) -> Self {
        let n = domain.len();
        let mut engine = Self {
            domain,
            cfg,
            status: vec![Status::Far; n],
            distance: vec![f64::INFINITY; n],
            voronoi: vec![None; n],
            frontier: IndexedHeap::new(n, HeapKind::Min),
            farthest: None,
            phase: RunPhase::Idle,
            frozen: 0,
        };
        if cfg.track_farthest {
            engine.attach_all_elements_heap();
        }
        engine
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.distance.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }
    #[inline]
    pub fn domain(&self) -> &D {
        &self.domain
    }
    #[inline]
    pub fn cfg(&self) -> &MarchCfg {
        &self.cfg
    }
    #[inline]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }
    #[inline]
    pub fn distance(&self) -> &[f64] {
        &self.distance
    }
    #[inline]
    pub fn voronoi(&self) -> &[Option<ElementId>] {
        &self.voronoi
    }
    #[inline]
    pub fn status(&self) -> &[Status] {
        &self.status
    }
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
    /// Elements frozen since the last `begin*`, seeds included.
    #[inline]
    pub fn frozen_count(&self) -> usize {
        self.frozen
    }
    #[inline]
    pub fn frontier(&self) -> &IndexedHeap {
        &self.frontier
    }

    pub fn all_elements_heap(&self) -> Option<&IndexedHeap> {
        self.farthest.as_ref()
    }

    /// Overwrite distances (e.g. to warm-start a later `march`).
    pub fn set_distance(&mut self, distance: &[f64]) -> Result<(), MarchError> {
        check_len("distance", self.len(), distance.len())?;
        self.distance.copy_from_slice(distance);
        self.frontier.update_all(self.distance.as_slice());
        if let Some(h) = self.farthest.as_mut() {
            h.update_all(self.distance.as_slice());
        }
        Ok(())
    }

    pub fn set_voronoi(&mut self, voronoi: &[Option<ElementId>]) -> Result<(), MarchError> {
        check_len("voronoi", self.len(), voronoi.len())?;
        self.voronoi.copy_from_slice(voronoi);
        Ok(())
    }

    /// Make `ids` unselectable: distance `-inf`, never enqueued unless seeded.
    ///
    /// Safe mid-run: a `Close` id leaves the frontier and goes back to `Far`
    /// without a label. `Frozen` ids keep their status.
    pub fn exclude(&mut self, ids: &[ElementId]) -> Result<(), MarchError> {
        check_ids(ids, self.len())?;
        for &id in ids {
            if self.status[id] == Status::Close {
                self.frontier.remove(id, self.distance.as_slice());
                self.status[id] = Status::Far;
                self.voronoi[id] = None;
            }
            self.distance[id] = f64::NEG_INFINITY;
            if let Some(h) = self.farthest.as_mut() {
                h.update(id, self.distance.as_slice());
            }
        }
        Ok(())
    }

    /// Keep a max-distance heap over every element in sync with `distance`.
    pub fn attach_all_elements_heap(&mut self) {
        let mut h = IndexedHeap::new(self.len(), HeapKind::Max);
        h.set_all(self.distance.as_slice());
        self.farthest = Some(h);
    }

    pub fn detach_all_elements_heap(&mut self) -> Option<IndexedHeap> {
        self.farthest.take()
    }

    /// Element with the largest current distance, if the heap is attached.
    pub fn farthest(&self) -> Option<ElementId> {
        self.farthest.as_ref().and_then(IndexedHeap::peek)
    }

    /// Pristine state: `+inf` distances, no labels, all `Far`, idle.
    pub fn reset(&mut self) {
        self.clear();
        self.distance.fill(f64::INFINITY);
        self.voronoi.fill(None);
        if let Some(h) = self.farthest.as_mut() {
            h.set_all(self.distance.as_slice());
        }
    }

    /// Abandon any run in progress; distances and labels are kept.
    pub fn clear(&mut self) {
        self.frontier.clear();
        self.status.fill(Status::Far);
        self.phase = RunPhase::Idle;
        self.frozen = 0;
    }

    /// Fresh run to completion.
    pub fn run(&mut self, seeds: &[ElementId]) -> Result<(), MarchError> {
        self.begin(seeds)?;
        self.finish();
        Ok(())
    }

    /// Fresh run, then copy the results out.
    ///
    /// Output lengths are checked before anything is computed.
    pub fn run_into(
        &mut self,
        seeds: &[ElementId],
        distance_out: &mut [f64],
        voronoi_out: &mut [Option<ElementId>],
    ) -> Result<(), MarchError> {
        check_len("distance output", self.len(), distance_out.len())?;
        check_len("voronoi output", self.len(), voronoi_out.len())?;
        self.run(seeds)?;
        distance_out.copy_from_slice(&self.distance);
        voronoi_out.copy_from_slice(&self.voronoi);
        Ok(())
    }

    /// Warm run to completion: existing distances are only tightened.
    pub fn march(&mut self, seeds: &[ElementId]) -> Result<(), MarchError> {
        self.begin_warm(seeds)?;
        self.finish();
        Ok(())
    }

    /// Reset, seed, and expand the seeds; follow with `step` or `finish`.
    pub fn begin(&mut self, seeds: &[ElementId]) -> Result<(), MarchError> {
        check_ids(seeds, self.len())?;
        self.reset();
        self.start(seeds);
        Ok(())
    }

    /// Like `begin` but keeps current distances and labels.
    pub fn begin_warm(&mut self, seeds: &[ElementId]) -> Result<(), MarchError> {
        check_ids(seeds, self.len())?;
        self.clear();
        self.start(seeds);
        Ok(())
    }

    /// Freeze the closest frontier element and expand it.
    ///
    /// Returns the frontier size afterwards; `0` means the run is complete.
    pub fn step(&mut self) -> usize {
        let Some(e) = self.frontier.poll(self.distance.as_slice()) else {
            if self.phase != RunPhase::Idle {
                self.phase = RunPhase::Done;
            }
            return 0;
        };
        self.status[e] = Status::Frozen;
        self.frozen += 1;
        if let Some(h) = self.farthest.as_mut() {
            h.update(e, self.distance.as_slice());
        }
        self.expand(e);

        if let Some(every) = self.cfg.progress_interval {
            if every > 0 && self.frozen % every == 0 {
                trace!(frozen = self.frozen, frontier = self.frontier.len(), "march progress");
            }
        }
        let remaining = self.frontier.len();
        self.phase = if remaining == 0 {
            debug!(frozen = self.frozen, "march done");
            RunPhase::Done
        } else {
            RunPhase::Expanding
        };
        remaining
    }

    /// Drain `step` until the frontier is empty; returns elements frozen by the drain.
    pub fn finish(&mut self) -> usize {
        let before = self.frozen;
        while self.step() > 0 {}
        self.frozen - before
    }

    fn start(&mut self, seeds: &[ElementId]) {
        debug!(seeds = seeds.len(), elements = self.len(), "march begin");
        for &s in seeds {
            if self.status[s] != Status::Frozen {
                self.frozen += 1;
            }
            self.distance[s] = 0.0;
            self.status[s] = Status::Frozen;
            self.voronoi[s] = Some(s);
            if let Some(h) = self.farthest.as_mut() {
                h.update(s, self.distance.as_slice());
            }
        }
        for &s in seeds {
            self.expand(s);
        }
        self.phase = if self.frontier.is_empty() {
            RunPhase::Done
        } else {
            RunPhase::Seeded
        };
    }

    /// Offer every non-frozen neighbour of `e` a tighter distance through `e`.
    fn expand(&mut self, e: ElementId) {
        let Self {
            domain,
            status,
            distance,
            voronoi,
            frontier,
            farthest,
            ..
        } = self;
        let domain = &*domain;
        let from_distance = distance[e];
        let label = voronoi[e];
        let seed = label.unwrap_or(e);
        domain.for_each_neighbor(e, |n, cost| {
            if status[n] == Status::Frozen {
                return;
            }
            let d = domain.candidate(seed, e, n, from_distance, cost);
            // NaN candidates never tighten
            if d.partial_cmp(&distance[n]) != Some(Ordering::Less) {
                return;
            }
            distance[n] = d;
            voronoi[n] = label;
            match status[n] {
                Status::Far => {
                    status[n] = Status::Close;
                    frontier.add(n, distance.as_slice());
                }
                Status::Close => {
                    frontier.update(n, distance.as_slice());
                }
                Status::Frozen => unreachable!(),
            }
            if let Some(h) = farthest.as_mut() {
                h.update(n, distance.as_slice());
            }
        });
    }
}
