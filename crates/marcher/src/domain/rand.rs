//! Random geometric graphs (reproducible via replay tokens).
//!
//! Model
//! - Draw `nodes` points uniformly in the unit square and join every pair closer
//!   than `radius` with an undirected edge costing their Euclidean distance.
//! - Optionally chain consecutive ids with a `bridge_cost` so the graph is
//!   connected regardless of the draw.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::graph::AdjacencyGraph;

/// Generator parameters.
#[derive(Clone, Copy, Debug)]
pub struct GraphGenCfg {
    pub nodes: usize,
    /// Connection radius in unit-square coordinates.
    pub radius: f64,
    /// Extra edge `i - i+1` with this cost when set.
    pub bridge_cost: Option<f64>,
}

impl Default for GraphGenCfg {
    fn default() -> Self {
        Self {
            nodes: 200,
            radius: 0.15,
            bridge_cost: None,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Sample points and build the graph. Returns the points alongside for plotting.
pub fn random_geometric_graph(
    cfg: GraphGenCfg,
    tok: ReplayToken,
) -> (AdjacencyGraph, Vec<Point2<f64>>) {
    let mut rng = tok.to_std_rng();
    let pts: Vec<Point2<f64>> = (0..cfg.nodes)
        .map(|_| Point2::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();
    let r = cfg.radius.max(0.0);
    let mut g = AdjacencyGraph::new(cfg.nodes);
    for a in 0..pts.len() {
        for b in a + 1..pts.len() {
            let d = (pts[b] - pts[a]).norm();
            if d < r {
                g.add_edge(a, b, d);
            }
        }
    }
    if let Some(cost) = cfg.bridge_cost {
        for i in 1..cfg.nodes {
            g.add_edge(i - 1, i, cost.max(0.0));
        }
    }
    (g, pts)
}
