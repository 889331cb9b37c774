//! Generalized fast marching (monotone front propagation).
//!
//! Model
//! - Seeds start `Frozen` at distance 0 and label themselves.
//! - Each step freezes the `Close` element with the smallest tentative distance
//!   and offers its non-frozen neighbours `candidate(...)` distances. Tighter
//!   candidates overwrite distance and inherit the nearest-seed label.
//! - Elements move `Far → Close → Frozen` and never regress within a run, so a
//!   run terminates after at most `len` steps.
//!
//! Entry points
//! - `run` (fresh) and `march` (warm restart) execute to completion.
//! - `begin`/`begin_warm` + `step` split the same work into budgeted chunks; an
//!   abandoned loop leaves the engine valid and resumable.

mod engine;
mod types;

pub use engine::MarchingEngine;
pub use types::{MarchCfg, MarchError, RunPhase, Status};
