//! Per-element status, run phases, configuration, and errors for the engine.

use thiserror::Error;

use crate::heap::ElementId;

/// Per-element state; only ever advances `Far → Close → Frozen` within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Status {
    /// Not yet reached by the front.
    #[default]
    Far,
    /// On the frontier with a tentative distance.
    Close,
    /// Distance is final for this run.
    Frozen,
}

/// Global state of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    /// Seeds placed and expanded; nothing popped yet.
    Seeded,
    Expanding,
    Done,
}

/// Engine configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarchCfg {
    /// Attach the all-elements (max-distance) heap at construction.
    pub track_farthest: bool,
    /// Emit a trace event every `n` frozen elements.
    pub progress_interval: Option<usize>,
}

/// Contract violations detected at a call boundary, before any state changes.
#[derive(Debug, Error, PartialEq)]
pub enum MarchError {
    #[error("{what} has length {actual}, expected {expected}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("element {id} out of range for universe of {len} elements")]
    ElementOutOfRange { id: ElementId, len: usize },
    #[error("edge {from} -> {to} has invalid cost {cost}")]
    InvalidCost {
        from: ElementId,
        to: ElementId,
        cost: f64,
    },
}

pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), MarchError> {
    if expected == actual {
        Ok(())
    } else {
        Err(MarchError::SizeMismatch {
            what,
            expected,
            actual,
        })
    }
}

pub(crate) fn check_ids(ids: &[ElementId], len: usize) -> Result<(), MarchError> {
    match ids.iter().find(|&&id| id >= len) {
        Some(&id) => Err(MarchError::ElementOutOfRange { id, len }),
        None => Ok(()),
    }
}
