//! Structured output of a simulation run.

use crate::Algorithm;
use serde::Serialize;
use sumshare_types::{Graph, NodeId};

/// One iteration's snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// Iteration index. 0 is the pre-iteration state.
    pub iteration: usize,
    /// Every node's value at this point, indexed by node id.
    pub values: Vec<f64>,
    /// Largest absolute deviation from the ground-truth average.
    pub error: f64,
    /// The gossip pair active this step. `None` for synchronous runs and
    /// for asynchronous no-op steps (isolated node chosen).
    pub active_pair: Option<(NodeId, NodeId)>,
}

/// A completed run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    /// Update rule that produced this run.
    pub algorithm: Algorithm,
    /// The run's graph copy; nodes hold their final values.
    pub graph: Graph,
    /// Per-step snapshots. Entry 0 is the pre-iteration state, so the
    /// length is `total_iterations + 1`.
    pub history: Vec<StepResult>,
    /// Iterations performed. Equals the configured cap when the run
    /// never converged.
    pub total_iterations: usize,
    /// Arithmetic mean of node values after the run.
    pub final_avg: f64,
}

impl SimulationResult {
    /// Error recorded at the last step.
    pub fn final_error(&self) -> f64 {
        self.history.last().map_or(0.0, |step| step.error)
    }
}
