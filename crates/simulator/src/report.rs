//! Run summaries and history export.

use crate::SimulatorError;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use sumshare_simulation::{Algorithm, SimulationResult};
use sumshare_types::{Graph, Topology};
use tracing::info;

/// Summary of one completed run, suitable for side-by-side comparison.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Topology of the graph the run was performed on.
    pub topology: Topology,
    /// Update rule used.
    pub algorithm: Algorithm,
    /// Number of nodes.
    pub num_nodes: usize,
    /// Iterations performed.
    pub total_iterations: usize,
    /// Error recorded at the last step.
    pub final_error: f64,
    /// Mean of node values after the run.
    pub final_avg: f64,
    /// The ground truth the run was supposed to recover.
    pub true_avg: f64,
}

impl RunReport {
    /// Summarize a run against the base graph it started from.
    pub fn from_result(result: &SimulationResult, base_graph: &Graph) -> Self {
        Self {
            topology: base_graph.topology(),
            algorithm: result.algorithm,
            num_nodes: base_graph.num_nodes(),
            total_iterations: result.total_iterations,
            final_error: result.final_error(),
            final_avg: result.final_avg,
            true_avg: base_graph.true_avg(),
        }
    }

    /// How far the recovered mean drifted from the ground truth.
    pub fn deviation(&self) -> f64 {
        (self.final_avg - self.true_avg).abs()
    }

    /// Emit the summary at info level.
    pub fn log_summary(&self) {
        info!(
            topology = %self.topology,
            algorithm = %self.algorithm,
            nodes = self.num_nodes,
            iterations = self.total_iterations,
            final_error = self.final_error,
            final_avg = self.final_avg,
            true_avg = self.true_avg,
            "run complete"
        );
    }
}

/// Write full run histories as JSON for external plotting tools.
///
/// The output is an array of runs, each carrying its algorithm, the
/// final graph (node values and adjacency), and the per-step history.
pub fn export_runs(runs: &[SimulationResult], path: &Path) -> Result<(), SimulatorError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), runs)?;
    info!(path = %path.display(), runs = runs.len(), "exported run histories");
    Ok(())
}
