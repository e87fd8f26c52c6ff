//! Error type for the simulator crate.

use sumshare_simulation::SimulationError;
use sumshare_types::GraphError;
use thiserror::Error;

/// Anything that can go wrong while setting up or driving experiments.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Graph construction or initialization was rejected.
    #[error("graph setup failed: {0}")]
    Graph(#[from] GraphError),

    /// The simulation engine rejected the run configuration.
    #[error("simulation rejected configuration: {0}")]
    Simulation(#[from] SimulationError),

    /// Writing an export file failed.
    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing run output failed.
    #[error("export serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
