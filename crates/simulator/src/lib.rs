//! Experiment driver for masked average consensus.
//!
//! Builds on `sumshare-simulation` to provide:
//!
//! - **Run orchestration**: one masked base graph, both algorithms run
//!   over independent copies of it
//! - **Experiments**: topology sweeps with side-by-side summaries
//! - **Reporting**: per-run summaries and JSON export of full histories
//!   for external plotting tools
//!
//! # Example
//!
//! ```ignore
//! use sumshare_simulator::{Simulator, SimulatorConfig};
//! use sumshare_types::Topology;
//!
//! let config = SimulatorConfig::new(10, Topology::Ring)
//!     .with_value_range(10.0, 100.0)
//!     .with_seed(42);
//!
//! let mut simulator = Simulator::new(config)?;
//! let (sync_run, async_run) = simulator.run_both(Default::default())?;
//!
//! println!("sync iterations:  {}", sync_run.total_iterations);
//! println!("async iterations: {}", async_run.total_iterations);
//! ```

pub mod config;
pub mod error;
pub mod experiment;
pub mod report;
pub mod runner;

pub use config::SimulatorConfig;
pub use error::SimulatorError;
pub use experiment::TopologySweep;
pub use report::{export_runs, RunReport};
pub use runner::Simulator;
