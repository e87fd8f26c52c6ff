//! Consensus simulation engine.
//!
//! Drives the iterative average-consensus protocol over a copy of a
//! masked [`Graph`](sumshare_types::Graph). Given the same seed, a run
//! produces identical results every time.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                   Simulation                       │
//! │                                                    │
//! │  base graph ──clone──▶ working copy                │
//! │                            │                       │
//! │          ┌─────────────────┴──────────────────┐    │
//! │          │  per-iteration update              │    │
//! │          │  · synchronous: two-phase weighted │    │
//! │          │    averaging over all nodes        │    │
//! │          │  · asynchronous: one random        │    │
//! │          │    neighbor pair averages          │    │
//! │          └─────────────────┬──────────────────┘    │
//! │                            ▼                       │
//! │        history: StepResult per iteration           │
//! │        convergence test → SimulationResult         │
//! └────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod noise;
mod results;
mod runner;

pub use config::{Algorithm, NoiseDistribution, SimulationConfig};
pub use error::SimulationError;
pub use results::{SimulationResult, StepResult};
pub use runner::Simulation;
