//! Error types for the simulation engine.

use thiserror::Error;

/// Errors raised when a run is misconfigured.
///
/// All of these are precondition failures surfaced at run start, never
/// mid-loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The graph has no nodes, so degree and average are undefined.
    #[error("cannot simulate an empty graph")]
    EmptyGraph,

    /// Convergence tolerance must be positive and finite.
    #[error("epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    /// Noise scale must be non-negative and finite.
    #[error("noise scale must be non-negative and finite, got {0}")]
    InvalidNoiseScale(f64),

    /// At least one iteration is required.
    #[error("iteration cap must be at least 1")]
    ZeroIterationCap,

    /// Unrecognized algorithm tag.
    #[error("unknown algorithm `{0}`, expected `sync` or `async`")]
    UnknownAlgorithm(String),

    /// Unrecognized noise-distribution tag.
    #[error("unknown noise distribution `{0}`, expected `uniform`, `gaussian`, or `laplace`")]
    UnknownNoiseDistribution(String),
}
