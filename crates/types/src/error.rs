//! Error types for graph construction and initialization.

use thiserror::Error;

/// Errors raised when building or initializing a graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A graph needs at least one node.
    #[error("graph must have at least one node")]
    Empty,

    /// Initial-value range with start above end, or a non-finite bound.
    #[error("invalid value range [{start}, {end}]")]
    InvalidValueRange {
        /// Lower bound as given.
        start: f64,
        /// Upper bound as given.
        end: f64,
    },

    /// Share half-width must be non-negative and finite.
    #[error("invalid share range {0}")]
    InvalidShareRange(f64),

    /// Explicit value assignment with the wrong number of values.
    #[error("expected {expected} values, got {got}")]
    ValueCountMismatch {
        /// Number of nodes in the graph.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
}
