//! Configuration types for the simulator.

use sumshare_types::Topology;

/// Configuration for a simulator instance: how to build and mask the
/// base graph every run starts from.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Number of nodes in the graph.
    pub num_nodes: usize,

    /// Neighbor-connection pattern.
    pub topology: Topology,

    /// Lower bound for initial values.
    pub range_start: f64,

    /// Upper bound for initial values.
    pub range_end: f64,

    /// Half-width of the additive-share distribution.
    pub share_range: f64,

    /// Random seed for deterministic graph construction and runs.
    pub seed: u64,
}

impl SimulatorConfig {
    /// Create a configuration with the given graph shape.
    pub fn new(num_nodes: usize, topology: Topology) -> Self {
        Self {
            num_nodes,
            topology,
            range_start: 10.0,
            range_end: 100.0,
            share_range: 100.0,
            seed: 12345,
        }
    }

    /// Set the initial-value range.
    pub fn with_value_range(mut self, range_start: f64, range_end: f64) -> Self {
        self.range_start = range_start;
        self.range_end = range_end;
        self
    }

    /// Set the additive-share half-width.
    pub fn with_share_range(mut self, share_range: f64) -> Self {
        self.share_range = share_range;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(10, Topology::Ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = SimulatorConfig::new(50, Topology::Mesh)
            .with_value_range(0.0, 1.0)
            .with_share_range(10.0)
            .with_seed(7);
        assert_eq!(config.num_nodes, 50);
        assert_eq!(config.topology, Topology::Mesh);
        assert_eq!(config.range_start, 0.0);
        assert_eq!(config.range_end, 1.0);
        assert_eq!(config.share_range, 10.0);
        assert_eq!(config.seed, 7);
    }
}
