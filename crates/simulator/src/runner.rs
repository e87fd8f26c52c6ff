//! Single-experiment driver: build a masked graph, run algorithms on it.

use crate::{RunReport, SimulatorConfig, SimulatorError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sumshare_simulation::{Algorithm, Simulation, SimulationConfig, SimulationResult};
use sumshare_types::Graph;
use tracing::info;

/// Owns one masked base graph and hands out simulation runs over it.
///
/// The base graph is built, initialized, and masked once; every run then
/// works on its own copy, so runs never contaminate each other and can
/// be compared directly.
pub struct Simulator {
    config: SimulatorConfig,
    graph: Graph,
    rng: ChaCha8Rng,
}

impl Simulator {
    /// Build the masked base graph described by `config`.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let mut graph = Graph::new(config.num_nodes, config.topology, &mut rng)?;
        graph.set_initial_values(config.range_start, config.range_end, &mut rng)?;
        graph.apply_shares(config.share_range, &mut rng)?;

        info!(
            topology = %config.topology,
            nodes = config.num_nodes,
            true_avg = graph.true_avg(),
            seed = config.seed,
            "base graph ready"
        );

        Ok(Self { config, graph, rng })
    }

    /// Run one simulation over a copy of the base graph.
    ///
    /// The run seed derives from the simulator's seeded source, so a
    /// fixed `SimulatorConfig::seed` reproduces the whole run sequence.
    pub fn run(
        &mut self,
        sim_config: &SimulationConfig,
    ) -> Result<SimulationResult, SimulatorError> {
        let run_seed: u64 = self.rng.gen();
        let result = Simulation::new(run_seed).run(&self.graph, sim_config)?;
        RunReport::from_result(&result, &self.graph).log_summary();
        Ok(result)
    }

    /// Run the synchronous and asynchronous algorithms over the same
    /// base graph, mirroring the standard comparison experiment.
    pub fn run_both(
        &mut self,
        base: SimulationConfig,
    ) -> Result<(SimulationResult, SimulationResult), SimulatorError> {
        let sync = self.run(&SimulationConfig {
            algorithm: Algorithm::Synchronous,
            ..base.clone()
        })?;
        let asynchronous = self.run(&SimulationConfig {
            algorithm: Algorithm::Asynchronous,
            ..base
        })?;
        Ok((sync, asynchronous))
    }

    /// The masked base graph all runs start from.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The simulator configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}
