//! Topology comparison experiments.

use crate::{RunReport, Simulator, SimulatorConfig, SimulatorError};
use sumshare_simulation::SimulationConfig;
use sumshare_types::Topology;
use tracing::info;

/// Runs one simulation per topology over a common configuration, for
/// side-by-side convergence comparison.
#[derive(Clone, Debug)]
pub struct TopologySweep {
    base: SimulatorConfig,
    sim_config: SimulationConfig,
}

impl TopologySweep {
    /// Create a sweep; the topology in `base` is ignored and replaced by
    /// each entry of [`Topology::ALL`] in turn.
    pub fn new(base: SimulatorConfig, sim_config: SimulationConfig) -> Self {
        Self { base, sim_config }
    }

    /// Run the sweep, one report per topology.
    pub fn run(&self) -> Result<Vec<RunReport>, SimulatorError> {
        let mut reports = Vec::with_capacity(Topology::ALL.len());

        for topology in Topology::ALL {
            info!(%topology, "running sweep entry");
            let config = SimulatorConfig {
                topology,
                ..self.base.clone()
            };
            let mut simulator = Simulator::new(config)?;
            let result = simulator.run(&self.sim_config)?;
            reports.push(RunReport::from_result(&result, simulator.graph()));
        }

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_covers_every_topology() {
        let sweep = TopologySweep::new(
            SimulatorConfig::new(20, Topology::Ring).with_seed(5),
            SimulationConfig::default().with_max_iterations(5000),
        );

        let reports = sweep.run().unwrap();

        assert_eq!(reports.len(), Topology::ALL.len());
        for (report, topology) in reports.iter().zip(Topology::ALL) {
            assert_eq!(report.topology, topology);
            assert!(
                report.total_iterations < 5000,
                "{topology} failed to converge in 5000 iterations"
            );
            assert!(report.deviation() < 1e-6);
        }
    }
}
