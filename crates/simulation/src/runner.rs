//! The consensus simulation loop.

use crate::noise;
use crate::{Algorithm, SimulationConfig, SimulationError, SimulationResult, StepResult};
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sumshare_types::{Graph, NodeId};
use tracing::{debug, trace};

/// Drives the iterative consensus protocol over a graph copy.
///
/// Owns its random source: two simulations created with the same seed
/// produce identical runs over the same base graph, step for step.
pub struct Simulation {
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Create a simulation seeded for reproducible runs.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Run one simulation over a copy of `base_graph`.
    ///
    /// The caller's graph is never mutated, so the same base graph can
    /// seed any number of runs with different algorithms or noise
    /// settings.
    pub fn run(
        &mut self,
        base_graph: &Graph,
        config: &SimulationConfig,
    ) -> Result<SimulationResult, SimulationError> {
        config.validate()?;
        if base_graph.num_nodes() == 0 {
            return Err(SimulationError::EmptyGraph);
        }

        let mut graph = base_graph.clone();
        let mut history = Vec::with_capacity(config.max_iterations + 1);
        let mut iterations = 0;

        history.push(StepResult {
            iteration: 0,
            values: graph.values(),
            error: graph.max_error(),
            active_pair: None,
        });

        // Metropolis-style self-weight. Keeps the synchronous update
        // matrix doubly stochastic, so iteration contracts every value
        // toward the average while preserving the sum.
        let alpha = match config.algorithm {
            Algorithm::Synchronous => 1.0 / (graph.max_degree() + 1) as f64,
            Algorithm::Asynchronous => 0.0,
        };

        debug!(
            algorithm = %config.algorithm,
            nodes = graph.num_nodes(),
            alpha,
            epsilon = config.epsilon,
            "starting run"
        );

        for _ in 0..config.max_iterations {
            iterations += 1;

            let (max_change, active_pair) = match config.algorithm {
                Algorithm::Synchronous => (self.sync_update(&mut graph, alpha, config), None),
                Algorithm::Asynchronous => (0.0, self.async_update(&mut graph, config)),
            };

            let error = graph.max_error();
            history.push(StepResult {
                iteration: iterations,
                values: graph.values(),
                error,
                active_pair,
            });

            if self.check_consensus(&graph, config, max_change) {
                debug!(iterations, error, "converged");
                break;
            }
        }

        let final_avg = graph.avg();
        debug!(
            algorithm = %config.algorithm,
            total_iterations = iterations,
            final_avg,
            final_error = history.last().map_or(0.0, |step| step.error),
            "run finished"
        );

        Ok(SimulationResult {
            algorithm: config.algorithm,
            graph,
            history,
            total_iterations: iterations,
            final_avg,
        })
    }

    /// One full synchronous round: every node updates simultaneously
    /// from a frozen snapshot of its neighbors' values.
    ///
    /// Returns the largest absolute per-node change, the convergence
    /// signal for this algorithm.
    fn sync_update(&mut self, graph: &mut Graph, alpha: f64, config: &SimulationConfig) -> f64 {
        let current = graph.values();

        // Two-phase: compute every next value from the snapshot before
        // committing any of them, since the formula depends on each
        // neighbor's pre-update value.
        let mut next = Vec::with_capacity(current.len());
        for id in graph.ids() {
            let neighbors = graph.neighbors(id);
            let degree = neighbors.len() as f64;
            let mut weighted = (1.0 - degree * alpha) * current[id.index()];
            for &peer in neighbors {
                let received = current[peer.index()]
                    + noise::sample(config.noise_distribution, config.noise_scale, &mut self.rng);
                weighted += alpha * received;
            }
            next.push(weighted);
        }

        let mut max_change = 0.0f64;
        for (i, value) in next.into_iter().enumerate() {
            max_change = max_change.max((current[i] - value).abs());
            graph.set_value(NodeId(i as u32), value);
        }
        max_change
    }

    /// One gossip step: a uniformly chosen node averages with one of its
    /// neighbors, each side reading the other's (optionally noisy)
    /// value.
    ///
    /// Returns the active pair, or `None` when the chosen node is
    /// isolated and the step is a no-op.
    fn async_update(
        &mut self,
        graph: &mut Graph,
        config: &SimulationConfig,
    ) -> Option<(NodeId, NodeId)> {
        let a = NodeId(self.rng.gen_range(0..graph.num_nodes() as u32));
        let Some(b) = graph.neighbors(a).iter().copied().choose(&mut self.rng) else {
            trace!(node = %a, "isolated node chosen, no-op step");
            return None;
        };

        let value_a = graph.value(a);
        let value_b = graph.value(b);
        let noise_a = noise::sample(config.noise_distribution, config.noise_scale, &mut self.rng);
        let noise_b = noise::sample(config.noise_distribution, config.noise_scale, &mut self.rng);

        graph.set_value(a, (value_a + (value_b + noise_b)) / 2.0);
        graph.set_value(b, (value_b + (value_a + noise_a)) / 2.0);
        Some((a, b))
    }

    /// Algorithm-specific convergence test.
    ///
    /// Synchronous runs stop once a whole round moved no node by more
    /// than epsilon. Asynchronous runs stop once the whole population
    /// has collapsed to within epsilon of a single value; only two
    /// values change per step, so there is no per-round delta to track.
    fn check_consensus(&self, graph: &Graph, config: &SimulationConfig, max_change: f64) -> bool {
        match config.algorithm {
            Algorithm::Synchronous => max_change < config.epsilon,
            Algorithm::Asynchronous => {
                let (min, max) = graph.nodes().iter().fold(
                    (f64::INFINITY, f64::NEG_INFINITY),
                    |(lo, hi), node| (lo.min(node.value), hi.max(node.value)),
                );
                max - min < config.epsilon
            }
        }
    }
}
