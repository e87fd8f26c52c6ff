//! sumshare CLI
//!
//! Build a masked peer graph, run average consensus over it, and report
//! how each algorithm converges.
//!
//! # Example
//!
//! ```bash
//! # Deterministic run on a 10-node ring
//! sumshare-sim --seed 42 -t RING -n 10
//!
//! # Mesh with Laplace noise on every exchanged value
//! sumshare-sim -t MESH -n 50 --noise laplace --noise-scale 0.5
//!
//! # Gossip only, on a complete graph
//! sumshare-sim -t FULL -n 20 -a async
//!
//! # Compare all topologies side by side
//! sumshare-sim --sweep -n 50
//! ```

use clap::Parser;
use std::path::PathBuf;
use sumshare_simulation::{Algorithm, NoiseDistribution, SimulationConfig};
use sumshare_simulator::{export_runs, RunReport, Simulator, SimulatorConfig, TopologySweep};
use sumshare_types::Topology;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Masked average-consensus simulator.
///
/// Single-threaded and reproducible when the same seed is used.
#[derive(Parser, Debug)]
#[command(name = "sumshare-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Topology of the graph (RING, STAR, TREE, MESH, FULL)
    #[arg(short = 't', long, default_value = "RING")]
    topology: Topology,

    /// Number of nodes in the graph
    #[arg(short = 'n', long, default_value = "10")]
    num_nodes: usize,

    /// Lower bound for initial values
    #[arg(short = 'l', long, default_value = "10")]
    lower_bound: f64,

    /// Upper bound for initial values
    #[arg(short = 'u', long, default_value = "100")]
    upper_bound: f64,

    /// Half-width of the additive-share distribution
    #[arg(short = 'r', long, default_value = "100")]
    random_range: f64,

    /// Iteration cap per run
    #[arg(long, default_value = "1000")]
    max_iterations: usize,

    /// Convergence tolerance
    #[arg(long, default_value = "1e-6")]
    epsilon: f64,

    /// Noise distribution for exchanged values (uniform, gaussian, laplace)
    #[arg(long)]
    noise: Option<NoiseDistribution>,

    /// Scale of the noise distribution
    #[arg(long, default_value = "0")]
    noise_scale: f64,

    /// Run only this algorithm (sync, async). Both run when omitted.
    #[arg(short = 'a', long)]
    algorithm: Option<Algorithm>,

    /// Random seed for reproducible results. When omitted, a random seed
    /// is used and logged for replay.
    #[arg(long)]
    seed: Option<u64>,

    /// Run one synchronous simulation per topology instead of a single
    /// graph comparison
    #[arg(long)]
    sweep: bool,

    /// Write full run histories as JSON to this path
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    if let Err(err) = run(&args, seed) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args, seed: u64) -> Result<(), sumshare_simulator::SimulatorError> {
    let base = SimulatorConfig::new(args.num_nodes, args.topology)
        .with_value_range(args.lower_bound, args.upper_bound)
        .with_share_range(args.random_range)
        .with_seed(seed);

    let mut sim_config = SimulationConfig::default()
        .with_max_iterations(args.max_iterations)
        .with_epsilon(args.epsilon);
    if let Some(noise) = args.noise {
        sim_config = sim_config.with_noise(noise, args.noise_scale);
    }

    info!(
        topology = %args.topology,
        nodes = args.num_nodes,
        seed,
        max_iterations = args.max_iterations,
        epsilon = args.epsilon,
        "starting"
    );

    if args.sweep {
        let reports = TopologySweep::new(base, sim_config).run()?;
        println!("\n=== Topology Sweep ===");
        for report in &reports {
            println!(
                "{:<6} iterations: {:>6}  final error: {:.3e}  avg deviation: {:.3e}",
                report.topology.name(),
                report.total_iterations,
                report.final_error,
                report.deviation()
            );
        }
        return Ok(());
    }

    let mut simulator = Simulator::new(base)?;
    let true_avg = simulator.graph().true_avg();

    let runs = if let Some(algorithm) = args.algorithm {
        vec![simulator.run(&SimulationConfig {
            algorithm,
            ..sim_config
        })?]
    } else {
        let (sync_run, async_run) = simulator.run_both(sim_config)?;
        vec![sync_run, async_run]
    };

    println!("\n=== Consensus Comparison ===");
    println!("True average:  {true_avg:.6}");
    for run in &runs {
        let report = RunReport::from_result(run, simulator.graph());
        println!(
            "{:<13} {:>6} iterations, final avg {:.6}",
            format!("{}:", report.algorithm),
            report.total_iterations,
            report.final_avg
        );
    }

    if let Some(path) = &args.export {
        export_runs(&runs, path)?;
    }

    Ok(())
}
