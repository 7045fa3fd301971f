use std::path::PathBuf;

use anyhow::Context as _;
use serpevo_engine::{Controller as _, Simulation, SimulationMode};
use serpevo_evaluator::NetworkController;
use serpevo_neural::NeuralNetwork;
use serpevo_stats::descriptive::DescriptiveStats;
use serpevo_storage::load_individual;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Saved individual to replay
    model: PathBuf,
    /// Number of headless games
    #[arg(long, default_value_t = 100)]
    runs: usize,
    #[arg(long, default_value_t = 10)]
    rows: usize,
    #[arg(long, default_value_t = 10)]
    cols: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let record = load_individual(&arg.model)
        .with_context(|| format!("failed to load model from {}", arg.model.display()))?;
    let mut rng = rand::rng();
    let mut network = NeuralNetwork::new(record.topology.clone(), &mut rng)
        .context("saved topology is invalid")?;
    network
        .apply_genome(&record.genome)
        .context("saved genome does not fit its topology")?;

    let mut scores = Vec::with_capacity(arg.runs);
    let mut moves = Vec::with_capacity(arg.runs);
    for run in 0..arg.runs {
        let mut simulation = Simulation::new(
            arg.rows,
            arg.cols,
            SimulationMode::Auto,
            record.vision,
            record.metric,
            arg.seed.wrapping_add(run as u64),
        )
        .context("unsupported grid size")?;
        let mut controller = NetworkController::new(network.clone());
        while simulation.state().is_alive() {
            let direction = controller.next_direction(simulation.heading(), simulation.vision());
            simulation.tick(direction);
        }
        let stats = simulation.into_stats();
        #[expect(clippy::cast_precision_loss)]
        scores.push(stats.score() as f64);
        #[expect(clippy::cast_precision_loss)]
        moves.push(stats.total_moves() as f64);
    }

    print_stats("score", &scores);
    print_stats("moves", &moves);
    Ok(())
}

fn print_stats(label: &str, values: &[f64]) {
    if let Some(stats) = DescriptiveStats::new(values.iter().copied()) {
        println!(
            "{label:>6}: min {:>7.1} max {:>7.1} mean {:>8.2} median {:>7.1} stddev {:>8.2}",
            stats.min, stats.max, stats.mean, stats.median, stats.std_dev,
        );
    }
}
