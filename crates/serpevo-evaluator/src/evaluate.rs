use std::{
    collections::BTreeMap,
    panic::{self, AssertUnwindSafe},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use serpevo_engine::{Controller, MIN_GRID_EDGE, RunStats, SetupError, Simulation, SimulationMode};
use serpevo_neural::NeuralNetwork;

use crate::{ArchitectureConfig, NetworkController, Population};

/// Runs one fresh simulation per individual and records the results.
///
/// Work is distributed over at most `concurrency` scoped threads pulling
/// from a shared atomic index, so a population larger than the thread
/// budget is evaluated in waves. Each individual's simulation is seeded
/// with `seed + id`, making a whole generation reproducible.
///
/// A panicking run is isolated and scored with fresh worst-case stats
/// instead of tearing down the generation. Results are stored back into the
/// population and returned keyed by id.
///
/// # Errors
///
/// Returns [`SetupError`] when the configured grid is below the supported
/// minimum; no simulation is started in that case.
pub fn evaluate_population(
    population: &mut Population,
    concurrency: usize,
    seed: u64,
) -> Result<BTreeMap<u32, RunStats>, SetupError> {
    let config = population.config().clone();
    if config.rows < MIN_GRID_EDGE || config.cols < MIN_GRID_EDGE {
        return Err(SetupError {
            rows: config.rows,
            cols: config.cols,
        });
    }

    let jobs: Vec<(u32, NeuralNetwork)> = population
        .individuals()
        .map(|individual| (individual.id(), individual.network().clone()))
        .collect();
    let next_job = AtomicUsize::new(0);
    let results = Mutex::new(BTreeMap::new());

    thread::scope(|s| {
        for _ in 0..concurrency.max(1).min(jobs.len().max(1)) {
            s.spawn(|| {
                loop {
                    let index = next_job.fetch_add(1, Ordering::Relaxed);
                    let Some((id, network)) = jobs.get(index) else {
                        break;
                    };
                    let run = panic::catch_unwind(AssertUnwindSafe(|| {
                        run_individual(&config, network.clone(), seed.wrapping_add(u64::from(*id)))
                    }));
                    let stats = run.unwrap_or_else(|_| RunStats::new(config.max_score()));
                    if let Ok(mut results) = results.lock() {
                        results.insert(*id, stats);
                    }
                }
            });
        }
    });

    let results = results.into_inner().unwrap_or_default();
    for (&id, stats) in &results {
        population.set_stats(id, stats.clone());
    }
    Ok(results)
}

/// Plays one game to a terminal state under network control.
fn run_individual(config: &ArchitectureConfig, network: NeuralNetwork, seed: u64) -> RunStats {
    let simulation = Simulation::new(
        config.rows,
        config.cols,
        SimulationMode::Auto,
        config.vision,
        config.metric,
        seed,
    );
    let Ok(mut simulation) = simulation else {
        return RunStats::new(config.max_score());
    };
    let mut controller = NetworkController::new(network);
    while simulation.state().is_alive() {
        let direction = controller.next_direction(simulation.heading(), simulation.vision());
        simulation.tick(direction);
    }
    simulation.into_stats()
}
