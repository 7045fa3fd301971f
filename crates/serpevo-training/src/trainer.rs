use std::{
    fs, io,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, Sender, channel},
    },
    thread::{self, JoinHandle},
};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serpevo_engine::{MIN_GRID_EDGE, SetupError};
use serpevo_evaluator::{ArchitectureConfig, Population, evaluate_population};
use serpevo_neural::{GenomeSizeError, TopologyError};
use serpevo_storage::{
    IndividualRecord, LoadError, PopulationRecord, SaveError, load_population, save_individual,
    save_population,
};

use crate::{
    Crossover, FitnessFunction, GaConfigError, GenerationStats, GeneticAlgorithm, Mutation,
    Replacement, Selection,
};

/// Everything a training run needs, from grid shape to operator rates.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub architecture: ArchitectureConfig,
    pub population_size: usize,
    /// Worker threads used for fitness evaluation.
    pub concurrency: usize,
    pub fitness: FitnessFunction,
    pub selection: Selection,
    pub crossover: Crossover,
    pub crossover_rate: f64,
    pub mutation: Mutation,
    pub offspring: usize,
    pub replacement: Replacement,
    pub model_name: String,
    pub output_dir: PathBuf,
    /// Stop after this many generations; `None` runs until [`TrainingHandle::stop`].
    pub generations: Option<usize>,
    pub seed: u64,
    /// Optional population checkpoint whose genomes seed the initial
    /// population. Ids beyond the new population size are ignored.
    pub resume: Option<PathBuf>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            architecture: ArchitectureConfig::default(),
            population_size: 100,
            concurrency: 4,
            fitness: FitnessFunction::Composite,
            selection: Selection::Tournament { size: 3 },
            crossover: Crossover::Sbx { eta: 100.0 },
            crossover_rate: 0.8,
            mutation: Mutation::Gaussian {
                rate: 0.05,
                sigma: 0.2,
            },
            offspring: 60,
            replacement: Replacement::FitnessBased,
            model_name: "snake".into(),
            output_dir: "models".into(),
            generations: None,
            seed: 0,
            resume: None,
        }
    }
}

impl TrainerConfig {
    fn individual_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.model_name))
    }

    fn population_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_population.json", self.model_name))
    }
}

/// Training could not start.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainerError {
    #[display("invalid network topology")]
    Topology(TopologyError),
    #[display("invalid genetic operator configuration")]
    Config(GaConfigError),
    #[display("unsupported grid size")]
    Setup(SetupError),
    #[display("failed to load the resume checkpoint")]
    Resume(LoadError),
    #[display("resume checkpoint does not match the configured architecture")]
    Incompatible(GenomeSizeError),
    #[display("failed to prepare the training environment")]
    Io(io::Error),
}

/// A handle on a background training run.
///
/// Reports arrive once per finished generation; the channel closes when the
/// run ends. [`stop`](Self::stop) is coarse: the generation in flight still
/// finishes and is checkpointed.
#[derive(Debug)]
pub struct TrainingHandle {
    reports: Receiver<GenerationStats>,
    stop: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

impl TrainingHandle {
    #[must_use]
    pub fn reports(&self) -> &Receiver<GenerationStats> {
        &self.reports
    }

    /// Asks the run to end after the current generation.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Blocks until the run has ended.
    pub fn join(self) {
        drop(self.reports);
        let _ = self.thread.join();
    }
}

/// The generation loop: evaluate, evolve, checkpoint, report.
#[derive(Debug)]
pub struct Trainer {
    config: TrainerConfig,
    algorithm: GeneticAlgorithm,
    population: Population,
    rng: Pcg32,
    generation: usize,
}

impl Trainer {
    /// Validates the configuration and starts training on a background
    /// thread.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError`] for an invalid topology or operator
    /// configuration, an undersized grid, an unreadable or incompatible
    /// resume checkpoint, or a failure to create the output directory.
    pub fn spawn(config: TrainerConfig) -> Result<TrainingHandle, TrainerError> {
        let architecture = &config.architecture;
        if architecture.rows < MIN_GRID_EDGE || architecture.cols < MIN_GRID_EDGE {
            return Err(SetupError {
                rows: architecture.rows,
                cols: architecture.cols,
            }
            .into());
        }
        let algorithm = GeneticAlgorithm::new(
            config.fitness,
            config.selection,
            config.crossover,
            config.crossover_rate,
            config.mutation,
            config.offspring,
            config.replacement,
        )?;

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let mut population =
            Population::random(architecture.clone(), config.population_size, &mut rng)?;
        let mut generation = 0;
        if let Some(path) = &config.resume {
            let record = load_population(path)?;
            population.apply_genomes(&record.genomes)?;
            generation = record.generation;
        }
        fs::create_dir_all(&config.output_dir)?;

        let trainer = Self {
            config,
            algorithm,
            population,
            rng,
            generation,
        };
        let stop = Arc::new(AtomicBool::new(false));
        let (sender, reports) = channel();
        let thread = {
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("training".into())
                .spawn(move || trainer.run(&stop, &sender))?
        };
        Ok(TrainingHandle {
            reports,
            stop,
            thread,
        })
    }

    fn run(mut self, stop: &AtomicBool, reports: &Sender<GenerationStats>) {
        let mut remaining = self.config.generations;
        while !stop.load(Ordering::Relaxed) {
            if let Some(0) = remaining {
                break;
            }
            match self.step() {
                Ok(stats) => {
                    if reports.send(stats).is_err() {
                        // nobody is listening anymore
                        break;
                    }
                }
                Err(err) => {
                    eprintln!("training stopped: {err}");
                    break;
                }
            }
            remaining = remaining.map(|n| n - 1);
        }
    }

    /// Runs one full generation and checkpoints its results.
    fn step(&mut self) -> Result<GenerationStats, SetupError> {
        let seed = self
            .config
            .seed
            .wrapping_add((self.generation as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15));
        let scores =
            evaluate_population(&mut self.population, self.config.concurrency, seed)?;

        let mut genomes = self.population.genomes();
        let (best_id, fitness) =
            self.algorithm
                .next_generation(&mut genomes, &scores, &mut self.rng);

        // snapshot the ranked best before its genome can be overwritten
        if let Some(individual) = self.population.get(best_id) {
            let record = IndividualRecord::snapshot(self.population.config(), individual);
            log_save_failure(save_individual(self.config.individual_path(), &record));
        }
        if self.population.apply_genomes(&genomes).is_err() {
            // the algorithm preserves genome lengths, so this only trips
            // if a caller handed us a foreign genome map
            eprintln!("warning: skipped applying incompatible genomes");
        }
        self.generation += 1;
        let record = PopulationRecord::new(
            self.population.config().clone(),
            genomes,
            self.generation,
        );
        log_save_failure(save_population(self.config.population_path(), &record));

        Ok(GenerationStats::summarize(self.generation, &scores, &fitness))
    }
}

fn log_save_failure(result: Result<(), SaveError>) {
    if let Err(err) = result {
        eprintln!("warning: checkpoint not written: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config(dir: &std::path::Path) -> TrainerConfig {
        TrainerConfig {
            architecture: ArchitectureConfig {
                hidden: vec![4],
                ..ArchitectureConfig::default()
            },
            population_size: 4,
            concurrency: 2,
            offspring: 2,
            generations: Some(2),
            model_name: "test".into(),
            output_dir: dir.to_path_buf(),
            seed: 9,
            ..TrainerConfig::default()
        }
    }

    #[test]
    fn test_bounded_run_reports_every_generation() {
        let dir = tempfile::tempdir().unwrap();
        let handle = Trainer::spawn(tiny_config(dir.path())).unwrap();
        let reports: Vec<_> = handle.reports().iter().collect();
        handle.join();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].generation, 1);
        assert_eq!(reports[1].generation, 2);
        assert!(dir.path().join("test.json").exists());
        assert!(dir.path().join("test_population.json").exists());
    }

    #[test]
    fn test_resume_continues_the_generation_count() {
        let dir = tempfile::tempdir().unwrap();
        let first = Trainer::spawn(tiny_config(dir.path())).unwrap();
        let _ = first.reports().iter().count();
        first.join();

        let mut config = tiny_config(dir.path());
        config.generations = Some(1);
        config.resume = Some(dir.path().join("test_population.json"));
        let second = Trainer::spawn(config).unwrap();
        let reports: Vec<_> = second.reports().iter().collect();
        second.join();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].generation, 3);
    }

    #[test]
    fn test_stop_ends_an_unbounded_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = tiny_config(dir.path());
        config.generations = None;
        let handle = Trainer::spawn(config).unwrap();
        let first = handle.reports().recv().unwrap();
        assert_eq!(first.generation, 1);
        handle.stop();
        handle.join();
    }

    #[test]
    fn test_missing_resume_checkpoint_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = tiny_config(dir.path());
        config.resume = Some(dir.path().join("absent.json"));
        let err = Trainer::spawn(config).unwrap_err();
        assert!(matches!(err, TrainerError::Resume(LoadError::NotFound)));
    }

    #[test]
    fn test_undersized_grid_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = tiny_config(dir.path());
        config.architecture.rows = 5;
        let err = Trainer::spawn(config).unwrap_err();
        assert!(matches!(err, TrainerError::Setup(_)));
    }
}
