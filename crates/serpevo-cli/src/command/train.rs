use std::{path::PathBuf, str::FromStr};

use anyhow::Context as _;
use serpevo_engine::{DistanceMetric, VisionMode};
use serpevo_evaluator::ArchitectureConfig;
use serpevo_neural::{Activation, WeightInit};
use serpevo_training::{
    Crossover, FitnessFunction, Mutation, Replacement, Selection, Trainer, TrainerConfig,
};

/// Selection operator name; sizes and rates come from their own flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionKind {
    StochasticUniversal,
    RouletteWheel,
    Tournament,
}

impl FromStr for SelectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sus" | "stochastic-universal" => Ok(Self::StochasticUniversal),
            "roulette" | "roulette-wheel" => Ok(Self::RouletteWheel),
            "tournament" => Ok(Self::Tournament),
            _ => Err(format!("unknown selection operator: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrossoverKind {
    Uniform,
    SinglePointArithmetic,
    WholeArithmetic,
    Sbx,
}

impl FromStr for CrossoverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(Self::Uniform),
            "single-point-arithmetic" => Ok(Self::SinglePointArithmetic),
            "whole-arithmetic" => Ok(Self::WholeArithmetic),
            "sbx" => Ok(Self::Sbx),
            _ => Err(format!("unknown crossover operator: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FitnessKind {
    Composite,
    ScoreMoves,
}

impl FromStr for FitnessKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "composite" => Ok(Self::Composite),
            "score-moves" => Ok(Self::ScoreMoves),
            _ => Err(format!("unknown fitness function: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplacementKind {
    FitnessBased,
    Generational,
}

impl FromStr for ReplacementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fitness-based" => Ok(Self::FitnessBased),
            "generational" => Ok(Self::Generational),
            _ => Err(format!("unknown replacement strategy: {s}")),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Grid rows
    #[arg(long, default_value_t = 10)]
    rows: usize,
    /// Grid columns
    #[arg(long, default_value_t = 10)]
    cols: usize,
    /// Vision encoding (binary or real)
    #[arg(long, default_value = "binary")]
    vision: VisionMode,
    /// Distance metric for rays and path lengths
    #[arg(long, default_value = "inversestep")]
    metric: DistanceMetric,
    /// Hidden layer sizes
    #[arg(long, value_delimiter = ',', default_values_t = [16, 8])]
    hidden: Vec<usize>,
    #[arg(long, default_value = "relu")]
    hidden_activation: Activation,
    #[arg(long, default_value = "softmax")]
    output_activation: Activation,
    #[arg(long, default_value = "he")]
    hidden_init: WeightInit,
    #[arg(long, default_value = "glorot")]
    output_init: WeightInit,
    /// Give every layer a trainable bias column
    #[arg(long)]
    bias: bool,
    #[arg(long, default_value_t = 100)]
    population: usize,
    /// Evaluation worker threads
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
    #[arg(long, default_value = "composite")]
    fitness: FitnessKind,
    /// Exponent on the score term of score-moves
    #[arg(long, default_value_t = 3.0)]
    score_exp: f64,
    /// Divisor on the moves term of score-moves
    #[arg(long, default_value_t = 100.0)]
    moves_div: f64,
    /// Exponent on the moves term of score-moves
    #[arg(long, default_value_t = 2.0)]
    moves_exp: f64,
    #[arg(long, default_value = "tournament")]
    selection: SelectionKind,
    #[arg(long, default_value_t = 3)]
    tournament_size: usize,
    #[arg(long, default_value = "sbx")]
    crossover: CrossoverKind,
    /// Blend weight for the arithmetic crossovers
    #[arg(long, default_value_t = 0.4)]
    alpha: f32,
    /// Spread factor for simulated binary crossover
    #[arg(long, default_value_t = 100.0)]
    eta: f32,
    #[arg(long, default_value_t = 0.8)]
    crossover_rate: f64,
    /// Per-gene mutation probability
    #[arg(long, default_value_t = 0.05)]
    mutation_rate: f64,
    /// Gaussian mutation standard deviation
    #[arg(long, default_value_t = 0.2)]
    sigma: f32,
    /// Genomes replaced per generation
    #[arg(long, default_value_t = 60)]
    offspring: usize,
    #[arg(long, default_value = "fitness-based")]
    replacement: ReplacementKind,
    /// Model name used for the checkpoint files
    #[arg(long, default_value = "snake")]
    name: String,
    #[arg(long, default_value = "models")]
    output_dir: PathBuf,
    /// Stop after this many generations (runs until Ctrl-C otherwise)
    #[arg(long)]
    generations: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Population checkpoint to seed the initial genomes from
    #[arg(long)]
    resume: Option<PathBuf>,
}

impl TrainArg {
    fn trainer_config(&self) -> TrainerConfig {
        let fitness = match self.fitness {
            FitnessKind::Composite => FitnessFunction::Composite,
            FitnessKind::ScoreMoves => FitnessFunction::ScoreMoves {
                score_exp: self.score_exp,
                moves_div: self.moves_div,
                moves_exp: self.moves_exp,
            },
        };
        let selection = match self.selection {
            SelectionKind::StochasticUniversal => Selection::StochasticUniversal,
            SelectionKind::RouletteWheel => Selection::RouletteWheel,
            SelectionKind::Tournament => Selection::Tournament {
                size: self.tournament_size,
            },
        };
        let crossover = match self.crossover {
            CrossoverKind::Uniform => Crossover::Uniform,
            CrossoverKind::SinglePointArithmetic => Crossover::SinglePointArithmetic {
                alpha: self.alpha,
            },
            CrossoverKind::WholeArithmetic => Crossover::WholeArithmetic { alpha: self.alpha },
            CrossoverKind::Sbx => Crossover::Sbx { eta: self.eta },
        };
        let replacement = match self.replacement {
            ReplacementKind::FitnessBased => Replacement::FitnessBased,
            ReplacementKind::Generational => Replacement::Generational,
        };
        TrainerConfig {
            architecture: ArchitectureConfig {
                rows: self.rows,
                cols: self.cols,
                vision: self.vision,
                metric: self.metric,
                hidden: self.hidden.clone(),
                hidden_activation: self.hidden_activation,
                output_activation: self.output_activation,
                hidden_init: self.hidden_init,
                output_init: self.output_init,
                bias: self.bias,
            },
            population_size: self.population,
            concurrency: self.concurrency,
            fitness,
            selection,
            crossover,
            crossover_rate: self.crossover_rate,
            mutation: Mutation::Gaussian {
                rate: self.mutation_rate,
                sigma: self.sigma,
            },
            offspring: self.offspring,
            replacement,
            model_name: self.name.clone(),
            output_dir: self.output_dir.clone(),
            generations: self.generations,
            seed: self.seed,
            resume: self.resume.clone(),
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let handle = Trainer::spawn(arg.trainer_config()).context("failed to start training")?;
    for stats in handle.reports() {
        eprintln!(
            "Generation #{:<4} fitness avg {:>12.1} best {:>12.1} | score avg {:>5.2} max {:>3} \
             | moves avg {:>6.1} | efficiency avg {:.3} | completed {}",
            stats.generation,
            stats.avg_fitness,
            stats.best_fitness,
            stats.avg_score,
            stats.max_score,
            stats.avg_moves,
            stats.avg_efficiency,
            stats.completed,
        );
    }
    handle.join();
    Ok(())
}
