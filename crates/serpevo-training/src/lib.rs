//! Genetic-algorithm training for snake-playing networks.
//!
//! One generation flows through these stages:
//!
//! 1. every individual plays a game ([`serpevo_evaluator`]) and gets
//!    [`RunStats`](serpevo_engine::RunStats);
//! 2. a [`FitnessFunction`] folds each run into a scalar;
//! 3. a [`Selection`] operator draws parents, [`couple`] pairs them;
//! 4. a [`Crossover`] operator and [`Mutation`] produce the children;
//! 5. the children overwrite the lowest-fitness genomes
//!    ([`GeneticAlgorithm::next_generation`]).
//!
//! [`Trainer`] runs that cycle on a background thread, checkpointing the
//! best individual and the whole population every generation and streaming
//! one [`GenerationStats`] report per generation over an mpsc channel.

pub use self::{
    crossover::*, fitness::*, generation::*, genetic::*, mutation::*, selection::*, trainer::*,
};

mod crossover;
mod fitness;
mod generation;
mod genetic;
mod mutation;
mod selection;
mod trainer;

/// An operator combination that can never produce a valid generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GaConfigError {
    /// Tournament selection needs at least two contenders per draw.
    #[display("tournament size must be at least 2, got {size}")]
    TournamentSize { size: usize },
    /// Coupling consumes parents two at a time.
    #[display("cannot couple an odd number of parents ({count})")]
    OddParents { count: usize },
}
