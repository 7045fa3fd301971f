//! Population management and parallel fitness evaluation.
//!
//! This crate connects the game engine to the neural networks:
//!
//! - [`ArchitectureConfig`] fixes everything that must stay identical across
//!   a population (grid size, vision encoding, network topology) so that
//!   genomes remain interchangeable between individuals and generations.
//! - [`Population`] holds the individuals keyed by their stable ids and
//!   exposes the genome views the genetic algorithm operates on.
//! - [`NetworkController`] turns a network's three outputs into the next
//!   absolute direction.
//! - [`evaluate_population`] runs one fresh simulation per individual on a
//!   bounded pool of scoped threads and collects the run statistics.
//!
//! The crate knows nothing about selection or crossover; it only measures.

pub use self::{architecture::*, controller::*, evaluate::*, population::*};

mod architecture;
mod controller;
mod evaluate;
mod population;
