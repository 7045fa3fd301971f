//! Deterministic snake game engine used as the fitness oracle for training.
//!
//! This crate owns everything that happens on the grid:
//!
//! - [`Grid`] / [`Pos`] / [`Direction`] - occupancy matrix and geometry
//! - [`VisionMode`] / [`DistanceMetric`] - encoding of the grid state into
//!   the fixed-length input vector a network consumes
//! - [`shortest_path`] - A* search used only to measure move efficiency
//! - [`Simulation`] - the per-tick state machine for one game instance,
//!   with [`RunStats`] collected along the way
//! - [`Controller`] - the seam through which a brain (human input or a
//!   neural network) steers a simulation
//!
//! The engine knows nothing about networks or genetic algorithms; it consumes
//! a direction per tick and produces a terminal [`SimulationState`] plus
//! statistics. Apple placement is the only source of randomness and is driven
//! by a seeded [`rand_pcg::Pcg32`] stream, so a whole run is reproducible
//! from `(grid size, seed, direction sequence)`.

pub use self::{direction::*, grid::*, path::*, run_stats::*, simulation::*, vision::*};

mod direction;
mod grid;
mod path;
mod run_stats;
mod simulation;
mod vision;

/// Minimum supported grid edge length.
pub const MIN_GRID_EDGE: usize = 10;

/// Requested simulation grid is smaller than the supported minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("minimum supported grid is {MIN_GRID_EDGE}x{MIN_GRID_EDGE}, got {rows}x{cols}")]
pub struct SetupError {
    pub rows: usize,
    pub cols: usize,
}
