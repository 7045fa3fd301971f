use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    Cell, Direction, DistanceMetric, Grid, MIN_GRID_EDGE, Pos, RunStats, SetupError, VisionMode,
    shortest_path,
};

/// Moves available before the first apple is eaten.
const INITIAL_MOVE_BUDGET: usize = 100;
/// Moves granted after each eaten apple.
const REPLENISHED_MOVE_BUDGET: usize = 150;

/// How a simulation is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    /// Interactive play: no move budget, no vision vector.
    Human,
    /// Training and evaluation: move budgets are enforced and the vision
    /// vector is recomputed after every surviving tick.
    Auto,
}

/// Lifecycle of one simulation. All non-`Alive` states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SimulationState {
    Alive,
    /// The head left the grid or ran into the body.
    Collided,
    /// Every cell of the grid is filled.
    Completed,
    /// The move budget ran out before the next apple.
    Exhausted,
}

/// One cell of the snake body.
///
/// `pending_turn` marks the direction change that happened on this cell;
/// trailing segments consume it as they pass. It only matters for rendering
/// and is carried here so the body is the single source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub pos: Pos,
    pub direction: Direction,
    pub pending_turn: Option<Direction>,
}

/// The seam between a simulation and whatever brain steers it.
pub trait Controller {
    /// Picks the next absolute direction given the current heading and the
    /// latest vision vector.
    fn next_direction(&mut self, heading: Direction, vision: &[f32]) -> Direction;
}

/// The per-tick state machine for one game instance.
///
/// Apple placement is the only randomness and comes from a [`Pcg32`] stream
/// seeded at construction, so identical `(size, seed, direction sequence)`
/// triples replay identically.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    mode: SimulationMode,
    vision_mode: VisionMode,
    metric: DistanceMetric,
    /// Head-first.
    body: VecDeque<Segment>,
    apple: Pos,
    state: SimulationState,
    budget: usize,
    /// Shortest-path length to the current apple, measured when the apple
    /// appeared. Zero when the apple was unreachable at that moment.
    cached_path_len: usize,
    stats: RunStats,
    vision: Vec<f32>,
    rng: Pcg32,
}

impl Simulation {
    /// Creates a fresh game: a 3-segment snake centered on the grid facing
    /// up, one apple in a uniformly random free cell.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] when either edge is below [`MIN_GRID_EDGE`].
    #[expect(clippy::cast_possible_wrap)]
    pub fn new(
        rows: usize,
        cols: usize,
        mode: SimulationMode,
        vision_mode: VisionMode,
        metric: DistanceMetric,
        seed: u64,
    ) -> Result<Self, SetupError> {
        if rows < MIN_GRID_EDGE || cols < MIN_GRID_EDGE {
            return Err(SetupError { rows, cols });
        }

        let mut grid = Grid::new(rows, cols);
        let head = Pos::new(rows as i32 / 2, cols as i32 / 2);
        let body: VecDeque<_> = (0..3)
            .map(|i| Segment {
                pos: head.offset(i, 0),
                direction: Direction::Up,
                pending_turn: None,
            })
            .collect();
        grid.set(head, Cell::Head);
        grid.set(head.offset(1, 0), Cell::Body);
        grid.set(head.offset(2, 0), Cell::Body);

        let mut simulation = Self {
            grid,
            mode,
            vision_mode,
            metric,
            body,
            apple: head,
            state: SimulationState::Alive,
            budget: INITIAL_MOVE_BUDGET,
            cached_path_len: 0,
            stats: RunStats::new(rows * cols - 3),
            vision: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        simulation.spawn_apple();
        if mode == SimulationMode::Auto {
            simulation.refresh_vision();
        }
        Ok(simulation)
    }

    #[must_use]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Direction the head is currently moving.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.body[0].direction
    }

    #[must_use]
    pub fn apple(&self) -> Pos {
        self.apple
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Head-first body segments.
    #[must_use]
    pub fn body(&self) -> &VecDeque<Segment> {
        &self.body
    }

    #[must_use]
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Consumes the simulation, keeping only the run statistics.
    #[must_use]
    pub fn into_stats(self) -> RunStats {
        self.stats
    }

    /// The latest network input vector. Empty in [`SimulationMode::Human`].
    #[must_use]
    pub fn vision(&self) -> &[f32] {
        &self.vision
    }

    /// Advances the game by one step in `direction`.
    ///
    /// Checks run in a fixed order: collision, then budget exhaustion, then
    /// apple consumption, then the plain move. Once a terminal state is
    /// reached further calls return it unchanged.
    pub fn tick(&mut self, direction: Direction) -> SimulationState {
        if !self.state.is_alive() {
            return self.state;
        }

        let old_heading = self.heading();
        let turn = direction != old_heading;
        let new_head = self.body[0].pos.stepped(direction);

        if !self.grid.contains(new_head) || self.grid.get(new_head).is_body() {
            return self.finish(SimulationState::Collided);
        }
        if self.mode == SimulationMode::Auto && self.budget == 0 {
            return self.finish(SimulationState::Exhausted);
        }

        if turn {
            self.body[0].pending_turn = Some(direction);
        }
        self.grid.set(self.body[0].pos, Cell::Body);
        self.body.push_front(Segment {
            pos: new_head,
            direction,
            pending_turn: None,
        });
        self.grid.set(new_head, Cell::Head);

        if new_head == self.apple {
            self.stats.record_scoring_move(turn, self.cached_path_len);
            self.budget = REPLENISHED_MOVE_BUDGET;
            if self.stats.completed() {
                return self.finish(SimulationState::Completed);
            }
            self.spawn_apple();
        } else {
            if let Some(tail) = self.body.pop_back() {
                self.grid.set(tail.pos, Cell::Empty);
            }
            if self.mode == SimulationMode::Auto {
                self.budget -= 1;
            }
            self.stats.record_move(turn);
            if self.cached_path_len == 0 {
                self.cached_path_len = self.path_len_to_apple();
            }
        }

        if self.mode == SimulationMode::Auto {
            self.refresh_vision();
        }
        self.state
    }

    fn finish(&mut self, state: SimulationState) -> SimulationState {
        self.state = state;
        self.stats.finalize();
        state
    }

    /// Places a new apple in a uniformly random free cell and remeasures the
    /// shortest path to it.
    fn spawn_apple(&mut self) {
        let free = self.grid.free_cells();
        debug_assert!(!free.is_empty());
        self.apple = free[self.rng.random_range(0..free.len())];
        self.grid.set(self.apple, Cell::Apple);
        self.cached_path_len = self.path_len_to_apple();
    }

    fn path_len_to_apple(&self) -> usize {
        shortest_path(&self.grid, self.body[0].pos, self.apple, self.metric).len()
    }

    fn refresh_vision(&mut self) {
        let tail_direction = self.body[self.body.len() - 1].direction;
        self.vision = self.vision_mode.encode(
            &self.grid,
            self.body[0].pos,
            self.heading(),
            tail_direction,
            self.apple,
            self.metric,
        );
    }
}
