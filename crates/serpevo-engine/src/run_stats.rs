use serde::{Deserialize, Serialize};

/// Performance statistics for one simulation run.
///
/// Mutated tick by tick and finalized exactly once when the simulation
/// reaches a terminal state. The score is non-decreasing and never exceeds
/// `max_score = rows * cols - 3` (the whole grid minus the starting body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    score: usize,
    max_score: usize,
    total_moves: usize,
    turns: usize,
    moves_since_apple: usize,
    efficiency_samples: Vec<f64>,
    accuracy: f64,
    efficiency: f64,
}

impl RunStats {
    /// Creates zeroed statistics for a grid supporting `max_score` apples.
    ///
    /// A fresh value doubles as the sentinel worst-case entry recorded for
    /// individuals whose evaluation failed.
    #[must_use]
    pub fn new(max_score: usize) -> Self {
        Self {
            score: 0,
            max_score,
            total_moves: 0,
            turns: 0,
            moves_since_apple: 0,
            efficiency_samples: Vec::new(),
            accuracy: 0.0,
            efficiency: 0.0,
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> usize {
        self.max_score
    }

    /// Total moves across the whole run, scoring and non-scoring.
    #[must_use]
    pub fn total_moves(&self) -> usize {
        self.total_moves
    }

    #[must_use]
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Fraction of the maximum score reached; 0 while the score is 0.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Mean shortest-path-to-moves ratio over all eaten apples; 0 when no
    /// apple was eaten.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Whether every cell of the grid has been filled.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.score == self.max_score
    }

    /// Records a non-scoring move.
    pub fn record_move(&mut self, turn: bool) {
        self.total_moves += 1;
        self.moves_since_apple += 1;
        if turn {
            self.turns += 1;
        }
    }

    /// Records the move that reached the apple.
    ///
    /// `shortest_path_len` is the cached minimal path length that was valid
    /// when the apple appeared; a sample `shortest / actual` is only taken
    /// when it is positive (a zero length means the apple was unreachable
    /// when the path was computed, so the run gets no efficiency credit).
    #[expect(clippy::cast_precision_loss)]
    pub fn record_scoring_move(&mut self, turn: bool, shortest_path_len: usize) {
        self.total_moves += 1;
        self.moves_since_apple += 1;
        if turn {
            self.turns += 1;
        }
        if shortest_path_len > 0 {
            self.efficiency_samples
                .push(shortest_path_len as f64 / self.moves_since_apple as f64);
        }
        self.score += 1;
        self.moves_since_apple = 0;
    }

    /// Computes the derived ratios; called on every terminal transition.
    #[expect(clippy::cast_precision_loss)]
    pub fn finalize(&mut self) {
        if self.score > 0 {
            self.accuracy = self.score as f64 / self.max_score as f64;
        }
        if !self.efficiency_samples.is_empty() {
            self.efficiency = self.efficiency_samples.iter().sum::<f64>()
                / self.efficiency_samples.len() as f64;
        }
    }
}
