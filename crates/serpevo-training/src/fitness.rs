use std::collections::BTreeMap;

use serpevo_engine::RunStats;

/// Smallest value the composite formula will take a logarithm of.
const LOG_FLOOR: f64 = 1e-6;

/// Folds one run's statistics into a scalar fitness.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum FitnessFunction {
    /// `score^score_exp + (moves / moves_div)^moves_exp`: rewards eating
    /// first and surviving second.
    #[display("score_moves")]
    ScoreMoves {
        score_exp: f64,
        moves_div: f64,
        moves_exp: f64,
    },
    /// The richest historical formula, combining score, path efficiency,
    /// and a survival term discounted for aimless turning:
    /// `score^3.5 + (efficiency * max)^3.2
    ///  + (ln(moves - 0.7 * turns) - ln(60) + max)^3.3`.
    #[display("composite")]
    Composite,
}

impl FitnessFunction {
    /// Fitness of a single run.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate(&self, stats: &RunStats) -> f64 {
        let score = stats.score() as f64;
        let moves = stats.total_moves() as f64;
        match *self {
            Self::ScoreMoves {
                score_exp,
                moves_div,
                moves_exp,
            } => score.powf(score_exp) + (moves / moves_div).powf(moves_exp),
            Self::Composite => {
                let max = stats.max_score() as f64;
                let turns = stats.turns() as f64;
                let survival = 0.7f64.mul_add(-turns, moves).max(LOG_FLOOR).ln()
                    - 60.0f64.ln()
                    + max;
                score.powf(3.5)
                    + (stats.efficiency() * max).powf(3.2)
                    + survival.powf(3.3)
            }
        }
    }

    /// Fitness of every run, keyed by individual id.
    #[must_use]
    pub fn fitness_map(&self, scores: &BTreeMap<u32, RunStats>) -> BTreeMap<u32, f64> {
        scores
            .iter()
            .map(|(&id, stats)| (id, self.evaluate(stats)))
            .collect()
    }
}
