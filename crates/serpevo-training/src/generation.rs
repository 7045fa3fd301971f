use std::collections::BTreeMap;

use serpevo_engine::RunStats;
use serpevo_stats::{descriptive::DescriptiveStats, histogram::ScoreHistogram};

/// One generation's summary, streamed to whoever watches the training run.
#[derive(Debug, Clone)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub avg_fitness: f64,
    pub avg_score: f64,
    pub avg_moves: f64,
    pub avg_efficiency: f64,
    pub max_score: usize,
    /// Individuals that filled the whole grid.
    pub completed: usize,
    pub histogram: ScoreHistogram,
}

impl GenerationStats {
    /// Summarizes one scored generation.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn summarize(
        generation: usize,
        scores: &BTreeMap<u32, RunStats>,
        fitness: &BTreeMap<u32, f64>,
    ) -> Self {
        let mean = |values: Vec<f64>| {
            DescriptiveStats::new(values).map_or(0.0, |stats| stats.mean)
        };
        let histogram = ScoreHistogram::new(scores.values().map(RunStats::score));
        Self {
            generation,
            best_fitness: fitness.values().copied().fold(0.0, f64::max),
            avg_fitness: mean(fitness.values().copied().collect()),
            avg_score: mean(scores.values().map(|s| s.score() as f64).collect()),
            avg_moves: mean(scores.values().map(|s| s.total_moves() as f64).collect()),
            avg_efficiency: mean(scores.values().map(RunStats::efficiency).collect()),
            max_score: scores.values().map(RunStats::score).max().unwrap_or(0),
            completed: scores.values().filter(|s| s.completed()).count(),
            histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(score: usize, moves: usize) -> RunStats {
        let mut stats = RunStats::new(97);
        for i in 0..moves {
            if i + score < moves {
                stats.record_move(false);
            } else {
                stats.record_scoring_move(false, 1);
            }
        }
        stats.finalize();
        stats
    }

    #[test]
    fn test_summarize_aggregates() {
        let scores: BTreeMap<u32, RunStats> =
            [(1, stats(2, 10)), (2, stats(4, 30))].into();
        let fitness: BTreeMap<u32, f64> = [(1, 5.0), (2, 15.0)].into();
        let summary = GenerationStats::summarize(7, &scores, &fitness);
        assert_eq!(summary.generation, 7);
        assert_eq!(summary.best_fitness, 15.0);
        assert_eq!(summary.avg_fitness, 10.0);
        assert_eq!(summary.avg_score, 3.0);
        assert_eq!(summary.avg_moves, 20.0);
        assert_eq!(summary.max_score, 4);
        assert_eq!(summary.completed, 0);
        assert_eq!(summary.histogram.count(2), 1);
        assert_eq!(summary.histogram.count(4), 1);
        assert_eq!(summary.histogram.count(3), 0);
    }

    #[test]
    fn test_empty_generation_is_all_zero() {
        let summary = GenerationStats::summarize(0, &BTreeMap::new(), &BTreeMap::new());
        assert_eq!(summary.avg_fitness, 0.0);
        assert_eq!(summary.max_score, 0);
        assert_eq!(summary.histogram.total(), 0);
    }
}
