/// Frequency counts over raw integer game scores.
///
/// Unlike a binned float histogram, game scores are small non-negative
/// integers, so the histogram stores one exact count per score value,
/// densely indexed from zero up to the highest observed score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreHistogram {
    counts: Vec<u64>,
    total: u64,
}

impl ScoreHistogram {
    /// Builds a histogram from raw scores.
    ///
    /// # Examples
    ///
    /// ```
    /// # use serpevo_stats::histogram::ScoreHistogram;
    /// let histogram = ScoreHistogram::new([0, 0, 3, 1]);
    /// assert_eq!(histogram.count(0), 2);
    /// assert_eq!(histogram.count(2), 0);
    /// assert_eq!(histogram.total(), 4);
    /// ```
    #[must_use]
    pub fn new<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut histogram = Self::default();
        for score in scores {
            histogram.add(score);
        }
        histogram
    }

    /// Records one occurrence of `score`.
    pub fn add(&mut self, score: usize) {
        if self.counts.len() <= score {
            self.counts.resize(score + 1, 0);
        }
        self.counts[score] += 1;
        self.total += 1;
    }

    /// Returns how many times `score` was recorded.
    #[must_use]
    pub fn count(&self, score: usize) -> u64 {
        self.counts.get(score).copied().unwrap_or(0)
    }

    /// Returns the highest recorded score, or `None` for an empty histogram.
    #[must_use]
    pub fn max_score(&self) -> Option<usize> {
        self.counts.iter().rposition(|&count| count > 0)
    }

    /// Returns the total number of recorded scores.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Iterates over `(score, count)` pairs, including zero counts below the
    /// maximum observed score.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().copied().enumerate()
    }

    /// Returns the dense per-score counts, indexed by score.
    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }
}

impl<'a> IntoIterator for &'a ScoreHistogram {
    type Item = (usize, u64);
    type IntoIter = std::iter::Enumerate<std::iter::Copied<std::slice::Iter<'a, u64>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram() {
        let histogram = ScoreHistogram::new([]);
        assert_eq!(histogram.total(), 0);
        assert_eq!(histogram.max_score(), None);
        assert_eq!(histogram.count(0), 0);
    }

    #[test]
    fn test_counts_are_exact() {
        let histogram = ScoreHistogram::new([2, 2, 2, 5, 0]);
        assert_eq!(histogram.count(0), 1);
        assert_eq!(histogram.count(1), 0);
        assert_eq!(histogram.count(2), 3);
        assert_eq!(histogram.count(5), 1);
        assert_eq!(histogram.max_score(), Some(5));
        assert_eq!(histogram.total(), 5);
    }

    #[test]
    fn test_iter_includes_gaps() {
        let histogram = ScoreHistogram::new([0, 2]);
        let pairs: Vec<_> = histogram.iter().collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0), (2, 1)]);
    }
}
