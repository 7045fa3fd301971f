/// Descriptive statistics summarizing a dataset.
///
/// Contains common measures of central tendency and dispersion for a
/// dataset of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The median value of the dataset.
    pub median: f64,
    /// The population standard deviation of the dataset.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// The values are collected and sorted internally.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use serpevo_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// Skips the sorting step. Use this when the data is already sorted.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending
    /// order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        debug_assert!(sorted_values.is_sorted_by(|a, b| a <= b));
        let (&min, &max) = (sorted_values.first()?, sorted_values.last()?);

        #[expect(clippy::cast_precision_loss)]
        let len = sorted_values.len() as f64;
        let mean = sorted_values.iter().sum::<f64>() / len;
        let median = {
            let mid = sorted_values.len() / 2;
            if sorted_values.len() % 2 == 0 {
                f64::midpoint(sorted_values[mid - 1], sorted_values[mid])
            } else {
                sorted_values[mid]
            }
        };
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / len;
        let std_dev = variance.sqrt();

        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev,
        })
    }
}
