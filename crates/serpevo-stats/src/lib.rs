//! Statistical summaries used by the serpevo training reports.
//!
//! This crate provides the two aggregations the trainer publishes every
//! generation:
//!
//! - [`descriptive::DescriptiveStats`]: min/max/mean/median/standard deviation
//!   over a set of `f64` values (fitness, moves, efficiency, ...)
//! - [`histogram::ScoreHistogram`]: exact per-score frequency counts over raw
//!   integer game scores
//!
//! # Examples
//!
//! ```
//! use serpevo_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ```
//! use serpevo_stats::histogram::ScoreHistogram;
//!
//! let histogram = ScoreHistogram::new([0, 2, 2, 5]);
//! assert_eq!(histogram.count(2), 2);
//! assert_eq!(histogram.max_score(), Some(5));
//! ```

pub mod descriptive;
pub mod histogram;
