//! Percentile threshold estimation over skewed distributions.
//!
//! File sizes and ages are heavily skewed: a handful of huge or ancient files
//! and a long tail of ordinary ones. Instead of a fixed "top N" list, the
//! threshold is the value at rank `min(cap, ceil(percentile * count))` in
//! the direction of interest. Small trees then match a fraction of their
//! files, huge trees about `cap` of them.
//!
//! Every file equal to the threshold value matches, so a classification can
//! return more than `cap` items when the boundary value is shared.

use dirsift_core::{FileNode, ThresholdConfig};
use tracing::debug;

use crate::walk;

/// Order in which values are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Largest values first (largest, newest).
    Descending,
    /// Smallest values first (oldest).
    Ascending,
}

/// A cutoff computed by a preparation pass.
///
/// Only [`ThresholdEstimator`] creates thresholds, so holding one proves the
/// preparation pass ran. An empty threshold is admitted by no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold<T>(Option<T>);

impl<T: Copy + Ord> Threshold<T> {
    /// The cutoff value, or `None` if nothing can match.
    pub fn value(&self) -> Option<T> {
        self.0
    }

    /// Whether no value can pass this threshold.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// `value >= threshold`.
    pub fn admits_at_least(&self, value: T) -> bool {
        self.0.is_some_and(|cutoff| value >= cutoff)
    }

    /// `value <= threshold`.
    pub fn admits_at_most(&self, value: T) -> bool {
        self.0.is_some_and(|cutoff| value <= cutoff)
    }
}

/// Computes category thresholds from the files of a subtree.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdEstimator {
    config: ThresholdConfig,
}

impl ThresholdEstimator {
    /// Create an estimator with the default cap and percentile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with a custom config.
    pub fn with_config(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// The config in use.
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Estimate the threshold of `metric` over every plain file in
    /// `subtree`, skipping excluded branches.
    pub fn estimate<T, F>(&self, subtree: &FileNode, direction: Direction, metric: F) -> Threshold<T>
    where
        T: Copy + Ord + std::fmt::Debug,
        F: Fn(&FileNode) -> T,
    {
        let values: Vec<T> = walk::files(subtree).map(metric).collect();
        self.estimate_values(values, direction)
    }

    /// Estimate the threshold of an already collected set of values.
    pub fn estimate_values<T>(&self, mut values: Vec<T>, direction: Direction) -> Threshold<T>
    where
        T: Copy + Ord + std::fmt::Debug,
    {
        let count = values.len();
        let rank = self.config.rank(count);
        if rank == 0 {
            debug!(count, "no values to rank, threshold is empty");
            return Threshold(None);
        }

        let (_, value, _) = match direction {
            Direction::Descending => values.select_nth_unstable_by(rank - 1, |a, b| b.cmp(a)),
            Direction::Ascending => values.select_nth_unstable(rank - 1),
        };
        let value = *value;

        debug!(count, rank, ?direction, threshold = ?value, "estimated threshold");
        Threshold(Some(value))
    }
}
