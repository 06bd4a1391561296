//! Category classifiers.
//!
//! Classification is a two-step protocol. A [`Classifier`] is the unprepared
//! state: it knows its category and how to estimate thresholds. Calling
//! [`Classifier::prepare`] walks the subtree once and yields a [`Criterion`],
//! the prepared state, which answers the cheap per-item question.
//!
//! Threshold-bearing criteria can only come out of `prepare`, so an item can
//! never be checked against a threshold that was not computed. The stateless
//! criteria are available directly through [`Criterion::stateless`].

use dirsift_core::{FileNode, NodeKind, ThresholdConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::Category;
use crate::threshold::{Direction, Threshold, ThresholdEstimator};

/// A threshold value as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdValue {
    /// Minimum size in bytes.
    Size(u64),
    /// Modification time cutoff in seconds since the Unix epoch.
    Modified(i64),
}

/// A prepared per-item predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Plain files at least as large as the threshold.
    MinSize(Threshold<u64>),
    /// Plain files modified at or after the threshold.
    MinModified(Threshold<i64>),
    /// Plain files modified at or before the threshold.
    MaxModified(Threshold<i64>),
    /// Plain files with more than one hard link.
    HardLinked,
    /// Symlinks whose target does not resolve.
    BrokenSymlink,
    /// Sparse plain files.
    Sparse,
}

impl Criterion {
    /// The criterion for a category that needs no preparation.
    ///
    /// Returns `None` for threshold categories, which must be prepared.
    pub fn stateless(category: Category) -> Option<Self> {
        match category {
            Category::HardLinkedFiles => Some(Criterion::HardLinked),
            Category::BrokenSymlinks => Some(Criterion::BrokenSymlink),
            Category::SparseFiles => Some(Criterion::Sparse),
            Category::LargestFiles | Category::NewestFiles | Category::OldestFiles => None,
        }
    }

    /// The category this criterion classifies.
    pub fn category(&self) -> Category {
        match self {
            Criterion::MinSize(_) => Category::LargestFiles,
            Criterion::MinModified(_) => Category::NewestFiles,
            Criterion::MaxModified(_) => Category::OldestFiles,
            Criterion::HardLinked => Category::HardLinkedFiles,
            Criterion::BrokenSymlink => Category::BrokenSymlinks,
            Criterion::Sparse => Category::SparseFiles,
        }
    }

    /// The computed threshold, for threshold categories that found one.
    pub fn threshold(&self) -> Option<ThresholdValue> {
        match self {
            Criterion::MinSize(t) => t.value().map(ThresholdValue::Size),
            Criterion::MinModified(t) | Criterion::MaxModified(t) => {
                t.value().map(ThresholdValue::Modified)
            }
            _ => None,
        }
    }

    /// Check whether `item` belongs to the category. Absent items never do.
    pub fn check(&self, item: Option<&FileNode>) -> bool {
        item.is_some_and(|item| self.matches(item))
    }

    /// Check whether `item` belongs to the category.
    pub fn matches(&self, item: &FileNode) -> bool {
        match (self, &item.kind) {
            (Criterion::MinSize(t), NodeKind::File { .. }) => t.admits_at_least(item.size),
            (Criterion::MinModified(t), NodeKind::File { .. }) => t.admits_at_least(item.mtime),
            (Criterion::MaxModified(t), NodeKind::File { .. }) => t.admits_at_most(item.mtime),
            (Criterion::HardLinked, NodeKind::File { links, .. }) => *links > 1,
            (Criterion::BrokenSymlink, NodeKind::Symlink { broken, .. }) => *broken,
            (Criterion::Sparse, NodeKind::File { sparse, .. }) => *sparse,
            _ => false,
        }
    }
}

/// An unprepared classifier for one category.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    category: Category,
    estimator: ThresholdEstimator,
}

impl Classifier {
    /// Create a classifier with the default threshold config.
    pub fn new(category: Category) -> Self {
        Self::with_config(category, ThresholdConfig::default())
    }

    /// Create a classifier with a custom threshold config.
    pub fn with_config(category: Category, config: ThresholdConfig) -> Self {
        Self {
            category,
            estimator: ThresholdEstimator::with_config(config),
        }
    }

    /// The category this classifier is for.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Run the preparation pass over `subtree`.
    ///
    /// Threshold categories visit every non-excluded file once; the others
    /// return immediately.
    pub fn prepare(&self, subtree: &FileNode) -> Criterion {
        let criterion = match self.category {
            Category::LargestFiles => Criterion::MinSize(self.estimator.estimate(
                subtree,
                Direction::Descending,
                |node| node.size,
            )),
            Category::NewestFiles => Criterion::MinModified(self.estimator.estimate(
                subtree,
                Direction::Descending,
                |node| node.mtime,
            )),
            Category::OldestFiles => Criterion::MaxModified(self.estimator.estimate(
                subtree,
                Direction::Ascending,
                |node| node.mtime,
            )),
            Category::HardLinkedFiles => Criterion::HardLinked,
            Category::BrokenSymlinks => Criterion::BrokenSymlink,
            Category::SparseFiles => Criterion::Sparse,
        };

        debug!(
            category = %self.category,
            subtree = %subtree.name,
            threshold = ?criterion.threshold(),
            "prepared classifier"
        );
        criterion
    }
}
