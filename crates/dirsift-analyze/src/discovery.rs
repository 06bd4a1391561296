//! Driving a classification over a subtree.

use std::iter::FusedIterator;
use std::path::PathBuf;

use dirsift_core::{ClassifyError, FileNode, FileTree, NodeId, ThresholdConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::category::Category;
use crate::classifier::{Classifier, Criterion, ThresholdValue};
use crate::walk::Walk;

/// Lazy sequence of the items in a subtree that belong to a category.
///
/// The preparation pass has already run when this is created; pulling from
/// it performs the second walk. Dropping it early is fine.
#[derive(Debug, Clone)]
pub struct Classification<'a> {
    criterion: Criterion,
    walk: Walk<'a>,
}

impl<'a> Classification<'a> {
    /// The prepared criterion items are checked against.
    pub fn criterion(&self) -> &Criterion {
        &self.criterion
    }
}

impl<'a> Iterator for Classification<'a> {
    type Item = &'a FileNode;

    fn next(&mut self) -> Option<Self::Item> {
        let criterion = &self.criterion;
        self.walk.find(|node| criterion.matches(node))
    }
}

impl FusedIterator for Classification<'_> {}

/// Runs classifications with a shared threshold config.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discovery {
    config: ThresholdConfig,
}

impl Discovery {
    /// Create a driver with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver with a custom config.
    pub fn with_config(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// The threshold config in use.
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// A fresh, unprepared classifier for `category`.
    pub fn classifier(&self, category: Category) -> Classifier {
        Classifier::with_config(category, self.config)
    }

    /// Classify `subtree`: prepare once, then walk lazily.
    ///
    /// Every call runs both phases again, so repeated calls over an
    /// unchanged tree yield the same sequence.
    pub fn classify<'a>(&self, category: Category, subtree: &'a FileNode) -> Classification<'a> {
        let criterion = self.classifier(category).prepare(subtree);
        Classification {
            criterion,
            walk: Walk::new(subtree),
        }
    }

    /// Classify the selected subtree of `tree`, or the whole tree when
    /// nothing is selected.
    pub fn classify_tree<'a>(
        &self,
        category: Category,
        tree: &'a FileTree,
        selection: Option<NodeId>,
    ) -> Result<Classification<'a>, ClassifyError> {
        let subtree = tree.subtree(selection)?;
        Ok(self.classify(category, subtree))
    }

    /// Classify `subtree` for every category, in parallel.
    ///
    /// Each category gets its own classifier; results are in category order.
    pub fn classify_all<'a>(&self, subtree: &'a FileNode) -> Vec<(Category, Vec<&'a FileNode>)> {
        let categories: Vec<Category> = Category::iter().collect();
        categories
            .into_par_iter()
            .map(|category| (category, self.classify(category, subtree).collect()))
            .collect()
    }

    /// Classify and collect the matches with their full paths.
    pub fn report(
        &self,
        category: Category,
        tree: &FileTree,
        selection: Option<NodeId>,
    ) -> Result<DiscoveryReport, ClassifyError> {
        let subtree = tree.subtree(selection)?;
        Ok(self.report_subtree(category, tree, subtree))
    }

    /// Like [`report`](Self::report), for a subtree the caller already
    /// holds (for example one found with [`FileTree::resolve`]).
    ///
    /// `subtree` must belong to `tree`; paths and parent sizes are looked
    /// up there.
    pub fn report_subtree(
        &self,
        category: Category,
        tree: &FileTree,
        subtree: &FileNode,
    ) -> DiscoveryReport {
        let classification = self.classify(category, subtree);
        let threshold = classification.criterion().threshold();
        let paths = tree.paths();
        let parent_sizes = tree.parent_sizes();
        let path_of = |node: &FileNode| {
            paths
                .get(&node.id)
                .cloned()
                .unwrap_or_else(|| PathBuf::from(node.name.as_str()))
        };

        let items: Vec<DiscoveredItem> = classification
            .map(|node| DiscoveredItem {
                id: node.id,
                path: path_of(node),
                size: node.size,
                parent_size: parent_sizes.get(&node.id).copied().unwrap_or(node.size),
                mtime: node.mtime,
                links: node.links(),
            })
            .collect();

        debug!(%category, matches = items.len(), "classification finished");

        DiscoveryReport {
            category,
            title: category.title().to_string(),
            subtree: path_of(subtree),
            threshold,
            items,
        }
    }
}

/// Classify `subtree` with the default config.
pub fn classify(category: Category, subtree: &FileNode) -> Classification<'_> {
    Discovery::new().classify(category, subtree)
}

/// A matched item with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredItem {
    /// Node id in the tree.
    pub id: NodeId,
    /// Full path.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Size of the owning node, or `size` itself for the root.
    pub parent_size: u64,
    /// Modification time in seconds since the Unix epoch.
    pub mtime: i64,
    /// Hard link count (files only).
    pub links: Option<u64>,
}

/// Results of one classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryReport {
    /// Category searched for.
    pub category: Category,
    /// Human-readable category title.
    pub title: String,
    /// Path of the classified subtree.
    pub subtree: PathBuf,
    /// Threshold used, for threshold categories.
    pub threshold: Option<ThresholdValue>,
    /// Matches in traversal order.
    pub items: Vec<DiscoveredItem>,
}

impl DiscoveryReport {
    /// Check if anything matched.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Combined size of all matches.
    pub fn total_size(&self) -> u64 {
        self.items.iter().map(|item| item.size).sum()
    }
}
