//! Category classification for dirsift.
//!
//! Answers "which items of this subtree belong to category C" for a fixed
//! set of categories:
//!
//! - **Largest files** - files at or above a size threshold
//! - **Newest / oldest files** - files at or beyond a modification time threshold
//! - **Hard-linked files** - files with more than one hard link
//! - **Broken symlinks** - symlinks whose target does not resolve
//! - **Sparse files** - files with fewer allocated blocks than their size
//!
//! # Two-phase classification
//!
//! Threshold categories first walk the whole subtree to rank a metric and
//! pick a cutoff (see [`threshold`]), then walk it again checking each item
//! against that cutoff. The driver runs both phases; the second is lazy.
//!
//! ```rust,ignore
//! use dirsift_analyze::{Category, Discovery};
//! use dirsift_core::ThresholdConfig;
//!
//! let discovery = Discovery::with_config(ThresholdConfig::new(100, 0.05)?);
//! for item in discovery.classify(Category::LargestFiles, &tree.root) {
//!     println!("{} ({} bytes)", item.name, item.size);
//! }
//! ```

mod category;
mod classifier;
mod discovery;
pub mod threshold;
mod walk;

pub use category::Category;
pub use classifier::{Classifier, Criterion, ThresholdValue};
pub use discovery::{Classification, DiscoveredItem, Discovery, DiscoveryReport, classify};
pub use threshold::{Direction, Threshold, ThresholdEstimator};
pub use walk::{Walk, files};

// Re-export core types
pub use dirsift_core::{ClassifyError, FileNode, FileTree, NodeId, ThresholdConfig};
