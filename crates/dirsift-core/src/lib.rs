//! Core types for dirsift.
//!
//! This crate provides the read-only tree model that classification runs
//! over: file nodes, the tree container with its statistics, threshold
//! configuration, and error types. Trees are produced by an external
//! scanner and are serializable so they can be loaded from disk.

mod config;
mod error;
mod node;
mod tree;

pub use config::{DEFAULT_CAP, DEFAULT_PERCENTILE, ThresholdConfig, ThresholdConfigBuilder};
pub use error::ClassifyError;
pub use node::{FileNode, NodeId, NodeKind};
pub use tree::{FileTree, TreeStats};
