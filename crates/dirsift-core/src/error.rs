//! Error types for classification requests.
//!
//! Classification itself never fails: empty subtrees yield nothing and
//! degenerate distributions fall back to the empty threshold. Errors only
//! arise from configuration and from resolving which subtree to classify.

use std::path::PathBuf;

use thiserror::Error;

use crate::node::NodeId;

/// Errors that can occur while setting up a classification.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Selected node does not exist in the tree.
    #[error("Node not found: {id}")]
    NodeNotFound { id: NodeId },

    /// Path does not name a node in the tree.
    #[error("Subtree not found: {}", path.display())]
    SubtreeNotFound { path: PathBuf },

    /// Two nodes in one tree share an id.
    #[error("Duplicate node id: {id}")]
    DuplicateId { id: NodeId },
}

impl ClassifyError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
