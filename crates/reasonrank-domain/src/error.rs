//! Domain error types

use crate::NodeId;
use thiserror::Error;

/// Errors raised while building or navigating an argument tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A node with the same id is already in the tree
    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    /// Linking the node to its parent would close a loop
    #[error("Adding node {node} under {parent} would create a cycle")]
    CycleDetected {
        /// Node being added
        node: NodeId,
        /// Requested parent
        parent: NodeId,
    },

    /// Unrecognized side label
    #[error("Invalid side: {0}")]
    InvalidSide(String),

    /// Unrecognized evidence tier label
    #[error("Invalid evidence tier: {0}")]
    InvalidTier(String),

    /// The collaborator supplying argument records failed
    #[error("Argument source error: {0}")]
    Source(String),
}
