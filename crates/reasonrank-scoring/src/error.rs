//! Scoring error types

use reasonrank_domain::{DomainError, NodeId};
use thiserror::Error;

/// Errors that can occur while ranking an argument tree
#[derive(Error, Debug)]
pub enum ScoringError {
    /// The referenced node is not in the tree
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// Tree construction or mutation failed
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
