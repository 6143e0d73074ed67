//! Duplication scoring error types

use thiserror::Error;

/// Errors that can occur while setting up duplication scoring
///
/// Scoring itself never fails: missing embeddings and unresolved community
/// debates degrade to weaker signals instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DuplicationError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
