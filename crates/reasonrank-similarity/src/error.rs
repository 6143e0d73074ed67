//! Error types for the embedding capability

use thiserror::Error;

/// Errors that can occur during embedding generation or comparison
///
/// None of these are fatal to scoring: every caller degrades to a
/// deterministic text fallback instead of propagating them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbeddingError {
    /// Model not loaded
    #[error("Embedding model not loaded")]
    ModelNotLoaded,

    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model inference error
    #[error("Model inference failed: {0}")]
    InferenceFailed(String),

    /// Two vectors of different length were compared
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Length of the first vector
        expected: usize,
        /// Length of the second vector
        actual: usize,
    },
}
