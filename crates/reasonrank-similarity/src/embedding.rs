//! Embedding capability for text vectorization
//!
//! The scoring core never loads a model itself. Hosts construct one
//! [`EmbeddingModel`] at startup and share it as `Arc<dyn EmbeddingModel>`;
//! any retry or timeout policy belongs to that implementation.
//!
//! # Examples
//!
//! ```rust
//! use reasonrank_similarity::{EmbeddingModel, HashedEmbeddingModel};
//!
//! let model = HashedEmbeddingModel::new(256);
//! let a = model.embed("Carbon taxes cut emissions").unwrap();
//! let b = model.embed("Carbon taxes cut emissions").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.len(), 256);
//! ```

use crate::EmbeddingError;
use sha2::{Digest, Sha256};

/// Trait for embedding models
///
/// Implementations must be shareable across threads; the scorers hold them
/// behind an `Arc`.
pub trait EmbeddingModel: Send + Sync {
    /// Generate an embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Get the dimension of embeddings produced by this model
    fn dimension(&self) -> usize;

    /// Similarity between two vectors produced by this model
    ///
    /// Defaults to cosine similarity. Vectors of different length are an
    /// error rather than a silent zero.
    fn similarity(&self, a: &[f32], b: &[f32]) -> Result<f64, EmbeddingError> {
        if a.len() != b.len() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: a.len(),
                actual: b.len(),
            });
        }
        Ok(f64::from(cosine_similarity(a, b)))
    }
}

/// Deterministic bag-of-words embedding model
///
/// Each lowercase word is hashed into one signed bucket and the result is
/// normalized to unit length. Buckets come from SHA-256, so the same text
/// embeds identically on every platform and toolchain. Texts that share words therefore point in
/// similar directions, which is enough for development and tests. It is no
/// substitute for a sentence-transformer in production.
#[derive(Debug, Clone)]
pub struct HashedEmbeddingModel {
    dimension: usize,
}

impl HashedEmbeddingModel {
    /// Create a new hashed embedding model
    ///
    /// A dimension of zero is bumped to one.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn bucket(&self, word: &str) -> (usize, f32) {
        let digest: [u8; 32] = Sha256::digest(word.as_bytes()).into();
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        let hash = u64::from_be_bytes(prefix);

        let index = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        (index, sign)
    }
}

impl Default for HashedEmbeddingModel {
    fn default() -> Self {
        Self::new(384)
    }
}

impl EmbeddingModel for HashedEmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Text contains no words to embed".to_string(),
            ));
        }

        let mut embedding = vec![0.0f32; self.dimension];
        for word in words {
            let (index, sign) = self.bucket(word);
            embedding[index] += sign;
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Calculate cosine similarity between two embedding vectors
///
/// Returns a value in [-1, 1]. Vectors of different length, empty vectors and
/// zero vectors all yield 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashed_embedding_deterministic() {
        let model = HashedEmbeddingModel::new(384);

        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(model.embed(text).unwrap(), model.embed(text).unwrap());
    }

    #[test]
    fn test_hashed_buckets_are_pinned() {
        let model = HashedEmbeddingModel::default();

        let carbon = model.embed("Carbon").unwrap();
        assert_eq!(carbon[121], 1.0);
        assert_eq!(carbon.iter().filter(|v| **v != 0.0).count(), 1);

        let tax = model.embed("tax").unwrap();
        assert_eq!(tax[77], 1.0);
    }

    #[test]
    fn test_hashed_embedding_dimension() {
        let model = HashedEmbeddingModel::new(128);
        assert_eq!(model.embed("test").unwrap().len(), 128);
        assert_eq!(model.dimension(), 128);
        assert_eq!(HashedEmbeddingModel::new(0).dimension(), 1);
    }

    #[test]
    fn test_hashed_embedding_normalized() {
        let model = HashedEmbeddingModel::default();
        let embedding = model.embed("test text").unwrap();

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_shared_words_raise_similarity() {
        let model = HashedEmbeddingModel::default();

        let a = model.embed("carbon taxes cut emissions").unwrap();
        let b = model.embed("Carbon taxes cut emissions!").unwrap();
        let c = model.embed("stadium subsidies help cities").unwrap();

        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.0001);
        assert!(cosine_similarity(&a, &b) > cosine_similarity(&a, &c));
    }

    #[test]
    fn test_hashed_embedding_rejects_empty_text() {
        let model = HashedEmbeddingModel::default();

        let result = model.embed("  ...  ");
        assert!(matches!(result, Err(EmbeddingError::InvalidInput(_))));
    }

    #[test]
    fn test_default_similarity_checks_dimension() {
        let model = HashedEmbeddingModel::new(3);
        let err = model.similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]).unwrap_err();
        assert_eq!(err, EmbeddingError::DimensionMismatch { expected: 3, actual: 2 });

        let sim = model.similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let vec = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&vec, &vec) - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let similarity = cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]);
        assert!(similarity.abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let similarity = cosine_similarity(&[1.0, 0.0, 0.0], &[-1.0, 0.0, 0.0]);
        assert!((similarity + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_degenerate() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
