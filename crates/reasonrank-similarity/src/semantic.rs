//! Layer 2: semantic overlap
//!
//! Compares the composite claim + inference + conclusion text of two
//! arguments, so rewording a single component with a thesaurus does not make
//! an old argument look new.
//!
//! Resolution order:
//!
//! 1. Cosine of the stored embeddings, when both nodes carry one of equal length
//! 2. Cosine of embeddings computed on demand by the injected model
//! 3. Character trigram Jaccard
//!
//! A failure on one path falls through to the next; nothing here returns an
//! error.

use crate::embedding::{cosine_similarity, EmbeddingModel};
use crate::ngram::trigram_similarity;
use reasonrank_domain::BeliefNode;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Which similarity capability a scorer resolved at construction
#[derive(Clone)]
pub enum SimilarityBackend {
    /// An embedding model is available for on-demand embedding
    Embeddings(Arc<dyn EmbeddingModel>),
    /// Text-only fallback
    TextFallback,
}

impl SimilarityBackend {
    /// Resolve the backend from an optional model
    pub fn resolve(model: Option<Arc<dyn EmbeddingModel>>) -> Self {
        match model {
            Some(model) => SimilarityBackend::Embeddings(model),
            None => SimilarityBackend::TextFallback,
        }
    }

    /// The model, if any
    pub fn model(&self) -> Option<&Arc<dyn EmbeddingModel>> {
        match self {
            SimilarityBackend::Embeddings(model) => Some(model),
            SimilarityBackend::TextFallback => None,
        }
    }
}

impl fmt::Debug for SimilarityBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityBackend::Embeddings(model) => f
                .debug_struct("Embeddings")
                .field("dimension", &model.dimension())
                .finish(),
            SimilarityBackend::TextFallback => f.write_str("TextFallback"),
        }
    }
}

/// Path that produced a Layer 2 score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilaritySource {
    /// Both nodes carried compatible embeddings
    StoredEmbeddings,
    /// The injected model embedded both texts
    ComputedEmbeddings,
    /// Character trigram Jaccard over the composite texts
    TrigramFallback,
}

/// A Layer 2 score together with its provenance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemanticScore {
    /// Similarity in [0, 1]
    pub value: f64,
    /// Which path produced it
    pub source: SimilaritySource,
}

/// Layer 2 of the duplication pipeline
#[derive(Debug, Clone)]
pub struct SemanticSimilarityScorer {
    backend: SimilarityBackend,
}

impl SemanticSimilarityScorer {
    /// Create a scorer with no model: stored embeddings, then trigrams
    pub fn new() -> Self {
        Self {
            backend: SimilarityBackend::TextFallback,
        }
    }

    /// Create a scorer backed by a shared embedding model
    pub fn with_model(model: Arc<dyn EmbeddingModel>) -> Self {
        Self {
            backend: SimilarityBackend::Embeddings(model),
        }
    }

    /// Create a scorer from an already resolved backend
    pub fn from_backend(backend: SimilarityBackend) -> Self {
        Self { backend }
    }

    /// The resolved backend
    pub fn backend(&self) -> &SimilarityBackend {
        &self.backend
    }

    /// Semantic similarity of two arguments in [0, 1]
    pub fn score(&self, arg_a: &BeliefNode, arg_b: &BeliefNode) -> f64 {
        self.score_detailed(arg_a, arg_b).value
    }

    /// Semantic similarity of two arguments, reporting which path was used
    pub fn score_detailed(&self, arg_a: &BeliefNode, arg_b: &BeliefNode) -> SemanticScore {
        if let (Some(emb_a), Some(emb_b)) = (&arg_a.embedding, &arg_b.embedding) {
            if !emb_a.is_empty() && emb_a.len() == emb_b.len() {
                return SemanticScore {
                    value: unit(f64::from(cosine_similarity(emb_a, emb_b))),
                    source: SimilaritySource::StoredEmbeddings,
                };
            }
            debug!(
                arg_a = %arg_a.id,
                arg_b = %arg_b.id,
                len_a = emb_a.len(),
                len_b = emb_b.len(),
                "Stored embeddings incompatible, falling through"
            );
        }

        let text_a = arg_a.composite_text();
        let text_b = arg_b.composite_text();

        if let Some(model) = self.backend.model() {
            match embed_pair(model.as_ref(), &text_a, &text_b) {
                Ok(value) => {
                    return SemanticScore {
                        value: unit(value),
                        source: SimilaritySource::ComputedEmbeddings,
                    };
                }
                Err(e) => {
                    warn!(
                        arg_a = %arg_a.id,
                        arg_b = %arg_b.id,
                        error = %e,
                        "Embedding failed, using trigram fallback"
                    );
                }
            }
        }

        SemanticScore {
            value: trigram_similarity(&text_a, &text_b),
            source: SimilaritySource::TrigramFallback,
        }
    }

    /// Share of an argument's base score that survives a given similarity
    ///
    /// 90% similar keeps 10%.
    ///
    /// ```
    /// use reasonrank_similarity::SemanticSimilarityScorer;
    ///
    /// assert!((SemanticSimilarityScorer::contribution_factor(0.9) - 0.1).abs() < 1e-9);
    /// assert_eq!(SemanticSimilarityScorer::contribution_factor(1.4), 0.0);
    /// ```
    pub fn contribution_factor(similarity: f64) -> f64 {
        unit(1.0 - similarity)
    }
}

impl Default for SemanticSimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn embed_pair(
    model: &dyn EmbeddingModel,
    text_a: &str,
    text_b: &str,
) -> Result<f64, crate::EmbeddingError> {
    let emb_a = model.embed(text_a)?;
    let emb_b = model.embed(text_b)?;
    model.similarity(&emb_a, &emb_b)
}

/// Clamp into [0, 1]; NaN becomes 0
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
