//! ReasonRank Similarity
//!
//! Text-similarity primitives shared by the duplication scorer and the
//! sibling uniqueness pass.
//!
//! # Architecture
//!
//! - **Layer 1** ([`MechanicalEquivalenceChecker`]): normalization, synonym
//!   canonicalization, negated-antonym collapsing, token Jaccard. No I/O.
//! - **Layer 2** ([`SemanticSimilarityScorer`]): cosine over embeddings of the
//!   composite claim/inference/conclusion text, degrading to character
//!   trigram Jaccard when no embeddings can be had.
//! - **Capability** ([`EmbeddingModel`]): the only I/O seam. Hosts inject one
//!   shared instance; [`HashedEmbeddingModel`] is a deterministic local stand-in.
//! - **Fallbacks**: [`ngram`] (character n-gram Jaccard) and [`tfidf`]
//!   (pairwise TF-IDF cosine matrix).
//!
//! # Examples
//!
//! ```
//! use reasonrank_similarity::MechanicalEquivalenceChecker;
//!
//! let checker = MechanicalEquivalenceChecker::new();
//! let score = checker.score("Tax rates should be lower", "Taxes should be reduced");
//! assert_eq!(score, 1.0);
//! ```

#![warn(missing_docs)]

pub mod embedding;
pub mod error;
pub mod mechanical;
pub mod ngram;
pub mod semantic;
pub mod tfidf;

pub use embedding::{cosine_similarity, EmbeddingModel, HashedEmbeddingModel};
pub use error::EmbeddingError;
pub use mechanical::{MechanicalEquivalenceChecker, DEFAULT_MECHANICAL_THRESHOLD};
pub use semantic::{SemanticScore, SemanticSimilarityScorer, SimilarityBackend, SimilaritySource};
