//! ReasonRank Duplication Scoring
//!
//! Keeps volume from passing for votes: restating an argument that is already
//! on the board must not multiply its influence.
//!
//! # Overview
//!
//! ```text
//! contribution(arg) = base_score × (1 − max similarity to earlier args) × novelty
//! ```
//!
//! - **Layer 1**: mechanical equivalence (synonyms, negated antonyms, stopwords)
//! - **Layer 2**: semantic overlap of claim + inference + conclusion
//! - **Layer 3**: community sub-debates on "are these the same?"
//! - **Novelty premium**: temporary boost for fresh, apparently original points
//! - **Evidence volume**: corroborating sources raise truth with diminishing
//!   returns; they never count as extra arguments
//!
//! # Usage
//!
//! ```
//! use chrono::Utc;
//! use reasonrank_dedup::{DuplicationConfig, DuplicationScorer};
//! use reasonrank_domain::BeliefNode;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scorer = DuplicationScorer::new(DuplicationConfig::default())?;
//! let args = vec![
//!     BeliefNode::new("a1", "Carbon taxes cut emissions"),
//!     BeliefNode::new("a2", "Stadium subsidies waste public money"),
//! ];
//!
//! let scored = scorer.score_arguments(&args, None, Some(Utc::now()));
//! let clusters = scorer.cluster_arguments(&scored);
//! assert_eq!(clusters.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! layer1_weight = 0.4
//! layer2_weight = 0.6
//! layer3_weight = 0.0
//! mechanical_threshold = 0.85
//! semantic_threshold = 0.5
//! cluster_threshold = 0.7
//!
//! [novelty]
//! peak_multiplier = 1.25
//! halflife_hours = 24.0
//! floor_multiplier = 1.0
//! novelty_threshold = 0.5
//!
//! [evidence]
//! max_boost = 0.2
//! saturation_rate = 0.5
//! ```

#![warn(missing_docs)]

pub mod community;
pub mod config;
pub mod error;
pub mod evidence;
pub mod novelty;
pub mod scorer;

pub use community::{CommunityDebates, EquivalenceSubDebate};
pub use config::{DuplicationConfig, EvidenceConfig, NoveltyConfig};
pub use error::DuplicationError;
pub use evidence::EvidenceVolumeTracker;
pub use novelty::NoveltyPremiumCalculator;
pub use scorer::{ArgumentCluster, DuplicationScorer, ScoredArgument, SimilarityPair};
