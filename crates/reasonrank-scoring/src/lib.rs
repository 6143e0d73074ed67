//! ReasonRank Scoring
//!
//! Ranks the arguments of a pro/con tree and keeps the ranking fresh as the
//! tree changes.
//!
//! # Overview
//!
//! - [`ReasonRankScorer`] owns an [`ArgumentTree`](reasonrank_domain::ArgumentTree),
//!   recomputes it after every insertion or update, and reports leaderboards
//!   and per-node breakdowns
//! - [`UniquenessChecker`] lowers the uniqueness of near-duplicate siblings so
//!   repeats sink below the argument they repeat
//! - [`ScoringMetrics`] counts passes, rescores and penalties
//!
//! # Usage
//!
//! ```
//! use reasonrank_domain::{ArgumentTree, BeliefNode, FitnessMetrics, NodeId, Side};
//! use reasonrank_scoring::{ReasonRankScorer, ScoringConfig, UniquenessChecker};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = ArgumentTree::new();
//! tree.add_node(BeliefNode::new("root", "Cities should ban cars downtown"))?;
//! tree.add_node(
//!     BeliefNode::new("p1", "Pedestrian zones boost local retail")
//!         .with_parent("root", Side::Supporting)
//!         .with_metrics(FitnessMetrics::new(0.8, 0.7, 0.6, 1.0)),
//! )?;
//!
//! let config = ScoringConfig::default();
//! let checker = UniquenessChecker::new(&config)?;
//! let mut scorer = ReasonRankScorer::new(tree, config)?;
//! scorer.score_all();
//! scorer.penalize_and_rescore(&checker);
//!
//! let board = scorer.get_leaderboard();
//! assert_eq!(board[0].id, NodeId::new("root"));
//! assert_eq!(board[0].pro_count, 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! debunked_threshold = 0.05
//! uniqueness_threshold = 0.75
//! penalty_factor = 0.3
//! min_uniqueness = 0.01
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod reason_rank;
pub mod uniqueness;

pub use config::ScoringConfig;
pub use error::ScoringError;
pub use metrics::ScoringMetrics;
pub use reason_rank::{
    ChildContribution, LeaderboardEntry, MetricUpdate, ReasonRankScorer, ScoreBreakdown,
};
pub use uniqueness::{NewEntryMatch, UniquenessChecker, UniquenessPenalty};
