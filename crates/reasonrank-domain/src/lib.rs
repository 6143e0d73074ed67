//! ReasonRank Domain Layer
//!
//! This crate contains the data model shared by every other ReasonRank crate:
//! the nodes of a pro/con argument tree, their fitness metrics, the
//! corroborating evidence attached to them, and the tree itself together with
//! the bottom-up ReasonRank propagation.
//!
//! ## Key Concepts
//!
//! - **BeliefNode**: a single argument (claim, optional inference and
//!   conclusion) with four fitness metrics in `[0, 1]`
//! - **Side**: whether a node supports or weakens its parent
//! - **ArgumentTree**: owns every node, indexes parent → children, stays acyclic
//! - **EvidenceSource**: corroboration for a node; never a competing node
//! - **ArgumentSource**: the seam through which collaborators supply records
//!
//! ## Invariants
//!
//! - Nodes are never deleted by scoring; weak nodes sink to [`MIN_RANK_SCORE`]
//! - Propagation is strictly post-order: a node depends only on its descendants
//! - Every node has at most one parent and the parent chain never loops

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod evidence;
pub mod id;
pub mod node;
pub mod record;
pub mod side;
pub mod traits;
pub mod tree;

// Re-exports for convenience
pub use error::DomainError;
pub use evidence::{EvidenceSource, EvidenceTier};
pub use id::NodeId;
pub use node::{BeliefNode, FitnessMetrics, DEFAULT_BASE_SCORE, MIN_RANK_SCORE};
pub use record::ArgumentRecord;
pub use side::Side;
pub use traits::ArgumentSource;
pub use tree::{ArgumentTree, ImpactSummary, SiblingGroup};

/// Alias used by the duplication layer, which treats every belief node as an
/// argument competing with its siblings.
pub type ArgumentNode = BeliefNode;
