//! Belief node module - the fundamental unit of an argument tree

use crate::{EvidenceTier, NodeId, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Floor for every rank: nodes are never excluded, they only sink
pub const MIN_RANK_SCORE: f64 = 0.001;

/// Raw score given to an argument when the submitter supplies none
pub const DEFAULT_BASE_SCORE: f64 = 50.0;

/// Default truth score when a record omits it
pub const DEFAULT_TRUTH_SCORE: f64 = 0.5;

/// Default linkage score when a record omits it
pub const DEFAULT_LINKAGE_SCORE: f64 = 0.5;

/// Default importance score when a record omits it
pub const DEFAULT_IMPORTANCE_SCORE: f64 = 0.5;

/// Default uniqueness score when a record omits it
pub const DEFAULT_UNIQUENESS_SCORE: f64 = 1.0;

/// The four fitness metrics carried by every node, each in [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessMetrics {
    /// How well-supported the node is by evidence
    pub truth: f64,
    /// How strongly the node connects to its parent (relevance)
    pub linkage: f64,
    /// How much the node matters to the conclusion
    pub importance: f64,
    /// How novel the node is compared to its siblings
    pub uniqueness: f64,
}

impl FitnessMetrics {
    /// Create metrics, clamping every value into [0, 1]
    pub fn new(truth: f64, linkage: f64, importance: f64, uniqueness: f64) -> Self {
        Self {
            truth: clamp_unit(truth),
            linkage: clamp_unit(linkage),
            importance: clamp_unit(importance),
            uniqueness: clamp_unit(uniqueness),
        }
    }

    /// truth × linkage × importance × uniqueness, floored at [`MIN_RANK_SCORE`]
    pub fn base_rank(&self) -> f64 {
        (self.truth * self.linkage * self.importance * self.uniqueness).max(MIN_RANK_SCORE)
    }
}

impl Default for FitnessMetrics {
    fn default() -> Self {
        Self {
            truth: DEFAULT_TRUTH_SCORE,
            linkage: DEFAULT_LINKAGE_SCORE,
            importance: DEFAULT_IMPORTANCE_SCORE,
            uniqueness: DEFAULT_UNIQUENESS_SCORE,
        }
    }
}

/// Clamp a metric into [0, 1]; NaN becomes 0
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// A single argument in the arena
///
/// Nodes are created when a collaborator submits an argument and are mutated
/// whenever their inputs change. Scoring never deletes a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefNode {
    /// Unique identifier
    pub id: NodeId,

    /// The claim text (premise side of the argument)
    pub claim: String,

    /// Bridging statement from claim to conclusion
    #[serde(default)]
    pub inference: Option<String>,

    /// What the argument sets out to prove
    #[serde(default)]
    pub conclusion: Option<String>,

    /// Raw score before any duplication penalty
    pub base_score: f64,

    /// When the argument was first submitted
    pub submitted_at: DateTime<Utc>,

    /// Precomputed sentence embedding, if the host has one
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,

    /// Supporting or weakening relative to the parent
    pub side: Side,

    /// Parent conclusion (None for roots)
    #[serde(default)]
    pub parent_id: Option<NodeId>,

    /// Fitness metrics
    #[serde(flatten)]
    pub metrics: FitnessMetrics,

    /// Quality tier of the node's own evidence
    #[serde(default)]
    pub evidence_type: EvidenceTier,

    /// Citation for the node's own evidence
    #[serde(default)]
    pub source_url: Option<String>,

    /// Standalone rank, replaced by the propagated score for internal nodes
    #[serde(default)]
    pub reason_rank: f64,

    /// Score after child propagation
    #[serde(default)]
    pub propagated_score: f64,
}

impl BeliefNode {
    /// Create a supporting root node with default metrics, submitted now
    pub fn new(id: impl Into<NodeId>, claim: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            claim: claim.into(),
            inference: None,
            conclusion: None,
            base_score: DEFAULT_BASE_SCORE,
            submitted_at: Utc::now(),
            embedding: None,
            side: Side::Supporting,
            parent_id: None,
            metrics: FitnessMetrics::default(),
            evidence_type: EvidenceTier::T3,
            source_url: None,
            reason_rank: 0.0,
            propagated_score: 0.0,
        }
    }

    /// Attach the node under a parent on the given side
    pub fn with_parent(mut self, parent_id: impl Into<NodeId>, side: Side) -> Self {
        self.parent_id = Some(parent_id.into());
        self.side = side;
        self
    }

    /// Set the fitness metrics
    pub fn with_metrics(mut self, metrics: FitnessMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the inference text
    pub fn with_inference(mut self, inference: impl Into<String>) -> Self {
        self.inference = Some(inference.into());
        self
    }

    /// Set the conclusion text
    pub fn with_conclusion(mut self, conclusion: impl Into<String>) -> Self {
        self.conclusion = Some(conclusion.into());
        self
    }

    /// Set the base score
    pub fn with_base_score(mut self, base_score: f64) -> Self {
        self.base_score = base_score;
        self
    }

    /// Set the submission time
    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = at;
        self
    }

    /// Attach a precomputed embedding
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Claim, inference and conclusion joined into one text
    ///
    /// Comparing the whole chain makes it harder to disguise a restatement by
    /// rewording just one component.
    ///
    /// # Examples
    ///
    /// ```
    /// use reasonrank_domain::BeliefNode;
    ///
    /// let node = BeliefNode::new("a1", "Carbon taxes cut emissions")
    ///     .with_conclusion("We should adopt a carbon tax");
    /// assert_eq!(
    ///     node.composite_text(),
    ///     "Carbon taxes cut emissions We should adopt a carbon tax"
    /// );
    /// ```
    pub fn composite_text(&self) -> String {
        let mut parts = vec![self.claim.as_str()];
        if let Some(inference) = self.inference.as_deref().filter(|s| !s.is_empty()) {
            parts.push(inference);
        }
        if let Some(conclusion) = self.conclusion.as_deref().filter(|s| !s.is_empty()) {
            parts.push(conclusion);
        }
        parts.join(" ")
    }

    /// Standalone ReasonRank before child propagation
    pub fn compute_base_rank(&self) -> f64 {
        self.metrics.base_rank()
    }

    /// Whether this node has no parent
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: base rank is always within [MIN_RANK_SCORE, 1]
        #[test]
        fn test_base_rank_bounds(
            truth in -1.0f64..2.0,
            linkage in -1.0f64..2.0,
            importance in -1.0f64..2.0,
            uniqueness in -1.0f64..2.0,
        ) {
            let rank = FitnessMetrics::new(truth, linkage, importance, uniqueness).base_rank();
            prop_assert!(rank >= MIN_RANK_SCORE);
            prop_assert!(rank <= 1.0);
        }
    }
}
