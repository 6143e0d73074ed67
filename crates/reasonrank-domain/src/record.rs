//! Argument records as supplied by collaborators

use crate::node::{
    clamp_unit, DEFAULT_IMPORTANCE_SCORE, DEFAULT_LINKAGE_SCORE, DEFAULT_TRUTH_SCORE,
    DEFAULT_UNIQUENESS_SCORE,
};
use crate::{BeliefNode, EvidenceTier, FitnessMetrics, NodeId, Side, DEFAULT_BASE_SCORE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw argument record as delivered by persistence or the API layer
///
/// Every metric is optional; missing values fall back to the defaults
/// (truth, linkage and importance 0.5, uniqueness 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentRecord {
    /// Stable identifier
    pub id: NodeId,
    /// Claim text
    pub claim: String,
    /// Optional inference text
    #[serde(default)]
    pub inference: Option<String>,
    /// Optional conclusion text
    #[serde(default)]
    pub conclusion: Option<String>,
    /// Raw score before penalties
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    /// First submission time
    pub submitted_at: DateTime<Utc>,
    /// Precomputed embedding
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    /// Pro/con label
    #[serde(default)]
    pub side: Side,
    /// Parent id
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    /// Truth score
    #[serde(default)]
    pub truth: Option<f64>,
    /// Linkage score
    #[serde(default)]
    pub linkage: Option<f64>,
    /// Importance score
    #[serde(default)]
    pub importance: Option<f64>,
    /// Uniqueness score
    #[serde(default)]
    pub uniqueness: Option<f64>,
    /// Evidence tier label (T1..T4)
    #[serde(default)]
    pub evidence_type: Option<String>,
    /// Citation
    #[serde(default)]
    pub source_url: Option<String>,
}

fn default_base_score() -> f64 {
    DEFAULT_BASE_SCORE
}

impl ArgumentRecord {
    /// Create a minimal record
    pub fn new(id: impl Into<NodeId>, claim: impl Into<String>, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            claim: claim.into(),
            inference: None,
            conclusion: None,
            base_score: DEFAULT_BASE_SCORE,
            submitted_at,
            embedding: None,
            side: Side::Supporting,
            parent_id: None,
            truth: None,
            linkage: None,
            importance: None,
            uniqueness: None,
            evidence_type: None,
            source_url: None,
        }
    }

    /// Fitness metrics with defaults filled in and values clamped
    pub fn metrics(&self) -> FitnessMetrics {
        FitnessMetrics {
            truth: clamp_unit(self.truth.unwrap_or(DEFAULT_TRUTH_SCORE)),
            linkage: clamp_unit(self.linkage.unwrap_or(DEFAULT_LINKAGE_SCORE)),
            importance: clamp_unit(self.importance.unwrap_or(DEFAULT_IMPORTANCE_SCORE)),
            uniqueness: clamp_unit(self.uniqueness.unwrap_or(DEFAULT_UNIQUENESS_SCORE)),
        }
    }

    /// Convert into a belief node ready for scoring
    pub fn into_node(self) -> BeliefNode {
        let metrics = self.metrics();
        let evidence_type = self
            .evidence_type
            .as_deref()
            .map(EvidenceTier::parse_or_general)
            .unwrap_or(EvidenceTier::T3);

        BeliefNode {
            id: self.id,
            claim: self.claim,
            inference: self.inference,
            conclusion: self.conclusion,
            base_score: self.base_score,
            submitted_at: self.submitted_at,
            embedding: self.embedding,
            side: self.side,
            parent_id: self.parent_id,
            metrics,
            evidence_type,
            source_url: self.source_url,
            reason_rank: 0.0,
            propagated_score: 0.0,
        }
    }
}

impl From<ArgumentRecord> for BeliefNode {
    fn from(record: ArgumentRecord) -> Self {
        record.into_node()
    }
}
