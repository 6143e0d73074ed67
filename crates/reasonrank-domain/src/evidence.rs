//! Evidence tracking - corroboration attached to an argument node

use crate::{DomainError, NodeId};
use serde::{Deserialize, Serialize};

/// Quality tier of a piece of evidence
///
/// - T1: peer-reviewed research, official statistics
/// - T2: expert analysis, reputable reporting
/// - T3: general reporting, secondary summaries
/// - T4: anecdotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EvidenceTier {
    /// Peer-reviewed
    T1,
    /// Expert or reputable
    #[default]
    T2,
    /// General
    T3,
    /// Anecdotal
    T4,
}

impl EvidenceTier {
    /// Get the tier label
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceTier::T1 => "T1",
            EvidenceTier::T2 => "T2",
            EvidenceTier::T3 => "T3",
            EvidenceTier::T4 => "T4",
        }
    }

    /// Parse a tier label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "T1" => Some(EvidenceTier::T1),
            "T2" => Some(EvidenceTier::T2),
            "T3" => Some(EvidenceTier::T3),
            "T4" => Some(EvidenceTier::T4),
            _ => None,
        }
    }

    /// Parse a tier label, treating anything unrecognized as T3
    pub fn parse_or_general(s: &str) -> Self {
        Self::parse(s).unwrap_or(EvidenceTier::T3)
    }

    /// Weight of one unit of corroboration at this tier
    pub fn weight(&self) -> f64 {
        match self {
            EvidenceTier::T1 => 1.0,
            EvidenceTier::T2 => 0.75,
            EvidenceTier::T3 => 0.5,
            EvidenceTier::T4 => 0.25,
        }
    }
}

impl std::str::FromStr for EvidenceTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::InvalidTier(s.to_string()))
    }
}

/// A single corroborating source for an argument node
///
/// Several sources backing the same fact raise that node's truth score. They
/// never become separate argument nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSource {
    /// Source identifier
    pub id: String,

    /// Argument node this evidence supports
    pub argument_id: NodeId,

    /// Short description of the source
    pub title: String,

    /// Link to the source, if any
    #[serde(default)]
    pub url: Option<String>,

    /// Quality tier
    #[serde(default)]
    pub quality_tier: EvidenceTier,

    /// Contribution weight toward the truth-score boost [0.0, 1.0]
    #[serde(default = "default_corroboration_weight")]
    pub corroboration_weight: f64,
}

fn default_corroboration_weight() -> f64 {
    0.1
}

impl EvidenceSource {
    /// Create a T2 source with the default corroboration weight
    pub fn new(id: impl Into<String>, argument_id: NodeId, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            argument_id,
            title: title.into(),
            url: None,
            quality_tier: EvidenceTier::default(),
            corroboration_weight: default_corroboration_weight(),
        }
    }

    /// Set the quality tier
    pub fn with_tier(mut self, tier: EvidenceTier) -> Self {
        self.quality_tier = tier;
        self
    }

    /// Set the corroboration weight (clamped to [0, 1])
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.corroboration_weight = weight.clamp(0.0, 1.0);
        self
    }

    /// Attach a URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Tier-weighted corroboration carried by this source
    pub fn weighted_corroboration(&self) -> f64 {
        self.quality_tier.weight() * self.corroboration_weight
    }
}
