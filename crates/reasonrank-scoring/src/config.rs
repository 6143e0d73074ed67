//! Configuration for ReasonRank scoring and the sibling uniqueness pass

use serde::{Deserialize, Serialize};

/// Configuration for [`ReasonRankScorer`](crate::ReasonRankScorer) and
/// [`UniquenessChecker`](crate::UniquenessChecker)
///
/// # Examples
///
/// ```
/// use reasonrank_scoring::ScoringConfig;
///
/// let config = ScoringConfig::default();
/// assert_eq!(config.uniqueness_threshold, 0.75);
///
/// let config = ScoringConfig::from_toml("debunked_threshold = 0.1").unwrap();
/// assert_eq!(config.debunked_threshold, 0.1);
/// assert_eq!(config.penalty_factor, 0.3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Propagated score below which a node is reported as debunked
    /// Default: 0.05
    pub debunked_threshold: f64,

    /// Sibling similarity above which the weaker sibling is penalized
    /// Default: 0.75
    pub uniqueness_threshold: f64,

    /// Penalty multiplier applied to an exact duplicate (similarity 1.0)
    /// Default: 0.3
    pub penalty_factor: f64,

    /// Uniqueness never drops below this
    /// Default: 0.01
    pub min_uniqueness: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            debunked_threshold: 0.05,
            uniqueness_threshold: 0.75,
            penalty_factor: 0.3,
            min_uniqueness: 0.01,
        }
    }
}

impl ScoringConfig {
    /// Strict preset: near-duplicates are caught earlier and hit harder
    pub fn strict() -> Self {
        Self {
            uniqueness_threshold: 0.65,
            penalty_factor: 0.2,
            ..Self::default()
        }
    }

    /// Permissive preset: only close restatements are penalized, and mildly
    pub fn permissive() -> Self {
        Self {
            uniqueness_threshold: 0.85,
            penalty_factor: 0.5,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.debunked_threshold) {
            return Err("debunked_threshold must be within [0, 1]".to_string());
        }
        if !(0.0..1.0).contains(&self.uniqueness_threshold) {
            return Err("uniqueness_threshold must be within [0, 1)".to_string());
        }
        if !(0.0..=1.0).contains(&self.penalty_factor) {
            return Err("penalty_factor must be within [0, 1]".to_string());
        }
        if !(self.min_uniqueness > 0.0 && self.min_uniqueness <= 1.0) {
            return Err("min_uniqueness must be within (0, 1]".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
