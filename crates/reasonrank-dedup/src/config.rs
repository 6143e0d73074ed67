//! Configuration for duplication scoring
//!
//! Defines layer blend weights, redundancy thresholds, the novelty premium
//! curve and the corroboration ceiling.

use serde::{Deserialize, Serialize};

/// Configuration for the [`DuplicationScorer`](crate::DuplicationScorer)
///
/// # Examples
///
/// ```
/// use reasonrank_dedup::DuplicationConfig;
///
/// // Default configuration (balanced)
/// let config = DuplicationConfig::default();
/// assert_eq!(config.mechanical_threshold, 0.85);
///
/// // Flags restatements earlier
/// let config = DuplicationConfig::strict();
/// assert_eq!(config.mechanical_threshold, 0.75);
///
/// // Only flags near-verbatim repeats
/// let config = DuplicationConfig::permissive();
/// assert_eq!(config.mechanical_threshold, 0.95);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicationConfig {
    /// Blend weight of Layer 1 (mechanical)
    /// Default: 0.4
    pub layer1_weight: f64,

    /// Blend weight of Layer 2 (semantic)
    /// Default: 0.6
    pub layer2_weight: f64,

    /// Blend weight of Layer 3 (community), used only once a sub-debate resolves
    /// Default: 0.0
    pub layer3_weight: f64,

    /// Layer 1 Jaccard at or above which a pair is an outright duplicate
    /// Default: 0.85
    pub mechanical_threshold: f64,

    /// Combined similarity at or above which a pair counts as redundant
    /// Default: 0.50
    pub semantic_threshold: f64,

    /// Combined similarity needed to place two arguments in one cluster
    /// Default: 0.70
    pub cluster_threshold: f64,

    /// Novelty premium curve
    pub novelty: NoveltyConfig,

    /// Corroboration boost curve
    pub evidence: EvidenceConfig,
}

impl Default for DuplicationConfig {
    /// Balanced defaults
    fn default() -> Self {
        Self {
            layer1_weight: 0.4,
            layer2_weight: 0.6,
            layer3_weight: 0.0,
            mechanical_threshold: 0.85,
            semantic_threshold: 0.50,
            cluster_threshold: 0.70,
            novelty: NoveltyConfig::default(),
            evidence: EvidenceConfig::default(),
        }
    }
}

impl DuplicationConfig {
    /// Strict preset: lower thresholds, community votes count once resolved
    ///
    /// Suitable for heavily brigaded debates.
    pub fn strict() -> Self {
        Self {
            layer1_weight: 0.4,
            layer2_weight: 0.4,
            layer3_weight: 0.2,
            mechanical_threshold: 0.75,
            semantic_threshold: 0.40,
            cluster_threshold: 0.60,
            novelty: NoveltyConfig {
                peak_multiplier: 1.1,
                halflife_hours: 12.0,
                ..NoveltyConfig::default()
            },
            evidence: EvidenceConfig::default(),
        }
    }

    /// Permissive preset: only near-verbatim repeats are penalized hard
    ///
    /// Suitable for small or moderated debates.
    pub fn permissive() -> Self {
        Self {
            layer1_weight: 0.4,
            layer2_weight: 0.6,
            layer3_weight: 0.0,
            mechanical_threshold: 0.95,
            semantic_threshold: 0.65,
            cluster_threshold: 0.80,
            novelty: NoveltyConfig {
                peak_multiplier: 1.5,
                halflife_hours: 48.0,
                ..NoveltyConfig::default()
            },
            evidence: EvidenceConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, weight) in [
            ("layer1_weight", self.layer1_weight),
            ("layer2_weight", self.layer2_weight),
            ("layer3_weight", self.layer3_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!("{} must be a non-negative number", name));
            }
        }
        if self.layer1_weight + self.layer2_weight <= 0.0 {
            return Err("layer1_weight + layer2_weight must be greater than 0".to_string());
        }
        for (name, threshold) in [
            ("mechanical_threshold", self.mechanical_threshold),
            ("semantic_threshold", self.semantic_threshold),
            ("cluster_threshold", self.cluster_threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(format!("{} must be within [0, 1]", name));
            }
        }
        self.novelty.validate()?;
        self.evidence.validate()
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

/// Novelty premium curve
///
/// `multiplier(t) = floor + (peak − floor) × 0.5^(t / halflife)`, t in hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoveltyConfig {
    /// Multiplier immediately after submission
    /// Default: 1.25
    pub peak_multiplier: f64,

    /// Hours for the boost to halve
    /// Default: 24.0
    pub halflife_hours: f64,

    /// Multiplier once fully decayed
    /// Default: 1.0
    pub floor_multiplier: f64,

    /// Minimum uniqueness for any boost at all
    /// Default: 0.5
    pub novelty_threshold: f64,
}

impl Default for NoveltyConfig {
    fn default() -> Self {
        Self {
            peak_multiplier: 1.25,
            halflife_hours: 24.0,
            floor_multiplier: 1.0,
            novelty_threshold: 0.5,
        }
    }
}

impl NoveltyConfig {
    /// Validate the curve
    pub fn validate(&self) -> Result<(), String> {
        if !self.halflife_hours.is_finite() || self.halflife_hours <= 0.0 {
            return Err("novelty.halflife_hours must be greater than 0".to_string());
        }
        if !self.floor_multiplier.is_finite() || self.floor_multiplier < 1.0 {
            return Err("novelty.floor_multiplier must be at least 1.0".to_string());
        }
        if !self.peak_multiplier.is_finite() || self.peak_multiplier < self.floor_multiplier {
            return Err("novelty.peak_multiplier cannot be below floor_multiplier".to_string());
        }
        if !(0.0..=1.0).contains(&self.novelty_threshold) {
            return Err("novelty.novelty_threshold must be within [0, 1]".to_string());
        }
        Ok(())
    }
}

/// Corroboration boost curve
///
/// `boost = max_boost × (1 − e^(−saturation_rate × Σ tier_weight × weight))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Ceiling of the additive truth-score boost
    /// Default: 0.20
    pub max_boost: f64,

    /// How quickly the boost saturates
    /// Default: 0.5
    pub saturation_rate: f64,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            max_boost: 0.20,
            saturation_rate: 0.5,
        }
    }
}

impl EvidenceConfig {
    /// Validate the curve
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.max_boost) {
            return Err("evidence.max_boost must be within [0, 1]".to_string());
        }
        if !self.saturation_rate.is_finite() || self.saturation_rate <= 0.0 {
            return Err("evidence.saturation_rate must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(DuplicationConfig::default().validate().is_ok());
        assert!(DuplicationConfig::strict().validate().is_ok());
        assert!(DuplicationConfig::permissive().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let config = DuplicationConfig {
            layer2_weight: -0.1,
            ..DuplicationConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("layer2_weight"));
    }

    #[test]
    fn test_zero_text_weights_rejected() {
        let config = DuplicationConfig {
            layer1_weight: 0.0,
            layer2_weight: 0.0,
            layer3_weight: 1.0,
            ..DuplicationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = DuplicationConfig {
            cluster_threshold: 1.2,
            ..DuplicationConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("cluster_threshold"));
    }

    #[test]
    fn test_novelty_floor_below_one() {
        let mut config = DuplicationConfig::default();
        config.novelty.floor_multiplier = 0.8;
        assert!(config.validate().unwrap_err().contains("floor_multiplier"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DuplicationConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = DuplicationConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = DuplicationConfig::from_toml(
            r#"
            semantic_threshold = 0.6

            [novelty]
            peak_multiplier = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(parsed.semantic_threshold, 0.6);
        assert_eq!(parsed.layer2_weight, 0.6);
        assert_eq!(parsed.novelty.peak_multiplier, 2.0);
        assert_eq!(parsed.novelty.halflife_hours, 24.0);
        assert_eq!(parsed.evidence, EvidenceConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(DuplicationConfig::from_toml("layer1_weight = \"heavy\"")
            .unwrap_err()
            .starts_with("Failed to parse TOML"));
    }
}
