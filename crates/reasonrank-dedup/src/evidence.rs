//! Evidence volume vs. argument redundancy
//!
//! Ten papers showing the same fact make one argument more credible. Ten
//! posts restating the same argument do not. Corroborating sources therefore
//! raise a node's truth score with diminishing returns, and never become
//! nodes of their own.

use crate::config::EvidenceConfig;
use crate::DuplicationError;
use reasonrank_domain::{BeliefNode, EvidenceSource, NodeId};
use std::collections::HashMap;

/// Turns corroborating sources into an additive truth-score boost
#[derive(Debug, Clone, Default)]
pub struct EvidenceVolumeTracker {
    config: EvidenceConfig,
}

impl EvidenceVolumeTracker {
    /// Create a tracker with the given curve
    pub fn new(config: EvidenceConfig) -> Result<Self, DuplicationError> {
        config.validate().map_err(DuplicationError::Config)?;
        Ok(Self { config })
    }

    /// Highest boost any set of sources can produce
    pub fn max_boost(&self) -> f64 {
        self.config.max_boost
    }

    /// Additive truth-score boost in [0, max_boost]
    ///
    /// `max × (1 − e^(−k × Σ tier_weight × weight))`. The first source is
    /// worth the most; each further one adds less.
    pub fn corroboration_boost(&self, sources: &[EvidenceSource]) -> f64 {
        if sources.is_empty() {
            return 0.0;
        }

        let weighted: f64 = sources.iter().map(EvidenceSource::weighted_corroboration).sum();
        let boost = self.config.max_boost * (1.0 - (-self.config.saturation_rate * weighted).exp());
        boost.clamp(0.0, self.config.max_boost)
    }

    /// Raise a node's truth score by the boost of its sources
    ///
    /// Truth is capped at 1.0. Returns the boost that was computed; the
    /// applied increase can be smaller when the cap bites.
    pub fn apply_to(&self, node: &mut BeliefNode, sources: &[EvidenceSource]) -> f64 {
        let boost = self.corroboration_boost(sources);
        node.metrics.truth = (node.metrics.truth + boost).min(1.0);
        boost
    }

    /// Boost per argument, grouping sources by the node they support
    pub fn boosts_by_argument(&self, sources: &[EvidenceSource]) -> HashMap<NodeId, f64> {
        let mut grouped: HashMap<&NodeId, Vec<EvidenceSource>> = HashMap::new();
        for source in sources {
            grouped.entry(&source.argument_id).or_default().push(source.clone());
        }

        grouped
            .into_iter()
            .map(|(id, group)| (id.clone(), self.corroboration_boost(&group)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reasonrank_domain::EvidenceTier;

    fn source(id: &str, arg: &str, tier: EvidenceTier, weight: f64) -> EvidenceSource {
        EvidenceSource::new(id, NodeId::new(arg), "Study")
            .with_tier(tier)
            .with_weight(weight)
    }

    #[test]
    fn test_no_sources_no_boost() {
        assert_eq!(EvidenceVolumeTracker::default().corroboration_boost(&[]), 0.0);
    }

    #[test]
    fn test_single_t1_source() {
        let tracker = EvidenceVolumeTracker::default();
        let boost = tracker.corroboration_boost(&[source("s1", "a1", EvidenceTier::T1, 1.0)]);
        let expected = 0.20 * (1.0 - (-0.5f64).exp());
        assert!((boost - expected).abs() < 1e-12);
        assert!((boost - 0.0787).abs() < 1e-4);
    }

    #[test]
    fn test_diminishing_returns() {
        let tracker = EvidenceVolumeTracker::default();
        let sources: Vec<_> = (0..10)
            .map(|i| source(&format!("s{}", i), "a1", EvidenceTier::T1, 1.0))
            .collect();

        let mut previous = 0.0;
        let mut previous_gain = f64::INFINITY;
        for n in 1..=sources.len() {
            let boost = tracker.corroboration_boost(&sources[..n]);
            let gain = boost - previous;
            assert!(gain > 0.0);
            assert!(gain < previous_gain);
            assert!(boost <= tracker.max_boost());
            previous = boost;
            previous_gain = gain;
        }
    }

    #[test]
    fn test_lower_tiers_count_less() {
        let tracker = EvidenceVolumeTracker::default();
        let t1 = tracker.corroboration_boost(&[source("s", "a", EvidenceTier::T1, 0.5)]);
        let t4 = tracker.corroboration_boost(&[source("s", "a", EvidenceTier::T4, 0.5)]);
        assert!(t1 > t4);
    }

    #[test]
    fn test_invalid_curve_rejected() {
        let result = EvidenceVolumeTracker::new(EvidenceConfig {
            saturation_rate: 0.0,
            ..EvidenceConfig::default()
        });
        assert!(matches!(result, Err(DuplicationError::Config(_))));

        let tracker = EvidenceVolumeTracker::new(EvidenceConfig {
            max_boost: 0.1,
            saturation_rate: 1.0,
        })
        .unwrap();
        assert_eq!(tracker.max_boost(), 0.1);
    }

    #[test]
    fn test_apply_to_caps_truth() {
        let tracker = EvidenceVolumeTracker::default();
        let mut node = BeliefNode::new("a1", "Smoking causes cancer");
        node.metrics.truth = 0.95;

        let boost = tracker.apply_to(&mut node, &[source("s1", "a1", EvidenceTier::T1, 1.0)]);
        assert!(boost > 0.05);
        assert_eq!(node.metrics.truth, 1.0);
    }

    #[test]
    fn test_boosts_grouped_by_argument() {
        let tracker = EvidenceVolumeTracker::default();
        let sources = vec![
            source("s1", "a1", EvidenceTier::T1, 1.0),
            source("s2", "a1", EvidenceTier::T2, 1.0),
            source("s3", "a2", EvidenceTier::T1, 1.0),
        ];

        let boosts = tracker.boosts_by_argument(&sources);
        assert_eq!(boosts.len(), 2);
        assert!(boosts[&NodeId::new("a1")] > boosts[&NodeId::new("a2")]);
        assert_eq!(
            boosts[&NodeId::new("a2")],
            tracker.corroboration_boost(&sources[2..])
        );
    }
}
