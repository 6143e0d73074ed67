//! Duplication scorer: Layers 1–3 plus the novelty premium

use crate::community::{CommunityDebates, EquivalenceSubDebate};
use crate::config::DuplicationConfig;
use crate::evidence::EvidenceVolumeTracker;
use crate::novelty::NoveltyPremiumCalculator;
use crate::DuplicationError;
use chrono::{DateTime, Utc};
use reasonrank_domain::{ArgumentNode, NodeId};
use reasonrank_similarity::{
    EmbeddingModel, MechanicalEquivalenceChecker, SemanticSimilarityScorer,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of comparing two arguments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityPair {
    /// Argument being scored
    pub arg_a_id: NodeId,
    /// Argument it was compared against
    pub arg_b_id: NodeId,
    /// Layer 1 mechanical similarity
    pub layer1_score: f64,
    /// Layer 2 semantic similarity; None when Layer 1 already decided the pair
    pub layer2_score: Option<f64>,
    /// Layer 3 community similarity; None until a sub-debate resolves
    pub layer3_score: Option<f64>,
    /// Blended similarity in [0, 1]
    pub combined_score: f64,
    /// Layer 1 alone flagged the pair
    pub is_mechanical_duplicate: bool,
    /// Combined similarity reached the redundancy threshold
    pub is_semantically_redundant: bool,
}

/// An argument after duplication scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredArgument {
    /// The argument as supplied
    pub arg: ArgumentNode,
    /// 1 − max similarity to any earlier argument; 1.0 = fully original
    pub uniqueness_score: f64,
    /// base_score × uniqueness × novelty
    pub effective_contribution: f64,
    /// Novelty premium at scoring time (≥ floor)
    pub novelty_multiplier: f64,
    /// Comparisons against every earlier argument
    pub similarity_pairs: Vec<SimilarityPair>,
}

impl ScoredArgument {
    /// Whether any earlier argument makes this one redundant
    pub fn is_redundant(&self) -> bool {
        self.similarity_pairs
            .iter()
            .any(|p| p.is_semantically_redundant)
    }
}

/// A group of arguments that substantially overlap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentCluster {
    /// Stable id in discovery order (`cluster-1`, `cluster-2`, ...)
    pub cluster_id: String,
    /// Member with the highest base score
    pub representative_id: NodeId,
    /// Every member, representative included, in discovery order
    pub member_ids: Vec<NodeId>,
    /// Sum of members' effective contributions, capped at the best member's
    /// fully-novel score
    pub cluster_score: f64,
}

/// Orchestrates the similarity layers for a set of sibling arguments
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use reasonrank_dedup::DuplicationScorer;
/// use reasonrank_domain::BeliefNode;
///
/// let now = Utc::now();
/// let args = vec![
///     BeliefNode::new("a1", "Tax rates should be lower").submitted_at(now - Duration::hours(2)),
///     BeliefNode::new("a2", "Taxes should be reduced").submitted_at(now - Duration::hours(1)),
/// ];
///
/// let scorer = DuplicationScorer::default();
/// let scored = scorer.score_arguments(&args, None, Some(now));
///
/// assert_eq!(scored[0].uniqueness_score, 1.0);
/// assert_eq!(scored[1].uniqueness_score, 0.0);
/// assert_eq!(scored[1].effective_contribution, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DuplicationScorer {
    config: DuplicationConfig,
    mechanical: MechanicalEquivalenceChecker,
    semantic: SemanticSimilarityScorer,
    novelty: NoveltyPremiumCalculator,
    evidence: EvidenceVolumeTracker,
}

impl DuplicationScorer {
    /// Create a scorer without an embedding model
    pub fn new(config: DuplicationConfig) -> Result<Self, DuplicationError> {
        config.validate().map_err(DuplicationError::Config)?;

        Ok(Self {
            mechanical: MechanicalEquivalenceChecker::new(),
            semantic: SemanticSimilarityScorer::new(),
            novelty: NoveltyPremiumCalculator::new(config.novelty.clone())?,
            evidence: EvidenceVolumeTracker::new(config.evidence.clone())?,
            config,
        })
    }

    /// Use a shared embedding model for Layer 2
    pub fn with_model(mut self, model: Arc<dyn EmbeddingModel>) -> Self {
        self.semantic = SemanticSimilarityScorer::with_model(model);
        self
    }

    /// The configuration in use
    pub fn config(&self) -> &DuplicationConfig {
        &self.config
    }

    /// The novelty premium calculator
    pub fn novelty(&self) -> &NoveltyPremiumCalculator {
        &self.novelty
    }

    /// The corroboration tracker built from the same configuration
    pub fn evidence(&self) -> &EvidenceVolumeTracker {
        &self.evidence
    }

    /// Run every available layer on a pair of arguments
    ///
    /// Layer 1 compares claims. At or above the mechanical threshold the pair
    /// is a duplicate and Layer 2 is skipped. Otherwise the combined score is
    /// the weighted average of the layers present, renormalized over their
    /// weights.
    pub fn compare(
        &self,
        arg_a: &ArgumentNode,
        arg_b: &ArgumentNode,
        debate: Option<&EquivalenceSubDebate>,
    ) -> SimilarityPair {
        let l1 = self.mechanical.score(&arg_a.claim, &arg_b.claim);
        let l3 = debate.and_then(EquivalenceSubDebate::community_similarity);
        let is_mechanical_duplicate = l1 >= self.config.mechanical_threshold;

        let (l2, combined) = if is_mechanical_duplicate {
            (None, 1.0)
        } else {
            let l2 = self.semantic.score(arg_a, arg_b);
            (Some(l2), self.blend(l1, Some(l2), l3))
        };

        SimilarityPair {
            arg_a_id: arg_a.id.clone(),
            arg_b_id: arg_b.id.clone(),
            layer1_score: l1,
            layer2_score: l2,
            layer3_score: l3,
            combined_score: combined,
            is_mechanical_duplicate,
            is_semantically_redundant: combined >= self.config.semantic_threshold,
        }
    }

    fn blend(&self, l1: f64, l2: Option<f64>, l3: Option<f64>) -> f64 {
        let layers = [
            Some((l1, self.config.layer1_weight)),
            l2.map(|s| (s, self.config.layer2_weight)),
            l3.map(|s| (s, self.config.layer3_weight)),
        ];
        let present: Vec<(f64, f64)> = layers.into_iter().flatten().collect();

        let total_weight: f64 = present.iter().map(|(_, w)| w).sum();
        let blended = if total_weight > 0.0 {
            present.iter().map(|(s, w)| s * w).sum::<f64>() / total_weight
        } else {
            present.iter().map(|(s, _)| s).sum::<f64>() / present.len() as f64
        };

        blended.clamp(0.0, 1.0)
    }

    /// 1 − the highest combined similarity; 1.0 when there are no pairs
    ///
    /// The maximum rather than the mean: one near-identical prior argument is
    /// enough to make a restatement redundant.
    pub fn uniqueness_from_pairs(&self, pairs: &[SimilarityPair]) -> f64 {
        if pairs.is_empty() {
            return 1.0;
        }
        let max = pairs.iter().map(|p| p.combined_score).fold(0.0, f64::max);
        (1.0 - max).max(0.0)
    }

    /// Score sibling arguments for duplication
    ///
    /// Arguments are processed oldest first (ties keep input order) and each
    /// is compared only with the ones before it, so the first to make a point
    /// keeps full credit. Results come back in the caller's order. `now`
    /// defaults to the current time.
    pub fn score_arguments(
        &self,
        arguments: &[ArgumentNode],
        debates: Option<&CommunityDebates>,
        now: Option<DateTime<Utc>>,
    ) -> Vec<ScoredArgument> {
        let now = now.unwrap_or_else(Utc::now);
        info!(count = arguments.len(), "Scoring arguments for duplication");

        let mut order: Vec<usize> = (0..arguments.len()).collect();
        order.sort_by_key(|&i| arguments[i].submitted_at);

        let mut results: Vec<Option<ScoredArgument>> = vec![None; arguments.len()];
        for (position, &index) in order.iter().enumerate() {
            let arg = &arguments[index];

            let pairs: Vec<SimilarityPair> = order[..position]
                .iter()
                .map(|&prior_index| {
                    let prior = &arguments[prior_index];
                    let debate = debates.and_then(|d| d.get(&arg.id, &prior.id));
                    self.compare(arg, prior, debate)
                })
                .collect();

            let uniqueness = self.uniqueness_from_pairs(&pairs);
            let novelty = self.novelty.multiplier(arg.submitted_at, uniqueness, Some(now));
            let effective = arg.base_score * uniqueness * novelty;

            debug!(
                argument = %arg.id,
                uniqueness,
                novelty,
                effective,
                "Scored argument"
            );

            results[index] = Some(ScoredArgument {
                arg: arg.clone(),
                uniqueness_score: uniqueness,
                effective_contribution: effective,
                novelty_multiplier: novelty,
                similarity_pairs: pairs,
            });
        }

        let scored: Vec<ScoredArgument> = results.into_iter().flatten().collect();
        info!(
            count = scored.len(),
            redundant = scored.iter().filter(|s| s.is_redundant()).count(),
            "Duplication scoring complete"
        );
        scored
    }

    /// Cluster scored arguments at the configured threshold
    pub fn cluster_arguments(&self, scored: &[ScoredArgument]) -> Vec<ArgumentCluster> {
        self.cluster_arguments_with_threshold(scored, self.config.cluster_threshold)
    }

    /// Group scored arguments by single-link similarity
    ///
    /// Only similarities already computed by [`score_arguments`](Self::score_arguments)
    /// are used; pairs never compared count as 0. Seeds are taken in input
    /// order and each cluster grows until no unassigned argument is at least
    /// `threshold` similar to any member.
    pub fn cluster_arguments_with_threshold(
        &self,
        scored: &[ScoredArgument],
        threshold: f64,
    ) -> Vec<ArgumentCluster> {
        let mut similarity: HashMap<(NodeId, NodeId), f64> = HashMap::new();
        for pair in scored.iter().flat_map(|s| &s.similarity_pairs) {
            similarity.insert(pair_key(&pair.arg_a_id, &pair.arg_b_id), pair.combined_score);
        }
        let lookup = |a: &NodeId, b: &NodeId| {
            similarity
                .get(&pair_key(a, b))
                .copied()
                .unwrap_or(0.0)
        };

        let mut assigned: HashSet<usize> = HashSet::new();
        let mut clusters = Vec::new();

        for seed in 0..scored.len() {
            if !assigned.insert(seed) {
                continue;
            }

            let mut members = vec![seed];
            let mut frontier = VecDeque::from([seed]);
            while let Some(current) = frontier.pop_front() {
                for other in 0..scored.len() {
                    if assigned.contains(&other) {
                        continue;
                    }
                    if lookup(&scored[current].arg.id, &scored[other].arg.id) >= threshold {
                        assigned.insert(other);
                        members.push(other);
                        frontier.push_back(other);
                    }
                }
            }

            clusters.push(build_cluster(clusters.len() + 1, &members, scored));
        }

        debug!(clusters = clusters.len(), threshold, "Clustered arguments");
        clusters
    }
}

impl Default for DuplicationScorer {
    fn default() -> Self {
        let config = DuplicationConfig::default();
        Self {
            mechanical: MechanicalEquivalenceChecker::new(),
            semantic: SemanticSimilarityScorer::new(),
            novelty: NoveltyPremiumCalculator::default(),
            evidence: EvidenceVolumeTracker::default(),
            config,
        }
    }
}

fn pair_key(a: &NodeId, b: &NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

fn build_cluster(number: usize, members: &[usize], scored: &[ScoredArgument]) -> ArgumentCluster {
    let mut representative = members[0];
    for &m in &members[1..] {
        if scored[m].arg.base_score > scored[representative].arg.base_score {
            representative = m;
        }
    }

    let total: f64 = members.iter().map(|&m| scored[m].effective_contribution).sum();
    let best_novel = members
        .iter()
        .map(|&m| scored[m].arg.base_score * scored[m].novelty_multiplier)
        .fold(f64::NEG_INFINITY, f64::max);

    ArgumentCluster {
        cluster_id: format!("cluster-{}", number),
        representative_id: scored[representative].arg.id.clone(),
        member_ids: members.iter().map(|&m| scored[m].arg.id.clone()).collect(),
        cluster_score: total.min(best_novel),
    }
}
