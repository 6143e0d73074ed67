//! ReasonRank scoring engine
//!
//! [`ReasonRankScorer`] owns an [`ArgumentTree`] and keeps its scores fresh:
//! every insertion or metric update triggers a full recompute, so an
//! ancestor chain is never left with a stale rank. Weak arguments sink to
//! the bottom of their lists but are never removed.

use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::metrics::ScoringMetrics;
use crate::uniqueness::{UniquenessChecker, UniquenessPenalty};
use reasonrank_domain::{ArgumentTree, BeliefNode, FitnessMetrics, NodeId, Side};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Partial change to a node's fitness metrics
///
/// Fields left as `None` are untouched. Values are clamped into `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricUpdate {
    /// New truth score
    pub truth: Option<f64>,
    /// New linkage score
    pub linkage: Option<f64>,
    /// New importance score
    pub importance: Option<f64>,
    /// New uniqueness score
    pub uniqueness: Option<f64>,
}

impl MetricUpdate {
    /// Update nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set truth
    pub fn truth(mut self, value: f64) -> Self {
        self.truth = Some(value);
        self
    }

    /// Set linkage
    pub fn linkage(mut self, value: f64) -> Self {
        self.linkage = Some(value);
        self
    }

    /// Set importance
    pub fn importance(mut self, value: f64) -> Self {
        self.importance = Some(value);
        self
    }

    /// Set uniqueness
    pub fn uniqueness(mut self, value: f64) -> Self {
        self.uniqueness = Some(value);
        self
    }

    fn apply(&self, metrics: &mut FitnessMetrics) {
        let updated = FitnessMetrics::new(
            self.truth.unwrap_or(metrics.truth),
            self.linkage.unwrap_or(metrics.linkage),
            self.importance.unwrap_or(metrics.importance),
            self.uniqueness.unwrap_or(metrics.uniqueness),
        );
        *metrics = updated;
    }
}

/// One root on the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    /// Root id
    pub id: NodeId,
    /// Root claim
    pub claim: String,
    /// Propagated ReasonRank
    pub propagated_score: f64,
    /// Supporting children
    pub pro_count: usize,
    /// Weakening children
    pub con_count: usize,
    /// Weighted supporting pressure
    pub impact: f64,
    /// Weighted weakening pressure
    pub counter_impact: f64,
    /// impact − counter_impact
    pub net_impact: f64,
    /// Propagated score is below the debunked threshold
    pub is_debunked: bool,
}

/// What one child contributes to its parent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildContribution {
    /// Child id
    pub id: NodeId,
    /// Child claim
    pub claim: String,
    /// Child's propagated score
    pub propagated_score: f64,
    /// Child's linkage to the parent
    pub linkage: f64,
    /// propagated_score × linkage
    pub weighted_contribution: f64,
}

impl ChildContribution {
    fn from_node(node: &BeliefNode) -> Self {
        Self {
            id: node.id.clone(),
            claim: node.claim.clone(),
            propagated_score: node.propagated_score,
            linkage: node.metrics.linkage,
            weighted_contribution: node.propagated_score * node.metrics.linkage,
        }
    }
}

/// Full score breakdown of a single node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Node id
    pub id: NodeId,
    /// Node claim
    pub claim: String,
    /// Side relative to the parent
    pub side: Side,
    /// Product of the node's own metrics
    pub base_rank: f64,
    /// Score after propagation
    pub propagated_score: f64,
    /// Current ReasonRank
    pub reason_rank: f64,
    /// The node's own fitness metrics
    pub metrics: FitnessMetrics,
    /// Weighted supporting pressure
    pub impact: f64,
    /// Weighted weakening pressure
    pub counter_impact: f64,
    /// impact − counter_impact
    pub net_impact: f64,
    /// Supporting children
    pub pro_count: usize,
    /// Weakening children
    pub con_count: usize,
    /// Propagated score is below the debunked threshold
    pub is_debunked: bool,
    /// Supporting children, best first
    pub supporting: Vec<ChildContribution>,
    /// Weakening children, best first
    pub weakening: Vec<ChildContribution>,
}

/// Applies ReasonRank to an argument tree and keeps it sorted
#[derive(Debug, Clone)]
pub struct ReasonRankScorer {
    tree: ArgumentTree,
    config: ScoringConfig,
    metrics: ScoringMetrics,
}

impl ReasonRankScorer {
    /// Take ownership of a tree
    ///
    /// Scores are not computed until [`score_all`](Self::score_all) or a
    /// rescoring call.
    pub fn new(tree: ArgumentTree, config: ScoringConfig) -> Result<Self, ScoringError> {
        config.validate().map_err(ScoringError::Config)?;
        Ok(Self {
            tree,
            config,
            metrics: ScoringMetrics::new(),
        })
    }

    /// Compute scores for the entire tree
    pub fn score_all(&mut self) -> &ArgumentTree {
        self.tree.compute_all_scores();

        let debunked = self
            .tree
            .nodes()
            .filter(|n| self.is_debunked(n))
            .count();
        self.metrics.record_pass(self.tree.len(), debunked);

        let orphans = self.tree.orphans().len();
        if orphans > 0 {
            warn!(orphans, "Nodes with a missing parent are left off the leaderboard");
        }

        info!(nodes = self.tree.len(), debunked, "ReasonRank pass complete");
        &self.tree
    }

    /// Insert a node and recompute
    pub fn add_and_rescore(&mut self, node: BeliefNode) -> Result<&ArgumentTree, ScoringError> {
        debug!(node = %node.id, parent = ?node.parent_id, "Adding node");
        self.tree.add_node(node)?;
        self.metrics.record_rescore();
        Ok(self.score_all())
    }

    /// Change a node's metrics and recompute its whole ancestor chain
    pub fn update_and_rescore(
        &mut self,
        id: &NodeId,
        update: MetricUpdate,
    ) -> Result<&ArgumentTree, ScoringError> {
        let node = self
            .tree
            .get_mut(id)
            .ok_or_else(|| ScoringError::NotFound(id.clone()))?;
        update.apply(&mut node.metrics);
        debug!(node = %id, ?update, "Updated node metrics");

        self.metrics.record_rescore();
        Ok(self.score_all())
    }

    /// Run the sibling uniqueness pass, then recompute
    ///
    /// Scores are refreshed first so the pass compares current ranks.
    pub fn penalize_and_rescore(&mut self, checker: &UniquenessChecker) -> Vec<UniquenessPenalty> {
        self.tree.compute_all_scores();
        let penalties = checker.check_and_penalize(&mut self.tree);
        self.metrics.record_penalties(penalties.len());
        self.metrics.record_rescore();
        self.score_all();
        penalties
    }

    /// All roots ranked by propagated score
    ///
    /// Orphans are not roots and do not appear; see
    /// [`ArgumentTree::orphans`].
    pub fn get_leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.tree
            .get_sorted_roots()
            .into_iter()
            .enumerate()
            .map(|(i, root)| {
                let summary = self.tree.impact_summary(&root.id);
                LeaderboardEntry {
                    rank: i + 1,
                    id: root.id.clone(),
                    claim: root.claim.clone(),
                    propagated_score: root.propagated_score,
                    pro_count: summary.pro_count,
                    con_count: summary.con_count,
                    impact: summary.impact,
                    counter_impact: summary.counter_impact,
                    net_impact: summary.net_impact(),
                    is_debunked: self.is_debunked(root),
                }
            })
            .collect()
    }

    /// Detailed breakdown of one node
    pub fn get_score_breakdown(&self, id: &NodeId) -> Result<ScoreBreakdown, ScoringError> {
        let node = self
            .tree
            .get(id)
            .ok_or_else(|| ScoringError::NotFound(id.clone()))?;
        let summary = self.tree.impact_summary(id);

        let contributions = |side: Side| -> Vec<ChildContribution> {
            let mut children = self.tree.get_children_on(id, side);
            children.sort_by(|a, b| b.propagated_score.total_cmp(&a.propagated_score));
            children.into_iter().map(ChildContribution::from_node).collect()
        };

        Ok(ScoreBreakdown {
            id: node.id.clone(),
            claim: node.claim.clone(),
            side: node.side,
            base_rank: node.compute_base_rank(),
            propagated_score: node.propagated_score,
            reason_rank: node.reason_rank,
            metrics: node.metrics,
            impact: summary.impact,
            counter_impact: summary.counter_impact,
            net_impact: summary.net_impact(),
            pro_count: summary.pro_count,
            con_count: summary.con_count,
            is_debunked: self.is_debunked(node),
            supporting: contributions(Side::Supporting),
            weakening: contributions(Side::Weakening),
        })
    }

    /// Whether a node's propagated score is below the debunked threshold
    pub fn is_debunked(&self, node: &BeliefNode) -> bool {
        node.propagated_score < self.config.debunked_threshold
    }

    /// The scored tree
    pub fn tree(&self) -> &ArgumentTree {
        &self.tree
    }

    /// Give the tree back
    pub fn into_tree(self) -> ArgumentTree {
        self.tree
    }

    /// Active configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Counters collected so far
    pub fn metrics(&self) -> &ScoringMetrics {
        &self.metrics
    }
}
