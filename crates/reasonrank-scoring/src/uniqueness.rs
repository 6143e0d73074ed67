//! Sibling redundancy pass
//!
//! Within each group of direct siblings (the roots form one virtual group),
//! every pair whose statements overlap above the threshold costs the weaker
//! sibling some uniqueness:
//!
//! ```text
//! penalty        = 1 − ((sim − threshold) / (1 − threshold)) × (1 − penalty_factor)
//! new uniqueness = max(old × penalty, min_uniqueness)
//! ```
//!
//! Similarities and propagated scores are fixed when a group is first read,
//! so three or more mutual near-duplicates get one multiplicative penalty per
//! detected pair. Ties penalize the sibling that came later.

use crate::config::ScoringConfig;
use crate::error::ScoringError;
use reasonrank_domain::{ArgumentTree, BeliefNode, NodeId};
use reasonrank_similarity::{tfidf, EmbeddingError, EmbeddingModel, SimilarityBackend};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One uniqueness penalty applied during a pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniquenessPenalty {
    /// Penalized sibling
    pub target_id: NodeId,
    /// Claim of the penalized sibling
    pub target_statement: String,
    /// Stronger sibling it repeats
    pub similar_to_id: NodeId,
    /// Claim of the stronger sibling
    pub similar_to_statement: String,
    /// Pair similarity that triggered the penalty
    pub similarity: f64,
    /// Uniqueness before the penalty
    pub old_uniqueness: f64,
    /// Uniqueness after the penalty
    pub new_uniqueness: f64,
    /// Multiplier that was applied
    pub penalty_factor: f64,
}

/// An existing sibling that a not-yet-added statement would repeat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEntryMatch {
    /// Existing sibling
    pub sibling_id: NodeId,
    /// Claim of the existing sibling
    pub sibling_statement: String,
    /// Similarity to the new statement
    pub similarity: f64,
    /// Multiplier the new entry's uniqueness would receive
    pub recommended_penalty: f64,
}

/// Detects near-duplicate siblings and lowers their uniqueness
///
/// The similarity backend is fixed at construction: embeddings when a model
/// is supplied, TF-IDF cosine otherwise.
#[derive(Debug, Clone)]
pub struct UniquenessChecker {
    threshold: f64,
    penalty_factor: f64,
    min_uniqueness: f64,
    backend: SimilarityBackend,
}

impl Default for UniquenessChecker {
    fn default() -> Self {
        let config = ScoringConfig::default();
        Self {
            threshold: config.uniqueness_threshold,
            penalty_factor: config.penalty_factor,
            min_uniqueness: config.min_uniqueness,
            backend: SimilarityBackend::TextFallback,
        }
    }
}

impl UniquenessChecker {
    /// Create a TF-IDF checker from a validated configuration
    pub fn new(config: &ScoringConfig) -> Result<Self, ScoringError> {
        config.validate().map_err(ScoringError::Config)?;
        Ok(Self {
            threshold: config.uniqueness_threshold,
            penalty_factor: config.penalty_factor,
            min_uniqueness: config.min_uniqueness,
            backend: SimilarityBackend::TextFallback,
        })
    }

    /// Compare statements through an embedding model instead of TF-IDF
    pub fn with_model(mut self, model: Arc<dyn EmbeddingModel>) -> Self {
        self.backend = SimilarityBackend::resolve(Some(model));
        self
    }

    /// The backend resolved at construction
    pub fn backend(&self) -> &SimilarityBackend {
        &self.backend
    }

    /// Similarity a pair must exceed to be penalized
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Multiplier for a pair at the given similarity
    ///
    /// 1.0 at the threshold, `penalty_factor` at similarity 1.0.
    pub fn penalty_for(&self, similarity: f64) -> f64 {
        let excess = ((similarity - self.threshold) / (1.0 - self.threshold)).clamp(0.0, 1.0);
        1.0 - excess * (1.0 - self.penalty_factor)
    }

    /// Penalize the weaker member of every near-duplicate sibling pair
    ///
    /// Only uniqueness changes; run
    /// [`ArgumentTree::compute_all_scores`] afterwards to propagate it.
    pub fn check_and_penalize(&self, tree: &mut ArgumentTree) -> Vec<UniquenessPenalty> {
        let mut penalties = Vec::new();

        for group in tree.sibling_groups() {
            if group.members.len() < 2 {
                continue;
            }

            let members: Vec<(NodeId, String, f64)> = group
                .members
                .iter()
                .filter_map(|id| tree.get(id))
                .map(|n| (n.id.clone(), n.claim.clone(), n.propagated_score))
                .collect();
            let statements: Vec<&str> = members.iter().map(|(_, claim, _)| claim.as_str()).collect();
            let matrix = self.similarity_matrix(&statements, group.parent.as_ref());

            let mut detected = Vec::new();
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    let similarity = matrix[i][j];
                    if similarity <= self.threshold {
                        continue;
                    }
                    let (target, other) = if members[i].2 < members[j].2 { (i, j) } else { (j, i) };
                    detected.push((target, other, similarity));
                }
            }

            for (target, other, similarity) in detected {
                let Some(node) = tree.get_mut(&members[target].0) else {
                    continue;
                };
                let factor = self.penalty_for(similarity);
                let old_uniqueness = node.metrics.uniqueness;
                let new_uniqueness = (old_uniqueness * factor).max(self.min_uniqueness);
                node.metrics.uniqueness = new_uniqueness;

                debug!(
                    target = %members[target].0,
                    similar_to = %members[other].0,
                    similarity,
                    old_uniqueness,
                    new_uniqueness,
                    "Applied uniqueness penalty"
                );

                penalties.push(UniquenessPenalty {
                    target_id: members[target].0.clone(),
                    target_statement: members[target].1.clone(),
                    similar_to_id: members[other].0.clone(),
                    similar_to_statement: members[other].1.clone(),
                    similarity,
                    old_uniqueness,
                    new_uniqueness,
                    penalty_factor: factor,
                });
            }
        }

        info!(penalties = penalties.len(), "Uniqueness pass complete");
        penalties
    }

    /// Existing siblings a new statement would repeat, strongest match first
    ///
    /// Nothing is mutated.
    pub fn check_new_entry(&self, statement: &str, siblings: &[&BeliefNode]) -> Vec<NewEntryMatch> {
        if siblings.is_empty() {
            return Vec::new();
        }

        let mut statements: Vec<&str> = siblings.iter().map(|s| s.claim.as_str()).collect();
        statements.push(statement);
        let matrix = self.similarity_matrix(&statements, None);
        let new_idx = siblings.len();

        let mut matches: Vec<NewEntryMatch> = siblings
            .iter()
            .enumerate()
            .filter(|(i, _)| matrix[new_idx][*i] > self.threshold)
            .map(|(i, sibling)| NewEntryMatch {
                sibling_id: sibling.id.clone(),
                sibling_statement: sibling.claim.clone(),
                similarity: matrix[new_idx][i],
                recommended_penalty: self.penalty_for(matrix[new_idx][i]),
            })
            .collect();
        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        matches
    }

    fn similarity_matrix(&self, statements: &[&str], parent: Option<&NodeId>) -> Vec<Vec<f64>> {
        if let Some(model) = self.backend.model() {
            match embedding_matrix(model.as_ref(), statements) {
                Ok(matrix) => return matrix,
                Err(e) => warn!(
                    parent = ?parent,
                    error = %e,
                    "Embedding failed for sibling group, falling back to TF-IDF"
                ),
            }
        }
        tfidf::similarity_matrix(statements)
    }
}

fn embedding_matrix(
    model: &dyn EmbeddingModel,
    statements: &[&str],
) -> Result<Vec<Vec<f64>>, EmbeddingError> {
    let vectors = statements
        .iter()
        .map(|s| model.embed(s))
        .collect::<Result<Vec<_>, _>>()?;

    let n = vectors.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let similarity = model.similarity(&vectors[i], &vectors[j])?;
            matrix[i][j] = similarity;
            matrix[j][i] = similarity;
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reasonrank_domain::{FitnessMetrics, Side};

    struct FailingModel;

    impl EmbeddingModel for FailingModel {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::ModelNotLoaded)
        }

        fn dimension(&self) -> usize {
            8
        }
    }

    fn scored_tree(children: &[(&str, &str, f64)]) -> ArgumentTree {
        let mut tree = ArgumentTree::new();
        tree.add_node(BeliefNode::new("root", "Cities should fund public transit"))
            .unwrap();
        for (id, claim, score) in children {
            let mut node = BeliefNode::new(*id, *claim).with_parent("root", Side::Supporting);
            node.propagated_score = *score;
            tree.add_node(node).unwrap();
        }
        tree
    }

    #[test]
    fn test_penalty_curve() {
        let checker = UniquenessChecker::default();
        assert!((checker.penalty_for(0.75) - 1.0).abs() < 1e-12);
        assert!((checker.penalty_for(1.0) - 0.3).abs() < 1e-12);
        assert!((checker.penalty_for(0.875) - 0.65).abs() < 1e-12);
        assert_eq!(checker.penalty_for(0.2), 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScoringConfig {
            penalty_factor: 1.5,
            ..ScoringConfig::default()
        };
        assert!(matches!(UniquenessChecker::new(&config), Err(ScoringError::Config(_))));
    }

    #[test]
    fn test_exact_duplicate_penalizes_weaker_sibling() {
        let mut tree = scored_tree(&[
            ("a", "Transit reduces traffic congestion", 0.4),
            ("b", "Transit reduces traffic congestion", 0.2),
        ]);

        let penalties = UniquenessChecker::default().check_and_penalize(&mut tree);
        assert_eq!(penalties.len(), 1);
        assert_eq!(penalties[0].target_id, NodeId::new("b"));
        assert_eq!(penalties[0].similar_to_id, NodeId::new("a"));
        assert!((penalties[0].penalty_factor - 0.3).abs() < 1e-9);

        assert_eq!(tree.get(&NodeId::new("a")).unwrap().metrics.uniqueness, 1.0);
        assert!((tree.get(&NodeId::new("b")).unwrap().metrics.uniqueness - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_tie_penalizes_later_sibling() {
        let mut tree = scored_tree(&[
            ("a", "Transit reduces traffic congestion", 0.3),
            ("b", "Transit reduces traffic congestion", 0.3),
        ]);

        let penalties = UniquenessChecker::default().check_and_penalize(&mut tree);
        assert_eq!(penalties[0].target_id, NodeId::new("b"));
    }

    #[test]
    fn test_unrelated_siblings_untouched() {
        let mut tree = scored_tree(&[
            ("a", "Transit reduces traffic congestion", 0.4),
            ("b", "Bus fares burden low income riders", 0.2),
        ]);

        let penalties = UniquenessChecker::default().check_and_penalize(&mut tree);
        assert!(penalties.is_empty());
        assert!(tree.nodes().all(|n| n.metrics.uniqueness == 1.0));
    }

    #[test]
    fn test_three_duplicates_one_penalty_per_pair() {
        let mut tree = scored_tree(&[
            ("a", "Transit reduces traffic congestion", 0.5),
            ("b", "Transit reduces traffic congestion", 0.4),
            ("c", "Transit reduces traffic congestion", 0.3),
        ]);

        let penalties = UniquenessChecker::default().check_and_penalize(&mut tree);
        assert_eq!(penalties.len(), 3);

        let b = tree.get(&NodeId::new("b")).unwrap().metrics.uniqueness;
        let c = tree.get(&NodeId::new("c")).unwrap().metrics.uniqueness;
        assert!((b - 0.3).abs() < 1e-9);
        assert!((c - 0.09).abs() < 1e-9);
    }

    #[test]
    fn test_uniqueness_floor() {
        let mut tree = ArgumentTree::new();
        tree.add_node(BeliefNode::new("a", "Transit reduces traffic congestion"))
            .unwrap();
        tree.add_node(
            BeliefNode::new("b", "Transit reduces traffic congestion")
                .with_metrics(FitnessMetrics::new(0.5, 0.5, 0.5, 0.02)),
        )
        .unwrap();

        UniquenessChecker::default().check_and_penalize(&mut tree);
        assert_eq!(tree.get(&NodeId::new("b")).unwrap().metrics.uniqueness, 0.01);
    }

    #[test]
    fn test_failing_model_falls_back_to_tfidf() {
        let checker = UniquenessChecker::default().with_model(Arc::new(FailingModel));
        assert!(checker.backend().model().is_some());

        let mut tree = scored_tree(&[
            ("a", "Transit reduces traffic congestion", 0.4),
            ("b", "Transit reduces traffic congestion", 0.2),
        ]);
        assert_eq!(checker.check_and_penalize(&mut tree).len(), 1);
    }

    #[test]
    fn test_check_new_entry_does_not_mutate() {
        let existing = BeliefNode::new("a", "Transit reduces traffic congestion");
        let other = BeliefNode::new("b", "Bus fares burden low income riders");
        let checker = UniquenessChecker::default();

        let matches =
            checker.check_new_entry("Transit reduces traffic congestion", &[&existing, &other]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].sibling_id, NodeId::new("a"));
        assert!((matches[0].recommended_penalty - 0.3).abs() < 1e-9);
        assert_eq!(existing.metrics.uniqueness, 1.0);

        assert!(checker.check_new_entry("Anything", &[]).is_empty());
    }
}
