//! Integration tests for duplication scoring
//!
//! These tests drive the scorer end to end: the worked scenarios, the
//! first-mover rule, and the properties callers rely on.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use reasonrank_dedup::{
    CommunityDebates, DuplicationConfig, DuplicationScorer, EquivalenceSubDebate,
    EvidenceVolumeTracker,
};
use reasonrank_domain::{BeliefNode, EvidenceSource, EvidenceTier, NodeId};
use reasonrank_similarity::{
    EmbeddingError, EmbeddingModel, MechanicalEquivalenceChecker, SemanticSimilarityScorer,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Embedding model backed by a fixed text → vector table
struct TableModel {
    table: HashMap<String, Vec<f32>>,
}

impl EmbeddingModel for TableModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.table
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::InferenceFailed(format!("unknown text: {}", text)))
    }

    fn dimension(&self) -> usize {
        2
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn arg_at(id: &str, claim: &str, minutes: i64) -> BeliefNode {
    BeliefNode::new(id, claim).submitted_at(base_time() + Duration::minutes(minutes))
}

#[test]
fn test_scenario_synonym_restatement_contributes_nothing() {
    let scorer = DuplicationScorer::default();
    let now = base_time() + Duration::hours(1);
    let args = vec![
        arg_at("a1", "Tax rates should be lower", 0),
        arg_at("a2", "Taxes should be reduced", 10),
    ];

    let scored = scorer.score_arguments(&args, None, Some(now));
    let pair = &scored[1].similarity_pairs[0];

    assert_eq!(pair.layer1_score, 1.0);
    assert!(pair.is_mechanical_duplicate);
    assert_eq!(pair.combined_score, 1.0);
    assert_eq!(scored[0].uniqueness_score, 1.0);
    assert!(scored[1].effective_contribution.abs() < 1e-9);
}

#[test]
fn test_scenario_partial_semantic_overlap() {
    let first = "Trump has a short attention span";
    let second = "Trump is unintelligent";
    let model = TableModel {
        table: HashMap::from([
            (first.to_string(), vec![1.0, 0.0]),
            (second.to_string(), vec![0.7, 0.714_142_8]),
        ]),
    };
    let model: Arc<dyn EmbeddingModel> = Arc::new(model);

    let layer1 = MechanicalEquivalenceChecker::new().score(first, second);
    assert!(layer1 < 0.85);

    let layer2 = SemanticSimilarityScorer::with_model(model.clone())
        .score(&BeliefNode::new("a", first), &BeliefNode::new("b", second));
    assert!((0.6..=0.8).contains(&layer2));

    let factor = SemanticSimilarityScorer::contribution_factor(layer2);
    assert!((0.2..=0.4).contains(&factor));

    let scorer = DuplicationScorer::default().with_model(model);
    let now = base_time() + Duration::days(30);
    let scored = scorer.score_arguments(
        &[arg_at("a", first, 0), arg_at("b", second, 5)],
        None,
        Some(now),
    );

    let kept = scored[1].effective_contribution / scored[1].arg.base_score;
    assert!(kept > 0.0 && kept < 1.0);
    assert_eq!(scored[1].similarity_pairs[0].layer2_score, Some(layer2));
}

#[test]
fn test_scenario_corroboration_boost() {
    let tracker = EvidenceVolumeTracker::default();
    assert_eq!(tracker.corroboration_boost(&[]), 0.0);

    let source = EvidenceSource::new("s1", NodeId::new("a1"), "Meta-analysis")
        .with_tier(EvidenceTier::T1)
        .with_weight(1.0);
    let boost = tracker.corroboration_boost(&[source]);
    assert!((boost - 0.0787).abs() < 1e-4);
}

#[test]
fn test_model_failure_never_surfaces() {
    let model: Arc<dyn EmbeddingModel> = Arc::new(TableModel {
        table: HashMap::new(),
    });
    let scorer = DuplicationScorer::default().with_model(model);
    let scored = scorer.score_arguments(
        &[
            arg_at("a", "Stadium subsidies waste money", 0),
            arg_at("b", "Stadium subsidies wasted money", 1),
        ],
        None,
        Some(base_time()),
    );

    let pair = &scored[1].similarity_pairs[0];
    assert!(!pair.is_mechanical_duplicate);
    assert!(pair.layer2_score.unwrap() > 0.8);
    assert!(scored[1].uniqueness_score < 0.5);
}

#[test]
fn test_community_override_lowers_similarity() {
    let config = DuplicationConfig {
        layer3_weight: 1.0,
        ..DuplicationConfig::default()
    };
    let scorer = DuplicationScorer::new(config).unwrap();
    let args = vec![
        arg_at("a", "carbon tax works", 0).with_embedding(vec![1.0, 0.0]),
        arg_at("b", "carbon tax fails", 1).with_embedding(vec![0.8, 0.6]),
    ];

    let without = scorer.score_arguments(&args, None, Some(base_time()));

    let mut debate = EquivalenceSubDebate::new("eq-1", NodeId::new("b"), NodeId::new("a"));
    debate.record_con(4.0);
    debate.resolve();
    let debates: CommunityDebates = [debate].into_iter().collect();
    let with = scorer.score_arguments(&args, Some(&debates), Some(base_time()));

    assert!(with[1].uniqueness_score > without[1].uniqueness_score);
}

#[test]
fn test_clusters_cannot_outrank_novel_argument() {
    let scorer = DuplicationScorer::default();
    // the restatements are three days old, the novel point ten minutes
    let now = base_time() + Duration::days(3);
    let mut args: Vec<BeliefNode> = (0..10)
        .map(|i| arg_at(&format!("dup{}", i), "Taxes should be reduced", i))
        .collect();
    args.push(arg_at("novel", "Stadium subsidies waste public money", 3 * 24 * 60 - 10));

    let scored = scorer.score_arguments(&args, None, Some(now));
    let clusters = scorer.cluster_arguments(&scored);

    let novel = scored.iter().find(|s| s.arg.id == NodeId::new("novel")).unwrap();
    let dup_cluster = clusters
        .iter()
        .find(|c| c.member_ids.len() == 10)
        .expect("duplicates should form one cluster");
    assert!(dup_cluster.cluster_score <= novel.effective_contribution);
}

#[test]
fn test_results_serialize() {
    let scorer = DuplicationScorer::default();
    let scored = scorer.score_arguments(&[arg_at("a", "Claim", 0)], None, Some(base_time()));
    let json = serde_json::to_value(&scored[0]).unwrap();

    assert_eq!(json["uniqueness_score"], 1.0);
    assert_eq!(json["arg"]["id"], "a");
}

const WORDS: &[&str] = &[
    "carbon", "tax", "emissions", "stadium", "subsidy", "schools", "funding", "climate", "jobs",
    "housing", "transit", "wages",
];

fn arb_claim() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..6).prop_map(|w| w.join(" "))
}

fn arb_args() -> impl Strategy<Value = Vec<BeliefNode>> {
    prop::collection::vec((arb_claim(), 0i64..600, 1.0f64..100.0), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (claim, minutes, base))| {
                arg_at(&format!("arg{}", i), &claim, minutes).with_base_score(base)
            })
            .collect()
    })
}

proptest! {
    /// Property: scoring unchanged input twice gives identical results
    #[test]
    fn test_idempotence(args in arb_args()) {
        let scorer = DuplicationScorer::default();
        let now = base_time() + Duration::hours(12);
        prop_assert_eq!(
            scorer.score_arguments(&args, None, Some(now)),
            scorer.score_arguments(&args, None, Some(now))
        );
    }

    /// Property: an unrelated third argument never changes an existing pair's uniqueness
    #[test]
    fn test_order_independence(
        claim_a in arb_claim(),
        claim_b in arb_claim(),
        x in 0.0f32..1.0,
        y in 0.0f32..1.0,
        third_minutes in -60i64..120,
    ) {
        let scorer = DuplicationScorer::default();
        let now = base_time() + Duration::hours(5);
        let a = arg_at("a", &claim_a, 0).with_embedding(vec![1.0, 0.0, 0.0]);
        let b = arg_at("b", &claim_b, 30).with_embedding(vec![x, y + 0.01, 0.0]);
        let unrelated = arg_at("c", "zeppelin quokka", third_minutes)
            .with_embedding(vec![0.0, 0.0, 1.0]);

        let pair = scorer.score_arguments(&[a.clone(), b.clone()], None, Some(now));
        let triple = scorer.score_arguments(&[a, b, unrelated], None, Some(now));

        prop_assert_eq!(pair[0].uniqueness_score, triple[0].uniqueness_score);
        prop_assert_eq!(pair[1].uniqueness_score, triple[1].uniqueness_score);
    }

    /// Property: Layer 1 at or above the threshold forces combined similarity to 1.0
    #[test]
    fn test_mechanical_short_circuit(claim in arb_claim(), x in -1.0f32..1.0, y in -1.0f32..1.0) {
        let scorer = DuplicationScorer::default();
        let reordered: Vec<&str> = claim.split(' ').rev().collect();
        let restated = format!("The {} should be", reordered.join(" it "));

        let a = arg_at("a", &claim, 0).with_embedding(vec![1.0, 0.0]);
        let b = arg_at("b", &restated, 1).with_embedding(vec![x, y]);

        let pair = scorer.compare(&b, &a, None);
        prop_assert!(pair.layer1_score >= 0.85);
        prop_assert_eq!(pair.combined_score, 1.0);
    }

    /// Property: effective contribution never rises as similarity to a prior rises
    #[test]
    fn test_monotonic_in_uniqueness(t1 in 0.0f64..1.57, t2 in 0.0f64..1.57, base in 1.0f64..100.0) {
        let scorer = DuplicationScorer::default();
        let now = base_time() + Duration::hours(1);
        let prior = arg_at("p", "alpha", 0).with_embedding(vec![1.0, 0.0]);
        let effective = |theta: f64| {
            let candidate = arg_at("c", "omega", 10)
                .with_base_score(base)
                .with_embedding(vec![theta.cos() as f32, theta.sin() as f32]);
            scorer.score_arguments(&[prior.clone(), candidate], None, Some(now))[1].effective_contribution
        };

        // larger angle = less similar = more unique
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        prop_assert!(effective(near) <= effective(far) + 1e-4);
    }

    /// Property: effective contribution never falls as the novelty multiplier rises
    #[test]
    fn test_monotonic_in_novelty(age_a in 0i64..5_000, age_b in 0i64..5_000, base in 1.0f64..100.0) {
        let scorer = DuplicationScorer::default();
        let now = base_time() + Duration::days(10);
        let score = |age: i64| {
            let arg = BeliefNode::new("x", "carbon tax")
                .with_base_score(base)
                .submitted_at(now - Duration::minutes(age));
            scorer.score_arguments(&[arg], None, Some(now)).remove(0)
        };

        let a = score(age_a);
        let b = score(age_b);
        if a.novelty_multiplier <= b.novelty_multiplier {
            prop_assert!(a.effective_contribution <= b.effective_contribution);
        } else {
            prop_assert!(a.effective_contribution >= b.effective_contribution);
        }
    }

    /// Property: among identical restatements the earliest keeps full uniqueness
    #[test]
    fn test_first_mover(claim in arb_claim(), minutes in prop::collection::hash_set(0i64..10_000, 2..8)) {
        let scorer = DuplicationScorer::default();
        let args: Vec<BeliefNode> = minutes
            .iter()
            .enumerate()
            .map(|(i, m)| arg_at(&format!("r{}", i), &claim, *m))
            .collect();

        let earliest = args
            .iter()
            .min_by_key(|a| a.submitted_at)
            .map(|a| a.id.clone())
            .unwrap();

        for scored in scorer.score_arguments(&args, None, Some(base_time())) {
            if scored.arg.id == earliest {
                prop_assert_eq!(scored.uniqueness_score, 1.0);
            } else {
                prop_assert_eq!(scored.uniqueness_score, 0.0);
            }
        }
    }
}
