//! Layer 3: community verification
//!
//! For contested pairs a pro/con sub-debate asks "are these the same
//! argument?". Its resolved score joins the blend; until then the pair is
//! scored on Layers 1 and 2 alone.

use reasonrank_domain::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Question shown on every equivalence sub-debate unless overridden
pub const DEFAULT_EQUIVALENCE_QUESTION: &str = "Are these two arguments saying the same thing?";

/// Similarity reported by a resolved debate that received no votes
pub const NEUTRAL_SIMILARITY: f64 = 0.5;

/// A community sub-debate on whether two arguments say the same thing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceSubDebate {
    /// Sub-debate identifier
    pub id: String,
    /// First argument under comparison
    pub arg_a_id: NodeId,
    /// Second argument under comparison
    pub arg_b_id: NodeId,
    /// Question shown to participants
    pub question: String,
    /// Aggregated weight of reasons for equivalence
    pub pro_weight: f64,
    /// Aggregated weight of reasons against equivalence
    pub con_weight: f64,
    /// Whether the debate has been resolved
    pub resolved: bool,
    /// Resolved similarity estimate, set by [`resolve`](Self::resolve)
    pub community_similarity_score: Option<f64>,
}

impl EquivalenceSubDebate {
    /// Open a debate on two arguments
    pub fn new(id: impl Into<String>, arg_a_id: NodeId, arg_b_id: NodeId) -> Self {
        Self {
            id: id.into(),
            arg_a_id,
            arg_b_id,
            question: DEFAULT_EQUIVALENCE_QUESTION.to_string(),
            pro_weight: 0.0,
            con_weight: 0.0,
            resolved: false,
            community_similarity_score: None,
        }
    }

    /// Override the question text
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    /// Add weight to the "same argument" side
    ///
    /// Negative or non-finite weights are ignored. A vote reopens a resolved
    /// debate.
    pub fn record_pro(&mut self, weight: f64) {
        if valid_weight(weight) {
            self.pro_weight += weight;
            self.reopen();
        }
    }

    /// Add weight to the "different arguments" side
    ///
    /// Negative or non-finite weights are ignored. A vote reopens a resolved
    /// debate.
    pub fn record_con(&mut self, weight: f64) {
        if valid_weight(weight) {
            self.con_weight += weight;
            self.reopen();
        }
    }

    fn reopen(&mut self) {
        self.resolved = false;
        self.community_similarity_score = None;
    }

    /// Resolve the debate into a similarity estimate in [0, 1]
    ///
    /// `pro / (pro + con)`, or 0.5 when nobody voted.
    pub fn resolve(&mut self) -> f64 {
        let total = self.pro_weight + self.con_weight;
        let score = if total > 0.0 {
            self.pro_weight / total
        } else {
            NEUTRAL_SIMILARITY
        };

        self.community_similarity_score = Some(score);
        self.resolved = true;
        score
    }

    /// The resolved similarity, or None while the debate is open
    pub fn community_similarity(&self) -> Option<f64> {
        if self.resolved {
            self.community_similarity_score
        } else {
            None
        }
    }

    /// Whether this debate concerns the given pair, in either order
    pub fn concerns(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.arg_a_id == a && &self.arg_b_id == b) || (&self.arg_a_id == b && &self.arg_b_id == a)
    }
}

fn valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}

/// Equivalence sub-debates indexed by argument pair
///
/// Lookups are symmetric: a debate registered for (a, b) is found for (b, a).
#[derive(Debug, Clone, Default)]
pub struct CommunityDebates {
    debates: HashMap<(NodeId, NodeId), EquivalenceSubDebate>,
}

impl CommunityDebates {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: &NodeId, b: &NodeId) -> (NodeId, NodeId) {
        if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        }
    }

    /// Register a debate, replacing any earlier one for the same pair
    pub fn insert(&mut self, debate: EquivalenceSubDebate) -> Option<EquivalenceSubDebate> {
        let key = Self::key(&debate.arg_a_id, &debate.arg_b_id);
        self.debates.insert(key, debate)
    }

    /// The debate for a pair, in either order
    pub fn get(&self, a: &NodeId, b: &NodeId) -> Option<&EquivalenceSubDebate> {
        self.debates.get(&Self::key(a, b))
    }

    /// Mutable access to the debate for a pair, in either order
    pub fn get_mut(&mut self, a: &NodeId, b: &NodeId) -> Option<&mut EquivalenceSubDebate> {
        self.debates.get_mut(&Self::key(a, b))
    }

    /// Resolved similarity for a pair, if a resolved debate exists
    pub fn similarity(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        self.get(a, b).and_then(EquivalenceSubDebate::community_similarity)
    }

    /// Number of registered debates
    pub fn len(&self) -> usize {
        self.debates.len()
    }

    /// Whether no debate is registered
    pub fn is_empty(&self) -> bool {
        self.debates.is_empty()
    }

    /// Iterate over every registered debate
    pub fn iter(&self) -> impl Iterator<Item = &EquivalenceSubDebate> {
        self.debates.values()
    }
}

impl FromIterator<EquivalenceSubDebate> for CommunityDebates {
    fn from_iter<I: IntoIterator<Item = EquivalenceSubDebate>>(iter: I) -> Self {
        let mut debates = Self::new();
        for debate in iter {
            debates.insert(debate);
        }
        debates
    }
}
