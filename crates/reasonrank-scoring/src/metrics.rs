//! Metrics collection for scoring passes

/// Counters collected by a [`ReasonRankScorer`](crate::ReasonRankScorer)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringMetrics {
    /// Full-tree scoring passes completed
    pub passes: usize,

    /// Node scores computed across all passes
    pub nodes_scored: usize,

    /// Passes triggered by an insertion or update
    pub rescores: usize,

    /// Uniqueness penalties applied
    pub penalties_applied: usize,

    /// Nodes below the debunked threshold after the latest pass
    pub debunked: usize,
}

impl ScoringMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed scoring pass
    pub fn record_pass(&mut self, nodes: usize, debunked: usize) {
        self.passes += 1;
        self.nodes_scored += nodes;
        self.debunked = debunked;
    }

    /// Record that a pass was triggered by a change to the tree
    pub fn record_rescore(&mut self) {
        self.rescores += 1;
    }

    /// Record applied uniqueness penalties
    pub fn record_penalties(&mut self, count: usize) {
        self.penalties_applied += count;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = [
            "Scoring Metrics Summary".to_string(),
            "=======================".to_string(),
            format!("Scoring passes: {}", self.passes),
            format!("Nodes scored: {}", self.nodes_scored),
            format!("Rescores: {}", self.rescores),
            format!("Uniqueness penalties: {}", self.penalties_applied),
            format!("Debunked (latest pass): {}", self.debunked),
        ];
        lines.join("\n")
    }
}
