//! Argument tree and ReasonRank propagation
//!
//! The tree owns every [`BeliefNode`] and keeps a parent → children index.
//! [`ArgumentTree::compute_all_scores`] walks the tree in strict post-order so
//! each node is scored only after all of its descendants:
//!
//! ```text
//! impact          = Σ child.propagated × child.linkage   (supporting children)
//! counter_impact  = Σ child.propagated × child.linkage   (weakening children)
//! propagated      = max((impact − counter_impact) × linkage × truth × uniqueness, MIN_RANK)
//! ```
//!
//! Leaves keep their base rank. No node is ever removed.

use crate::traits::ArgumentSource;
use crate::{BeliefNode, DomainError, NodeId, Side, MIN_RANK_SCORE};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Weighted pro and con pressure on a node from its direct children
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ImpactSummary {
    /// Σ propagated × linkage over supporting children
    pub impact: f64,
    /// Σ propagated × linkage over weakening children
    pub counter_impact: f64,
    /// Number of supporting children
    pub pro_count: usize,
    /// Number of weakening children
    pub con_count: usize,
}

impl ImpactSummary {
    /// impact − counter_impact
    pub fn net_impact(&self) -> f64 {
        self.impact - self.counter_impact
    }

    /// Whether the node has any children at all
    pub fn has_children(&self) -> bool {
        self.pro_count + self.con_count > 0
    }
}

/// Direct children of one parent, or the roots when `parent` is `None`
#[derive(Debug, Clone, PartialEq)]
pub struct SiblingGroup {
    /// Shared parent (None = virtual root group)
    pub parent: Option<NodeId>,
    /// Member ids in insertion order
    pub members: Vec<NodeId>,
}

/// The full hierarchy of belief nodes
#[derive(Debug, Clone, Default)]
pub struct ArgumentTree {
    nodes: HashMap<NodeId, BeliefNode>,
    insertion_order: Vec<NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl ArgumentTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from nodes, in order
    pub fn from_nodes<I>(nodes: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = BeliefNode>,
    {
        let mut tree = Self::new();
        for node in nodes {
            tree.add_node(node)?;
        }
        Ok(tree)
    }

    /// Build a tree from every record a collaborator holds for a debate
    pub fn load<S>(source: &S, debate_id: &str) -> Result<Self, DomainError>
    where
        S: ArgumentSource,
        S::Error: std::fmt::Display,
    {
        let records = source
            .load_arguments(debate_id)
            .map_err(|e| DomainError::Source(format!("Failed to load debate {}: {}", debate_id, e)))?;

        Self::from_nodes(records.into_iter().map(BeliefNode::from))
    }

    /// Add a node to the arena
    ///
    /// A child may arrive before its parent. Duplicate ids and parent links
    /// that would close a loop are rejected.
    pub fn add_node(&mut self, node: BeliefNode) -> Result<(), DomainError> {
        if self.nodes.contains_key(&node.id) {
            return Err(DomainError::DuplicateNode(node.id.clone()));
        }

        if let Some(parent) = &node.parent_id {
            if self.reaches(parent, &node.id) {
                return Err(DomainError::CycleDetected {
                    node: node.id.clone(),
                    parent: parent.clone(),
                });
            }
            self.children
                .entry(parent.clone())
                .or_default()
                .push(node.id.clone());
        }

        self.insertion_order.push(node.id.clone());
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Whether walking up from `start` ever lands on `target`
    fn reaches(&self, start: &NodeId, target: &NodeId) -> bool {
        let mut current = start;
        loop {
            if current == target {
                return true;
            }
            match self.nodes.get(current).and_then(|n| n.parent_id.as_ref()) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node exists
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get a node by id
    pub fn get(&self, id: &NodeId) -> Option<&BeliefNode> {
        self.nodes.get(id)
    }

    /// Get a mutable node by id
    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut BeliefNode> {
        self.nodes.get_mut(id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &BeliefNode> {
        self.insertion_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Direct children of a node, in insertion order
    pub fn get_children(&self, id: &NodeId) -> Vec<&BeliefNode> {
        self.children
            .get(id)
            .map(|ids| ids.iter().filter_map(|cid| self.nodes.get(cid)).collect())
            .unwrap_or_default()
    }

    /// Children on the given side
    pub fn get_children_on(&self, id: &NodeId, side: Side) -> Vec<&BeliefNode> {
        self.get_children(id)
            .into_iter()
            .filter(|c| c.side == side)
            .collect()
    }

    /// Supporting (pro) children
    pub fn get_supporting_children(&self, id: &NodeId) -> Vec<&BeliefNode> {
        self.get_children_on(id, Side::Supporting)
    }

    /// Weakening (con) children
    pub fn get_weakening_children(&self, id: &NodeId) -> Vec<&BeliefNode> {
        self.get_children_on(id, Side::Weakening)
    }

    /// Top-level beliefs (no parent)
    ///
    /// Nodes whose parent has not been added yet are not roots; see
    /// [`orphans`](Self::orphans).
    pub fn get_root_nodes(&self) -> Vec<&BeliefNode> {
        self.nodes().filter(|n| n.is_root()).collect()
    }

    /// Nodes whose parent id is not in the tree
    ///
    /// Children may arrive before their parent, so this is not an error, but
    /// until the parent arrives an orphan is neither a root nor anyone's
    /// child: it is scored on its own subtree and left out of every
    /// leaderboard and root sibling group.
    pub fn orphans(&self) -> Vec<&BeliefNode> {
        self.nodes()
            .filter(|n| {
                n.parent_id
                    .as_ref()
                    .is_some_and(|parent| !self.nodes.contains_key(parent))
            })
            .collect()
    }

    /// Children sorted by propagated score, best first
    pub fn get_sorted_children(&self, id: &NodeId) -> Vec<&BeliefNode> {
        let mut children = self.get_children(id);
        sort_best_first(&mut children);
        children
    }

    /// Roots sorted by propagated score, best first
    pub fn get_sorted_roots(&self) -> Vec<&BeliefNode> {
        let mut roots = self.get_root_nodes();
        sort_best_first(&mut roots);
        roots
    }

    /// Every group of direct siblings, starting with the virtual root group
    ///
    /// Groups follow the order in which their parents first gained a child.
    pub fn sibling_groups(&self) -> Vec<SiblingGroup> {
        let mut groups = vec![SiblingGroup {
            parent: None,
            members: self.get_root_nodes().iter().map(|n| n.id.clone()).collect(),
        }];

        let mut seen = HashSet::new();
        for node in self.nodes() {
            let Some(parent) = &node.parent_id else {
                continue;
            };
            if !seen.insert(parent.clone()) {
                continue;
            }
            let members = self
                .get_children(parent)
                .iter()
                .map(|n| n.id.clone())
                .collect();
            groups.push(SiblingGroup {
                parent: Some(parent.clone()),
                members,
            });
        }

        groups
    }

    /// Weighted pro/con pressure currently exerted on a node by its children
    pub fn impact_summary(&self, id: &NodeId) -> ImpactSummary {
        let mut summary = ImpactSummary::default();
        for child in self.get_children(id) {
            let weighted = child.propagated_score * child.metrics.linkage;
            match child.side {
                Side::Supporting => {
                    summary.impact += weighted;
                    summary.pro_count += 1;
                }
                Side::Weakening => {
                    summary.counter_impact += weighted;
                    summary.con_count += 1;
                }
            }
        }
        summary
    }

    /// Node ids in post-order: every child precedes its parent
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut visited: HashSet<&NodeId> = HashSet::with_capacity(self.nodes.len());
        let mut order = Vec::with_capacity(self.nodes.len());

        for start in &self.insertion_order {
            if visited.contains(start) {
                continue;
            }
            let mut stack: Vec<(&NodeId, bool)> = vec![(start, false)];
            while let Some((id, expanded)) = stack.pop() {
                if expanded {
                    order.push(id.clone());
                    continue;
                }
                if !visited.insert(id) {
                    continue;
                }
                stack.push((id, true));
                if let Some(kids) = self.children.get(id) {
                    for kid in kids.iter().rev() {
                        if self.nodes.contains_key(kid) && !visited.contains(kid) {
                            stack.push((kid, false));
                        }
                    }
                }
            }
        }

        order
    }

    /// Compute ReasonRank for every node, propagating bottom-up
    ///
    /// 1. Base rank for every node.
    /// 2. Post-order walk: leaves keep their base rank; internal nodes take
    ///    `(impact − counter_impact) × linkage × truth × uniqueness`.
    /// 3. Nothing drops below [`MIN_RANK_SCORE`].
    pub fn compute_all_scores(&mut self) {
        for node in self.nodes.values_mut() {
            node.reason_rank = node.compute_base_rank();
        }

        for id in self.post_order() {
            let summary = self.impact_summary(&id);
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };

            if !summary.has_children() {
                node.propagated_score = node.reason_rank;
                continue;
            }

            let m = node.metrics;
            node.propagated_score =
                (summary.net_impact() * m.linkage * m.truth * m.uniqueness).max(MIN_RANK_SCORE);
            node.reason_rank = node.propagated_score;
        }
    }
}

fn sort_best_first(nodes: &mut [&BeliefNode]) {
    nodes.sort_by(|a, b| b.propagated_score.total_cmp(&a.propagated_score));
}
