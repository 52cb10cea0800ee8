//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices: a node's parent link is an index, so
//! it never owns the parent and the whole tree is dropped in one go.

use uct_core::Outcome;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The move a node stands for: the cell played to reach it from its parent.
///
/// The root has no move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State<C> {
    pub cell: Option<C>,
}

impl<C> State<C> {
    /// The empty state carried by the root.
    pub fn empty() -> Self {
        Self { cell: None }
    }

    pub fn new(cell: C) -> Self {
        Self { cell: Some(cell) }
    }
}

/// Statistics accumulated by backpropagation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeStats {
    /// Number of outcomes backpropagated through this node.
    pub total_visits: u32,

    /// Sum of those outcomes from the searching player's perspective.
    pub total_win_score: i64,
}

impl NodeStats {
    /// Fold one outcome into the statistics.
    pub fn record(&mut self, outcome: Outcome) {
        self.total_visits += 1;
        self.total_win_score += outcome.value();
    }

    /// Mean outcome per visit, 0.0 for an unvisited node.
    pub fn mean_score(&self) -> f64 {
        if self.total_visits == 0 {
            0.0
        } else {
            self.total_win_score as f64 / self.total_visits as f64
        }
    }
}

/// UCT score of a child given its parent's visit count.
///
/// `wins / parent_visits + exploration * sqrt(log2(parent_visits) / visits)`
///
/// The exploitation term is normalised by the parent's visits, not the
/// child's. Callers must only score children that have been visited.
pub fn uct_score(child: &NodeStats, parent_visits: u32, exploration: f64) -> f64 {
    debug_assert!(child.total_visits > 0, "UCT on an unvisited child");
    let parent = parent_visits as f64;
    child.total_win_score as f64 / parent
        + exploration * (parent.log2() / child.total_visits as f64).sqrt()
}

/// A node in the search tree.
#[derive(Clone, Debug)]
pub struct Node<C> {
    /// Parent node (None for root). Walked only by backpropagation.
    pub parent: Option<NodeId>,

    /// Children in expansion order.
    pub children: Vec<NodeId>,

    pub state: State<C>,

    pub stats: NodeStats,

    /// Set once nothing below this node is left to explore. Never cleared.
    pub fully_explored: bool,
}

impl<C> Node<C> {
    /// Create a fresh, unvisited node.
    pub fn new(parent: Option<NodeId>, state: State<C>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            state,
            stats: NodeStats::default(),
            fully_explored: false,
        }
    }

    /// Create the root node.
    pub fn root() -> Self {
        Self::new(None, State::empty())
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The cell this node plays, if it is not the root.
    pub fn cell(&self) -> Option<&C> {
        self.state.cell.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn test_node_stats_record() {
        let mut stats = NodeStats::default();
        assert_eq!(stats.mean_score(), 0.0);

        stats.record(Outcome::Win);
        stats.record(Outcome::Loss);
        stats.record(Outcome::Win);
        stats.record(Outcome::Draw);

        assert_eq!(stats.total_visits, 4);
        assert_eq!(stats.total_win_score, 1);
        assert!((stats.mean_score() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score_formula() {
        let child = NodeStats {
            total_visits: 2,
            total_win_score: 3,
        };
        // 3/8 + sqrt(2) * sqrt(3/2)
        let expected = 3.0 / 8.0 + SQRT_2 * (3.0f64 / 2.0).sqrt();
        assert!((uct_score(&child, 8, SQRT_2) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score_single_parent_visit() {
        // log2(1) = 0, so only the exploitation term is left
        let child = NodeStats {
            total_visits: 1,
            total_win_score: -1,
        };
        assert_eq!(uct_score(&child, 1, SQRT_2), -1.0);
    }

    #[test]
    fn test_uct_prefers_fewer_visits() {
        let rare = NodeStats {
            total_visits: 1,
            total_win_score: 0,
        };
        let common = NodeStats {
            total_visits: 10,
            total_win_score: 0,
        };
        assert!(uct_score(&rare, 16, SQRT_2) > uct_score(&common, 16, SQRT_2));
    }

    #[test]
    fn test_node_creation() {
        let node = Node::new(Some(NodeId::ROOT), State::new(4u8));
        assert_eq!(node.cell(), Some(&4));
        assert_eq!(node.parent, Some(NodeId::ROOT));
        assert!(!node.is_root());
        assert!(!node.fully_explored);
        assert_eq!(node.stats, NodeStats::default());
    }

    #[test]
    fn test_root_node() {
        let root: Node<u8> = Node::root();
        assert!(root.is_root());
        assert_eq!(root.cell(), None);
        assert!(root.children.is_empty());
    }
}
