//! Arena-allocated search tree and the four MCTS phases.
//!
//! The tree borrows the live game for its whole lifetime. Selection applies
//! each node's move on the way down and reverts it on the way back up, so
//! between two calls to [`Tree::execute`] the game is exactly as the caller
//! left it.

use rand::Rng;
use tracing::trace;
use uct_core::{Actor, Board, Game, GameError, Outcome, PlayerId};

use crate::config::UctConfig;
use crate::node::{uct_score, Node, NodeId, State};
use crate::search::SearchError;

/// What a single [`Tree::execute`] call did at the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Iteration {
    /// Selection reached a terminal position and backpropagated its outcome.
    Terminal(Outcome),
    /// A leaf was expanded; each new child was seeded with one rollout.
    Expanded { children: usize },
    /// A node had no open child left and was closed.
    Pruned,
    /// The root is already closed; nothing was done.
    Exhausted,
}

impl Iteration {
    /// Number of outcomes this iteration backpropagated to the root.
    pub fn outcomes(self) -> usize {
        match self {
            Iteration::Terminal(_) => 1,
            Iteration::Expanded { children } => children,
            Iteration::Pruned | Iteration::Exhausted => 0,
        }
    }
}

/// Search tree rooted at the current position of a game.
///
/// Nodes are stored in a contiguous vector and referenced by index; the
/// root is always [`NodeId::ROOT`].
pub struct Tree<'g, B: Board, R: Rng> {
    nodes: Vec<Node<B::Cell>>,
    game: &'g mut Game<B>,
    me: PlayerId,
    opponent: PlayerId,
    config: UctConfig,
    rng: R,
}

impl<'g, B: Board, R: Rng> Tree<'g, B, R> {
    /// Create a tree over `game`, scoring outcomes for `me`.
    pub fn new(game: &'g mut Game<B>, me: PlayerId, rng: R) -> Self {
        Self::with_config(game, me, UctConfig::default(), rng)
    }

    pub fn with_config(game: &'g mut Game<B>, me: PlayerId, config: UctConfig, rng: R) -> Self {
        Self {
            nodes: vec![Node::root()],
            game,
            me,
            opponent: me.opponent(),
            config,
            rng,
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<B::Cell> {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node<B::Cell> {
        &mut self.nodes[id.0]
    }

    fn add(&mut self, node: Node<B::Cell>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn root(&self) -> &Node<B::Cell> {
        self.get(NodeId::ROOT)
    }

    /// Children of `id` in expansion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node<B::Cell>)> {
        let nodes = &self.nodes;
        nodes[id.0]
            .children
            .iter()
            .map(move |&child| (child, &nodes[child.0]))
    }

    /// Number of nodes in the tree, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn game(&self) -> &Game<B> {
        self.game
    }

    /// The player whose outcomes the tree maximises.
    pub fn me(&self) -> PlayerId {
        self.me
    }

    pub fn opponent(&self) -> PlayerId {
        self.opponent
    }

    /// Run one MCTS iteration from the root.
    ///
    /// # Errors
    /// Returns `SearchError::Game` if the game rejects a move the tree drew
    /// from its own empty cells. Every ply applied during the call is still
    /// reverted, but the tree statistics are incomplete and the tree must be
    /// dropped.
    pub fn execute(&mut self) -> Result<Iteration, SearchError> {
        if self.root().fully_explored {
            return Ok(Iteration::Exhausted);
        }
        self.selection(NodeId::ROOT)
    }

    /// Root child with the most visits; the last one wins ties.
    pub fn node_with_max_visits(&self) -> Option<&Node<B::Cell>> {
        self.child_with_max_visits(NodeId::ROOT).map(|id| self.get(id))
    }

    /// Child of `id` with the most visits; the last one wins ties.
    pub fn child_with_max_visits(&self, id: NodeId) -> Option<NodeId> {
        let mut chosen = None;
        let mut max = 0;

        for (child_id, child) in self.children(id) {
            if child.stats.total_visits >= max {
                max = child.stats.total_visits;
                chosen = Some(child_id);
            }
        }
        chosen
    }

    /// The recommended move: the cell of the most visited root child.
    pub fn best_move(&self) -> Option<B::Cell> {
        self.node_with_max_visits().and_then(|node| node.state.cell)
    }

    fn selection(&mut self, id: NodeId) -> Result<Iteration, SearchError> {
        let cell = self.get(id).state.cell;
        if let Some(cell) = cell {
            self.apply(cell)?;
        }

        let iteration = self.select_from(id);

        // Undo even if the frontier failed; the frontier error takes precedence.
        if let Some(cell) = cell {
            let reverted = self.game.revert_play(cell);
            let iteration = iteration?;
            reverted?;
            return Ok(iteration);
        }
        iteration
    }

    fn select_from(&mut self, id: NodeId) -> Result<Iteration, SearchError> {
        if let Some(outcome) = Outcome::for_player(self.game.status(), self.me) {
            self.backpropagation(id, outcome);
            self.get_mut(id).fully_explored = true;
            trace!(node = id.0, %outcome, "terminal node closed");
            return Ok(Iteration::Terminal(outcome));
        }

        if self.get(id).children.is_empty() {
            return self.expansion(id);
        }

        match self.select_child(id) {
            Some(child) => self.selection(child),
            None => {
                self.get_mut(id).fully_explored = true;
                trace!(node = id.0, "all children explored, node closed");
                Ok(Iteration::Pruned)
            }
        }
    }

    /// Open child maximising UCT; the last one wins ties.
    fn select_child(&self, id: NodeId) -> Option<NodeId> {
        let parent_visits = self.get(id).stats.total_visits;
        let mut chosen = None;
        let mut max = f64::NEG_INFINITY;

        for (child_id, child) in self.children(id) {
            if child.fully_explored {
                continue;
            }
            let score = uct_score(&child.stats, parent_visits, self.config.exploration);
            if score >= max {
                max = score;
                chosen = Some(child_id);
            }
        }
        chosen
    }

    fn expansion(&mut self, id: NodeId) -> Result<Iteration, SearchError> {
        let cells = self.game.board().empty_cells();
        let children = cells.len();

        for cell in cells {
            let child = self.add(Node::new(Some(id), State::new(cell)));
            self.get_mut(id).children.push(child);
            self.simulation(child)?;
        }

        trace!(node = id.0, children, "expanded");
        Ok(Iteration::Expanded { children })
    }

    /// Random playout from the current position, credited to `id`.
    ///
    /// Every ply of the playout is reverted, even when the playout fails.
    fn simulation(&mut self, id: NodeId) -> Result<Outcome, SearchError> {
        let mut played = Vec::new();
        let rollout = self.rollout(&mut played);

        let mut reverted = Ok(());
        while let Some(cell) = played.pop() {
            reverted = self.game.revert_play(cell);
            if reverted.is_err() {
                break;
            }
        }

        // The playout error takes precedence over a failed undo.
        let outcome = rollout?;
        reverted?;

        self.backpropagation(id, outcome);
        Ok(outcome)
    }

    /// Play random plies until the game ends, recording each in `played`.
    fn rollout(&mut self, played: &mut Vec<B::Cell>) -> Result<Outcome, GameError> {
        let one = Actor::random(PlayerId::One);
        let two = Actor::random(PlayerId::Two);

        while !self.game.is_finished() {
            played.push(self.game.play(&one, &two, &mut self.rng)?);
        }
        Outcome::for_player(self.game.status(), self.me).ok_or(GameError::NotTerminal)
    }

    /// Credit `outcome` to `id` and every ancestor up to the root.
    fn backpropagation(&mut self, id: NodeId, outcome: Outcome) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get_mut(node_id);
            node.stats.record(outcome);
            current = node.parent;
        }
    }

    /// Play `cell` for whoever is to move.
    fn apply(&mut self, cell: B::Cell) -> Result<(), SearchError> {
        let one = Actor::fixed(PlayerId::One, cell);
        let two = Actor::fixed(PlayerId::Two, cell);
        self.game.play(&one, &two, &mut self.rng)?;
        Ok(())
    }
}
