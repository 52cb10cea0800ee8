//! Search driver: run a bounded number of UCT iterations and report.

use rand::Rng;
use thiserror::Error;
use tracing::debug;
use uct_core::{Board, Game, GameError, PlayerId};

use crate::config::UctConfig;
use crate::node::NodeId;
use crate::tree::{Iteration, Tree};

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The game rejected a move or an undo the tree issued. The tree only
    /// plays cells reported empty by the board, so this is a broken contract.
    #[error("Game contract violated: {0}")]
    Game(#[from] GameError),
}

/// Statistics of one root move after a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveStats<C> {
    pub cell: C,
    pub visits: u32,
    pub win_score: i64,
    pub fully_explored: bool,
}

impl<C> MoveStats<C> {
    /// Mean outcome per visit, in [-1, 1].
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.win_score as f64 / self.visits as f64
        }
    }
}

/// Result of a search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<C> {
    /// Most visited root move, `None` if the position has no moves.
    pub best_move: Option<C>,

    /// Root moves in expansion order.
    pub children: Vec<MoveStats<C>>,

    /// `Tree::execute` calls that did work.
    pub iterations: usize,

    /// Outcomes backpropagated to the root.
    pub root_visits: u32,

    /// Whether the whole tree was explored before the budget ran out.
    pub exhausted: bool,
}

impl<C: Copy> SearchResult<C> {
    fn from_tree<B, R>(tree: &Tree<'_, B, R>, iterations: usize) -> Self
    where
        B: Board<Cell = C>,
        R: Rng,
    {
        let children = tree
            .children(NodeId::ROOT)
            .filter_map(|(_, node)| {
                node.state.cell.map(|cell| MoveStats {
                    cell,
                    visits: node.stats.total_visits,
                    win_score: node.stats.total_win_score,
                    fully_explored: node.fully_explored,
                })
            })
            .collect();

        Self {
            best_move: tree.best_move(),
            children,
            iterations,
            root_visits: tree.root().stats.total_visits,
            exhausted: tree.root().fully_explored,
        }
    }

    /// Visit count per root move.
    pub fn visit_counts(&self) -> Vec<(C, u32)> {
        self.children.iter().map(|m| (m.cell, m.visits)).collect()
    }
}

/// UCT Monte Carlo Tree Search.
///
/// Each call to [`Mcts::search`] grows a fresh tree; nothing is reused
/// across searches.
pub struct Mcts<R: Rng> {
    config: UctConfig,
    rng: R,
}

impl<R: Rng> Mcts<R> {
    pub fn new(config: UctConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Search the current position of `game` for `me`.
    ///
    /// The game is left exactly as it was passed in.
    pub fn search<B: Board>(
        &mut self,
        game: &mut Game<B>,
        me: PlayerId,
    ) -> Result<SearchResult<B::Cell>, SearchError> {
        let mut tree = Tree::with_config(game, me, self.config.clone(), &mut self.rng);
        let mut iterations = 0;

        for _ in 0..self.config.iterations {
            if tree.execute()? == Iteration::Exhausted {
                break;
            }
            iterations += 1;
        }

        let result = SearchResult::from_tree(&tree, iterations);
        debug!(
            iterations,
            nodes = tree.len(),
            root_visits = result.root_visits,
            exhausted = result.exhausted,
            "search complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{TicTacToe, TicTacToeCell};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn mcts(seed: u64, iterations: usize) -> Mcts<ChaCha8Rng> {
        Mcts::new(
            UctConfig::with_iterations(iterations),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_search_basic() {
        let mut game = TicTacToe::new_game();
        let before = game.clone();

        let result = mcts(42, 200).search(&mut game, PlayerId::One).unwrap();

        assert_eq!(game, before);
        assert_eq!(result.children.len(), 9);
        assert_eq!(result.iterations, 200);
        assert!(!result.exhausted);
        assert!(result.best_move.is_some());

        let child_visits: u32 = result.children.iter().map(|m| m.visits).sum();
        assert_eq!(child_visits, result.root_visits);
        for stats in &result.children {
            assert!(stats.mean_score() >= -1.0 && stats.mean_score() <= 1.0);
        }
    }

    #[test]
    fn test_search_deterministic() {
        let run = |seed: u64| {
            let mut game = TicTacToe::position(&[4]).unwrap();
            mcts(seed, 150).search(&mut game, PlayerId::Two).unwrap()
        };

        let first = run(12345);
        let second = run(12345);
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_stops_when_exhausted() {
        // Two empty cells left: the tree is tiny.
        let mut game = TicTacToe::position(&[0, 1, 2, 4, 3, 5, 7]).unwrap();
        let result = mcts(7, 1000).search(&mut game, PlayerId::Two).unwrap();

        assert!(result.exhausted);
        assert!(result.iterations < 1000);
        assert!(result.children.iter().all(|m| m.fully_explored));
    }

    #[test]
    fn test_search_on_finished_game() {
        let mut game = TicTacToe::position(&[0, 3, 1, 4, 2]).unwrap();
        let result = mcts(1, 10).search(&mut game, PlayerId::Two).unwrap();

        assert_eq!(result.best_move, None);
        assert!(result.children.is_empty());
        assert_eq!(result.iterations, 1);
        assert_eq!(result.root_visits, 1);
        assert!(result.exhausted);
    }

    #[test]
    fn test_visit_counts_order() {
        let mut game = TicTacToe::position(&[4, 0, 8]).unwrap();
        let result = mcts(3, 50).search(&mut game, PlayerId::Two).unwrap();
        let cells: Vec<TicTacToeCell> = result.visit_counts().iter().map(|(c, _)| *c).collect();

        assert_eq!(
            cells,
            vec![1, 2, 3, 5, 6, 7].into_iter().map(TicTacToeCell).collect::<Vec<_>>()
        );
    }
}
