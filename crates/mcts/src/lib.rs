//! Monte Carlo Tree Search with UCT selection.
//!
//! This crate grows a search tree over a live [`uct_core::Game`] without
//! ever cloning its board: every node's move is applied on the way down and
//! reverted on the way back up.
//!
//! # Phases
//!
//! - **Selection**: descend through open children maximising the UCT score
//! - **Expansion**: add one child per empty cell at a leaf
//! - **Simulation**: seed each new child with one random rollout
//! - **Backpropagation**: add the outcome to every node up to the root
//!
//! # Example
//!
//! ```
//! use uct_core::PlayerId;
//! use uct_mcts::{games::TicTacToe, Mcts, UctConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut game = TicTacToe::new_game();
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::new(UctConfig::with_iterations(100), rng);
//!
//! let result = mcts.search(&mut game, PlayerId::One).expect("search");
//! println!("Best move: {:?}", result.best_move);
//! println!("Root visits: {}", result.root_visits);
//! ```

pub mod config;
pub mod games;
pub mod node;
pub mod search;
pub mod tree;

pub use config::UctConfig;
pub use node::{uct_score, Node, NodeId, NodeStats, State};
pub use search::{Mcts, MoveStats, SearchError, SearchResult};
pub use tree::{Iteration, Tree};
