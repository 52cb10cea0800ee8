//! UCT Core - Game contracts consumed by the search engine
//!
//! This crate defines the collaborators the search core talks to. The
//! search never clones a board: it applies a move, looks at the result and
//! reverts it, so every contract here is built around apply/revert.
//!
//! # Types
//!
//! - [`Board`] - Trait for cell-based boards (apply, revert, status, empty cells)
//! - [`Game`] - Wraps a board and tracks whose turn it is from ply parity
//! - [`Actor`] - Fixed-move or random move proposer
//! - [`Outcome`] - Game result from one player's perspective (-1, 0, +1)

mod board;
mod error;
mod game;
mod player;
mod types;

pub use board::{Board, PlayerId, Status};
pub use error::{GameError, Result};
pub use game::Game;
pub use player::Actor;
pub use types::Outcome;
