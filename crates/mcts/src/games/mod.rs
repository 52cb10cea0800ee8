//! Concrete boards for the search engine.
//!
//! Tic-tac-toe is the reference instance: small enough to search to the
//! end, which makes the tree's bookkeeping easy to check by hand.

pub mod tictactoe;

pub use tictactoe::{TicTacToe, TicTacToeBoard, TicTacToeCell};
