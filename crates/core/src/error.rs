use thiserror::Error;

use crate::PlayerId;

/// Errors raised when the game contract is used out of protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal move {cell} for player {player}")]
    IllegalMove { player: PlayerId, cell: String },

    #[error("Actor for player {actor} was asked to move for player {expected}")]
    ActorMismatch { expected: PlayerId, actor: PlayerId },

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("No move to revert")]
    NothingToRevert,

    #[error("Reverted {actual} but expected {expected}")]
    RevertMismatch { expected: String, actual: String },

    #[error("Game is not terminal")]
    NotTerminal,
}

/// Convenience Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
