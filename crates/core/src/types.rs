//! Game outcome with its range enforced by the type.

use crate::{PlayerId, Status};

/// Result of a finished game from one player's perspective.
///
/// Invariant: the numeric value is always one of -1, 0, +1.
///
/// # Example
/// ```
/// use uct_core::{Outcome, PlayerId, Status};
///
/// let outcome = Outcome::for_player(Status::Won(PlayerId::One), PlayerId::One);
/// assert_eq!(outcome, Some(Outcome::Win));
/// assert_eq!(Outcome::Win.value(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Loss,
    Draw,
    Win,
}

impl Outcome {
    /// Score a board status for `player`.
    ///
    /// Returns `None` while the game is still ongoing.
    pub fn for_player(status: Status, player: PlayerId) -> Option<Self> {
        match status {
            Status::Ongoing => None,
            Status::Draw => Some(Outcome::Draw),
            Status::Won(winner) if winner == player => Some(Outcome::Win),
            Status::Won(_) => Some(Outcome::Loss),
        }
    }

    /// Numeric increment used when accumulating scores.
    pub fn value(self) -> i64 {
        match self {
            Outcome::Loss => -1,
            Outcome::Draw => 0,
            Outcome::Win => 1,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Loss => write!(f, "loss"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Win => write!(f, "win"),
        }
    }
}

impl From<Outcome> for i64 {
    fn from(outcome: Outcome) -> i64 {
        outcome.value()
    }
}
