//! Move proposers used to drive [`Game::play`](crate::Game::play).

use rand::Rng;

use crate::PlayerId;

/// A player actor: given the empty cells, propose one.
///
/// The search uses `Fixed` actors to replay a tree node's move regardless of
/// whose turn it is, and `Random` actors for rollouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Actor<C> {
    /// Always proposes the same cell.
    Fixed { player: PlayerId, cell: C },
    /// Proposes a uniformly random empty cell.
    Random { player: PlayerId },
}

impl<C: Copy> Actor<C> {
    pub fn fixed(player: PlayerId, cell: C) -> Self {
        Actor::Fixed { player, cell }
    }

    pub fn random(player: PlayerId) -> Self {
        Actor::Random { player }
    }

    /// The player this actor moves for.
    pub fn player(&self) -> PlayerId {
        match *self {
            Actor::Fixed { player, .. } | Actor::Random { player } => player,
        }
    }

    /// Propose a cell given the currently empty cells.
    ///
    /// A fixed actor ignores `empty` (legality is the board's call). A random
    /// actor returns `None` when there is nothing to choose from.
    pub fn propose<R: Rng + ?Sized>(&self, empty: &[C], rng: &mut R) -> Option<C> {
        match *self {
            Actor::Fixed { cell, .. } => Some(cell),
            Actor::Random { .. } => {
                if empty.is_empty() {
                    None
                } else {
                    Some(empty[rng.gen_range(0..empty.len())])
                }
            }
        }
    }
}
