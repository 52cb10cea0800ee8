use std::fmt;

/// One of the two players. Player one always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Numeric id (1 or 2).
    pub fn id(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// Get the opposing player.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Status of a board as reported by [`Board::check_status`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Status {
    Ongoing,
    Won(PlayerId),
    Draw,
}

impl Status {
    /// Returns true for any status other than [`Status::Ongoing`].
    pub fn is_terminal(self) -> bool {
        self != Status::Ongoing
    }
}

/// A mutable, cell-based board for a two-player game.
///
/// Boards are mutated in place and must support undo: the search applies
/// a move, inspects the position, and reverts it on the way back up.
pub trait Board {
    /// A reference to one cell of the board.
    type Cell: Copy + Eq + fmt::Debug;

    /// Place `player`'s mark on `cell`. Returns false if the move is illegal,
    /// in which case the board is unchanged.
    fn perform_move(&mut self, player: PlayerId, cell: Self::Cell) -> bool;

    /// Undo the most recent move made by `player`, returning the cell it
    /// cleared, or `None` if that player has no move to undo.
    fn revert_move(&mut self, player: PlayerId) -> Option<Self::Cell>;

    /// Current status of the board.
    fn check_status(&self) -> Status;

    /// All empty cells, in a stable order.
    fn empty_cells(&self) -> Vec<Self::Cell>;
}
