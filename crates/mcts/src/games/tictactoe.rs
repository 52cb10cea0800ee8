//! Tic-tac-toe on a 3×3 board.
//!
//! Player one plays X, player two plays O. The board keeps its own move
//! history so each player's last move can be undone.

use std::fmt;
use uct_core::{Board, Game, GameError, PlayerId, Status};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// Tic-tac-toe cell (index 0-8, row-major).
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TicTacToeCell(pub u8);

impl TicTacToeCell {
    /// Get the row (0-2).
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> u8 {
        self.0 % 3
    }
}

impl fmt::Display for TicTacToeCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// Tic-tac-toe board with undo history.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TicTacToeBoard {
    cells: [Option<PlayerId>; 9],
    history: Vec<(PlayerId, TicTacToeCell)>,
}

impl TicTacToeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mark at a cell, if any.
    pub fn get(&self, cell: TicTacToeCell) -> Option<PlayerId> {
        self.cells.get(cell.0 as usize).copied().flatten()
    }

    /// Moves on the board, oldest first.
    pub fn history(&self) -> &[(PlayerId, TicTacToeCell)] {
        &self.history
    }

    fn winner(&self) -> Option<PlayerId> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            (self.cells[line[1]] == Some(first) && self.cells[line[2]] == Some(first))
                .then_some(first)
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }
}

impl Board for TicTacToeBoard {
    type Cell = TicTacToeCell;

    fn perform_move(&mut self, player: PlayerId, cell: TicTacToeCell) -> bool {
        let Some(slot) = self.cells.get_mut(cell.0 as usize) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(player);
        self.history.push((player, cell));
        true
    }

    fn revert_move(&mut self, player: PlayerId) -> Option<TicTacToeCell> {
        let pos = self.history.iter().rposition(|(p, _)| *p == player)?;
        let (_, cell) = self.history.remove(pos);
        self.cells[cell.0 as usize] = None;
        Some(cell)
    }

    fn check_status(&self) -> Status {
        if let Some(winner) = self.winner() {
            Status::Won(winner)
        } else if self.is_full() {
            Status::Draw
        } else {
            Status::Ongoing
        }
    }

    fn empty_cells(&self) -> Vec<TicTacToeCell> {
        (0..9u8)
            .filter(|&i| self.cells[i as usize].is_none())
            .map(TicTacToeCell)
            .collect()
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, "|")?;
                }
                match self.cells[row * 3 + col] {
                    Some(PlayerId::One) => write!(f, " X ")?,
                    Some(PlayerId::Two) => write!(f, " O ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Constructors for tic-tac-toe games.
#[derive(Clone, Copy, Debug)]
pub struct TicTacToe;

impl TicTacToe {
    /// A game on an empty board, X to move.
    pub fn new_game() -> Game<TicTacToeBoard> {
        Game::new(TicTacToeBoard::new())
    }

    /// Replay `moves` alternately for X and O, starting with X.
    ///
    /// # Errors
    /// Fails on an out-of-range or occupied cell, or a move after the game ended.
    pub fn position(moves: &[u8]) -> Result<Game<TicTacToeBoard>, GameError> {
        let mut game = Self::new_game();

        for &cell in moves {
            if game.is_finished() {
                return Err(GameError::IllegalMove {
                    player: game.player_to_play(),
                    cell: format!("{:?}", TicTacToeCell(cell)),
                });
            }
            game.play_cell(TicTacToeCell(cell))?;
        }
        Ok(game)
    }
}
