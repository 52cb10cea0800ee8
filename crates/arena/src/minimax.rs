//! Exhaustive negamax with alpha-beta pruning, used as a perfect opponent.
//!
//! Works on any [`Board`] through the same apply/revert discipline as the
//! tree search, so it never clones a position.

use uct_core::{Board, Game, GameError, PlayerId, Status};

/// Score of a win found at depth 0. Faster wins score higher.
const WIN_SCORE: i32 = 1000;

/// Perfect-play baseline opponent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Minimax;

impl Minimax {
    pub fn new() -> Self {
        Self
    }

    /// Best move for the player to move, `None` if the game is over.
    ///
    /// Ties go to the first cell in board order, so the choice is
    /// deterministic.
    pub fn best_move<B: Board>(&self, game: &mut Game<B>) -> Result<Option<B::Cell>, GameError> {
        if game.is_finished() {
            return Ok(None);
        }

        let player = game.player_to_play();
        let mut best_move = None;
        let mut best_score = i32::MIN;

        for cell in game.board().empty_cells() {
            game.play_cell(cell)?;
            let score = self.negamax(game, player.opponent(), 1, -i32::MAX, i32::MAX);
            game.revert_play(cell)?;
            let score = -score?;

            if score > best_score {
                best_score = score;
                best_move = Some(cell);
            }
        }

        Ok(best_move)
    }

    /// Value of the position for `player`, who is to move.
    fn negamax<B: Board>(
        &self,
        game: &mut Game<B>,
        player: PlayerId,
        depth: i32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<i32, GameError> {
        match game.status() {
            Status::Won(winner) if winner == player => return Ok(WIN_SCORE - depth),
            Status::Won(_) => return Ok(depth - WIN_SCORE),
            Status::Draw => return Ok(0),
            Status::Ongoing => {}
        }

        let mut best = -i32::MAX;
        for cell in game.board().empty_cells() {
            game.play_cell(cell)?;
            let score = self.negamax(game, player.opponent(), depth + 1, -beta, -alpha);
            game.revert_play(cell)?;
            let score = -score?;

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break; // Beta cutoff
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uct_mcts::games::{TicTacToe, TicTacToeCell};

    #[test]
    fn test_minimax_takes_the_win() {
        // X to move, 8 completes the main diagonal
        let mut game = TicTacToe::position(&[0, 2, 4, 5]).unwrap();
        let best = Minimax::new().best_move(&mut game).unwrap();
        assert_eq!(best, Some(TicTacToeCell(8)));
    }

    #[test]
    fn test_minimax_blocks() {
        // O to move, X threatens 2 on the top row
        let mut game = TicTacToe::position(&[0, 4, 1]).unwrap();
        let best = Minimax::new().best_move(&mut game).unwrap();
        assert_eq!(best, Some(TicTacToeCell(2)));
    }

    #[test]
    fn test_minimax_restores_game() {
        let mut game = TicTacToe::position(&[4]).unwrap();
        let before = game.clone();
        let best = Minimax::new().best_move(&mut game).unwrap();

        assert!(best.is_some());
        assert_eq!(game, before);
    }

    #[test]
    fn test_minimax_on_finished_game() {
        let mut game = TicTacToe::position(&[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(Minimax::new().best_move(&mut game).unwrap(), None);
    }

    #[test]
    fn test_minimax_self_play_draws() {
        let minimax = Minimax::new();
        let mut game = TicTacToe::new_game();

        while let Some(cell) = minimax.best_move(&mut game).unwrap() {
            game.play_cell(cell).unwrap();
        }
        assert_eq!(game.status(), Status::Draw);
    }
}
