use rand::Rng;

use crate::{Actor, Board, GameError, PlayerId, Result, Status};

/// A two-player game over a [`Board`].
///
/// The game owns the board and counts plies. Whose turn it is follows from
/// the parity of the 1-indexed move number: odd means player one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game<B: Board> {
    board: B,
    plies: usize,
}

impl<B: Board> Game<B> {
    /// Start a game on `board`, which is assumed to be empty.
    pub fn new(board: B) -> Self {
        Self { board, plies: 0 }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    /// Number of plies played so far.
    pub fn plies(&self) -> usize {
        self.plies
    }

    pub fn status(&self) -> Status {
        self.board.check_status()
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    /// The player who moves next.
    pub fn player_to_play(&self) -> PlayerId {
        Self::player_after(self.plies)
    }

    /// The player who makes the move following `plies` plies.
    fn player_after(plies: usize) -> PlayerId {
        let move_number = plies + 1;
        if move_number % 2 == 1 {
            PlayerId::One
        } else {
            PlayerId::Two
        }
    }

    /// Play exactly one ply, asking the actor whose turn it is.
    ///
    /// Returns the cell that was played.
    ///
    /// # Errors
    /// - `ActorMismatch` if the actor in the active slot is for the other player
    /// - `NoLegalMoves` if the actor has nothing to propose
    /// - `IllegalMove` if the board rejects the proposal (the game is unchanged)
    pub fn play<R: Rng + ?Sized>(
        &mut self,
        actor_one: &Actor<B::Cell>,
        actor_two: &Actor<B::Cell>,
        rng: &mut R,
    ) -> Result<B::Cell> {
        let player = self.player_to_play();
        let actor = match player {
            PlayerId::One => actor_one,
            PlayerId::Two => actor_two,
        };
        if actor.player() != player {
            return Err(GameError::ActorMismatch {
                expected: player,
                actor: actor.player(),
            });
        }

        let empty = self.board.empty_cells();
        let cell = actor.propose(&empty, rng).ok_or(GameError::NoLegalMoves)?;
        self.play_cell(cell)?;
        Ok(cell)
    }

    /// Play `cell` for whoever is to move.
    pub fn play_cell(&mut self, cell: B::Cell) -> Result<()> {
        let player = self.player_to_play();
        if !self.board.perform_move(player, cell) {
            return Err(GameError::IllegalMove {
                player,
                cell: format!("{:?}", cell),
            });
        }
        self.plies += 1;
        Ok(())
    }

    /// Undo the last ply, which must have been played on `cell`.
    ///
    /// On error the ply counter is unchanged and the board is put back as it
    /// was.
    pub fn revert_play(&mut self, cell: B::Cell) -> Result<()> {
        let last = self.plies.checked_sub(1).ok_or(GameError::NothingToRevert)?;
        let player = Self::player_after(last);

        match self.board.revert_move(player) {
            Some(reverted) if reverted == cell => {
                self.plies = last;
                Ok(())
            }
            Some(reverted) => {
                // Replay the move the board just undid.
                self.board.perform_move(player, reverted);
                Err(GameError::RevertMismatch {
                    expected: format!("{:?}", cell),
                    actual: format!("{:?}", reverted),
                })
            }
            None => Err(GameError::NothingToRevert),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // Simple test board: a strip of 3 cells, holding two adjacent cells wins.
    #[derive(Clone, Debug, PartialEq, Eq, Default)]
    struct StripBoard {
        cells: [Option<PlayerId>; 3],
        history: Vec<(PlayerId, usize)>,
    }

    impl Board for StripBoard {
        type Cell = usize;

        fn perform_move(&mut self, player: PlayerId, cell: usize) -> bool {
            match self.cells.get(cell) {
                Some(None) => {
                    self.cells[cell] = Some(player);
                    self.history.push((player, cell));
                    true
                }
                _ => false,
            }
        }

        fn revert_move(&mut self, player: PlayerId) -> Option<usize> {
            let pos = self.history.iter().rposition(|(p, _)| *p == player)?;
            let (_, cell) = self.history.remove(pos);
            self.cells[cell] = None;
            Some(cell)
        }

        fn check_status(&self) -> Status {
            for pair in self.cells.windows(2) {
                if let [Some(a), Some(b)] = pair {
                    if a == b {
                        return Status::Won(*a);
                    }
                }
            }
            if self.cells.iter().all(|c| c.is_some()) {
                Status::Draw
            } else {
                Status::Ongoing
            }
        }

        fn empty_cells(&self) -> Vec<usize> {
            (0..3).filter(|&i| self.cells[i].is_none()).collect()
        }
    }

    fn fixed(cell: usize) -> (Actor<usize>, Actor<usize>) {
        (Actor::fixed(PlayerId::One, cell), Actor::fixed(PlayerId::Two, cell))
    }

    #[test]
    fn test_player_to_play_alternates() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut game = Game::new(StripBoard::default());
        assert_eq!(game.player_to_play(), PlayerId::One);

        let (one, two) = fixed(0);
        game.play(&one, &two, &mut rng).unwrap();
        assert_eq!(game.player_to_play(), PlayerId::Two);
        assert_eq!(game.board().cells[0], Some(PlayerId::One));

        let (one, two) = fixed(2);
        game.play(&one, &two, &mut rng).unwrap();
        assert_eq!(game.player_to_play(), PlayerId::One);
        assert_eq!(game.board().cells[2], Some(PlayerId::Two));
        assert_eq!(game.plies(), 2);
    }

    #[test]
    fn test_play_then_revert_restores_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut game = Game::new(StripBoard::default());
        let before = game.clone();

        let (one, two) = fixed(1);
        let cell = game.play(&one, &two, &mut rng).unwrap();
        assert_eq!(cell, 1);
        game.revert_play(cell).unwrap();

        assert_eq!(game, before);
    }

    #[test]
    fn test_illegal_move_leaves_game_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut game = Game::new(StripBoard::default());
        let (one, two) = fixed(1);
        game.play(&one, &two, &mut rng).unwrap();
        let before = game.clone();

        let result = game.play(&one, &two, &mut rng);
        assert!(matches!(result, Err(GameError::IllegalMove { .. })));
        assert_eq!(game, before);
    }

    #[test]
    fn test_play_cell_uses_turn_order() {
        let mut game = Game::new(StripBoard::default());
        game.play_cell(1).unwrap();
        game.play_cell(0).unwrap();

        assert_eq!(game.board().cells, [Some(PlayerId::Two), Some(PlayerId::One), None]);
        assert_eq!(game.play_cell(0), Err(GameError::IllegalMove {
            player: PlayerId::One,
            cell: "0".to_string(),
        }));
        assert_eq!(game.plies(), 2);
    }

    #[test]
    fn test_actor_mismatch() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut game = Game::new(StripBoard::default());
        let wrong = Actor::random(PlayerId::Two);

        let result = game.play(&wrong, &wrong, &mut rng);
        assert_eq!(
            result,
            Err(GameError::ActorMismatch {
                expected: PlayerId::One,
                actor: PlayerId::Two
            })
        );
    }

    #[test]
    fn test_revert_without_moves() {
        let mut game = Game::new(StripBoard::default());
        assert_eq!(game.revert_play(0), Err(GameError::NothingToRevert));
        assert_eq!(game.plies(), 0);
    }

    #[test]
    fn test_revert_wrong_cell_is_reported() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut game = Game::new(StripBoard::default());
        let (one, two) = fixed(0);
        game.play(&one, &two, &mut rng).unwrap();

        let result = game.revert_play(2);
        assert!(matches!(result, Err(GameError::RevertMismatch { .. })));
    }

    #[test]
    fn test_failed_revert_leaves_game_untouched() {
        let mut game = Game::new(StripBoard::default());
        game.play_cell(0).unwrap();
        game.play_cell(2).unwrap();
        let before = game.clone();

        assert_eq!(
            game.revert_play(1),
            Err(GameError::RevertMismatch {
                expected: "1".to_string(),
                actual: "2".to_string(),
            })
        );
        assert_eq!(game, before);
        assert_eq!(game.plies(), 2);
        assert_eq!(game.player_to_play(), PlayerId::One);

        game.revert_play(2).unwrap();
        assert_eq!(game.plies(), 1);
    }

    #[test]
    fn test_random_playout_finishes_and_unwinds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut game = Game::new(StripBoard::default());
        let before = game.clone();
        let one = Actor::random(PlayerId::One);
        let two = Actor::random(PlayerId::Two);

        let mut played = Vec::new();
        while !game.is_finished() {
            played.push(game.play(&one, &two, &mut rng).unwrap());
        }
        assert!(game.status().is_terminal());

        while let Some(cell) = played.pop() {
            game.revert_play(cell).unwrap();
        }
        assert_eq!(game, before);
    }
}
