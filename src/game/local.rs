//! A self-contained game host: applies moves to a local board and answers the
//! interaction core's queries against it.

use std::fmt;

use common::bitboard::{Bitboard, Square};
use log::{debug, info};

use crate::board::{color::Color, piece::Piece, piece::PROMOTION_CHOICES, Board, PieceLookup};
use crate::oracle::pseudo_legal::{generate_destinations, has_any_destination};
use crate::oracle::LegalMoveOracle;

use super::executor::{ExecutorError, MoveExecutor, MoveRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnding {
    KingCaptured { winner: Color },
    NoDestinations { side: Color },
}

impl fmt::Display for GameEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEnding::KingCaptured { winner } => write!(f, "King captured, {} wins", winner),
            GameEnding::NoDestinations { side } => write!(f, "{} has no moves", side),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub request: MoveRequest,
    pub captured: Option<(Piece, Color)>,
}

pub struct LocalGame {
    starting_position: Board,
    board: Board,
    history: Vec<MoveRecord>,
    ending: Option<GameEnding>,
}

impl LocalGame {
    pub fn new(starting_position: Board) -> Self {
        let ending = evaluate_ending(&starting_position, None);
        Self {
            board: starting_position.clone(),
            starting_position,
            history: Vec::new(),
            ending,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn ending(&self) -> Option<GameEnding> {
        self.ending
    }

    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    /// Returns to the position the game started from.
    pub fn restart(&mut self) {
        info!("restarting game");
        *self = Self::new(self.starting_position.clone());
    }
}

fn evaluate_ending(board: &Board, captured: Option<(Piece, Color)>) -> Option<GameEnding> {
    if let Some((Piece::King, color)) = captured {
        return Some(GameEnding::KingCaptured {
            winner: color.opposite(),
        });
    }
    let turn = board.turn();
    if !has_any_destination(board, turn) {
        return Some(GameEnding::NoDestinations { side: turn });
    }
    None
}

impl LegalMoveOracle for LocalGame {
    fn legal_destinations(&self, square: Square) -> Bitboard {
        if self.is_over() {
            return Bitboard::EMPTY;
        }
        generate_destinations(&self.board, square)
    }
}

impl PieceLookup for LocalGame {
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        self.board.get(square)
    }
}

impl MoveExecutor for LocalGame {
    fn commit_move(&mut self, request: MoveRequest) -> Result<(), ExecutorError> {
        if self.is_over() {
            return Err(ExecutorError::GameOver);
        }
        if self.board.get(request.from) != Some((request.piece, request.color)) {
            return Err(ExecutorError::StaleRequest { request });
        }
        if !self.legal_destinations(request.from).contains(request.to) {
            return Err(ExecutorError::IllegalMove { request });
        }
        let promotion_valid = match request.promotion {
            Some(piece) => self.requires_promotion(&request) && PROMOTION_CHOICES.contains(&piece),
            None => !self.requires_promotion(&request),
        };
        if !promotion_valid {
            return Err(ExecutorError::InvalidPromotion { request });
        }

        let captured = self
            .board
            .relocate(request.from, request.to, request.promotion)
            .map_err(|error| ExecutorError::BoardError { error })?;
        self.history.push(MoveRecord { request, captured });
        self.board.toggle_turn();
        self.ending = evaluate_ending(&self.board, captured);

        info!("{} played {}", request.color, request);
        if let Some(ending) = self.ending {
            info!("game over: {}", ending);
        } else {
            debug!("{} to move", self.board.turn());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_position;
    use common::bitboard::square::*;

    #[test]
    fn test_commit_applies_move_and_toggles_turn() {
        let mut game = LocalGame::new(Board::starting_position());
        let request = MoveRequest::new(E2, E4, Piece::Pawn, Color::White);
        game.commit_move(request).unwrap();
        assert_eq!(Some((Piece::Pawn, Color::White)), game.piece_at(E4));
        assert_eq!(None, game.piece_at(E2));
        assert_eq!(Color::Black, game.board().turn());
        let record = MoveRecord {
            request,
            captured: None,
        };
        assert_eq!(Some(&record), game.last_move());
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let mut game = LocalGame::new(Board::starting_position());
        let request = MoveRequest::new(E2, E5, Piece::Pawn, Color::White);
        assert_eq!(
            Err(ExecutorError::IllegalMove { request }),
            game.commit_move(request)
        );
        assert_eq!(Board::starting_position(), *game.board());
    }

    #[test]
    fn test_stale_request_is_rejected() {
        let mut game = LocalGame::new(Board::starting_position());
        let request = MoveRequest::new(E4, E5, Piece::Pawn, Color::White);
        assert_eq!(
            Err(ExecutorError::StaleRequest { request }),
            game.commit_move(request)
        );
    }

    #[test]
    fn test_promotion_requires_a_choice() {
        let board = chess_position! {
            ....k...
            P.......
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        let mut game = LocalGame::new(board);
        let request = MoveRequest::new(A7, A8, Piece::Pawn, Color::White);
        assert!(game.requires_promotion(&request));
        assert_eq!(
            Err(ExecutorError::InvalidPromotion { request }),
            game.commit_move(request)
        );
        assert_eq!(
            Err(ExecutorError::InvalidPromotion {
                request: request.with_promotion(Piece::King)
            }),
            game.commit_move(request.with_promotion(Piece::King))
        );

        game.commit_move(request.with_promotion(Piece::Queen)).unwrap();
        assert_eq!(Some((Piece::Queen, Color::White)), game.piece_at(A8));
    }

    #[test]
    fn test_capturing_the_king_ends_the_game() {
        let board = chess_position! {
            ....k...
            ....R...
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        let mut game = LocalGame::new(board);
        let capture = MoveRequest::new(E7, E8, Piece::Rook, Color::White);
        game.commit_move(capture).unwrap();
        assert_eq!(
            Some(GameEnding::KingCaptured {
                winner: Color::White
            }),
            game.ending()
        );
        assert!(game.legal_destinations(E1).is_empty());
        assert_eq!(
            Err(ExecutorError::GameOver),
            game.commit_move(MoveRequest::new(E1, E2, Piece::King, Color::White))
        );
    }

    #[test]
    fn test_restart_returns_to_starting_position() {
        let mut game = LocalGame::new(Board::starting_position());
        let request = MoveRequest::new(G1, F3, Piece::Knight, Color::White);
        game.commit_move(request).unwrap();
        game.restart();
        assert_eq!(Board::starting_position(), *game.board());
        assert!(game.history().is_empty());
    }
}
