use std::fmt;

use common::bitboard::Square;
use thiserror::Error;

use crate::board::{color::Color, error::BoardError, piece::Piece};

/// A request to move the piece on `from` to `to`, as produced by the
/// interaction core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub color: Color,
    pub promotion: Option<Piece>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square, piece: Piece, color: Color) -> Self {
        Self {
            from,
            to,
            piece,
            color,
            promotion: None,
        }
    }

    pub fn with_promotion(self, promotion: Piece) -> Self {
        Self {
            promotion: Some(promotion),
            ..self
        }
    }

    /// Whether this moves a pawn onto its promotion rank.
    pub fn reaches_promotion_rank(&self) -> bool {
        self.piece == Piece::Pawn && self.to.rank() == self.color.promotion_rank()
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_fen(Color::Black))?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("The game is over, no more moves can be made")]
    GameOver,
    #[error("Move {request} is stale, {} no longer holds the moving piece", .request.from)]
    StaleRequest { request: MoveRequest },
    #[error("Move {request} is not legal in the current position")]
    IllegalMove { request: MoveRequest },
    #[error("Move {request} has a missing or invalid promotion piece")]
    InvalidPromotion { request: MoveRequest },
    #[error("Board error: {error}")]
    BoardError { error: BoardError },
}

/// Carries out move requests. Implementations may kick off further work
/// (an engine reply, say); the caller does not wait on it.
pub trait MoveExecutor {
    /// Whether the request must be held until the user picks a promotion piece.
    fn requires_promotion(&self, request: &MoveRequest) -> bool {
        request.reaches_promotion_rank()
    }

    fn commit_move(&mut self, request: MoveRequest) -> Result<(), ExecutorError>;
}

impl<T: MoveExecutor + ?Sized> MoveExecutor for &mut T {
    fn requires_promotion(&self, request: &MoveRequest) -> bool {
        (**self).requires_promotion(request)
    }

    fn commit_move(&mut self, request: MoveRequest) -> Result<(), ExecutorError> {
        (**self).commit_move(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    #[test]
    fn test_display() {
        let request = MoveRequest::new(E2, E4, Piece::Pawn, Color::White);
        assert_eq!("e2e4", request.to_string());
        let promotion = MoveRequest::new(A7, A8, Piece::Pawn, Color::White)
            .with_promotion(Piece::Knight);
        assert_eq!("a7a8n", promotion.to_string());
    }

    #[test]
    fn test_reaches_promotion_rank() {
        assert!(MoveRequest::new(A7, A8, Piece::Pawn, Color::White).reaches_promotion_rank());
        assert!(MoveRequest::new(H2, H1, Piece::Pawn, Color::Black).reaches_promotion_rank());
        assert!(!MoveRequest::new(A7, A8, Piece::Rook, Color::White).reaches_promotion_rank());
        assert!(!MoveRequest::new(H2, H1, Piece::Pawn, Color::White).reaches_promotion_rank());
    }
}
