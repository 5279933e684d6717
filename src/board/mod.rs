//! A placement-only chess board: which piece stands where, and whose turn it is.
//!
//! Castling rights, en passant targets and move clocks are not tracked; the
//! board exists to host the interaction core, not to implement the rules.

pub mod color;
pub mod error;
pub mod fen;
pub mod piece;

mod display;
mod piece_set;

use common::bitboard::{Bitboard, Square};

use color::Color;
use error::BoardError;
use piece::Piece;
use piece_set::PieceSet;

use crate::chess_position;

/// Read access to what stands on a square, for collaborators that render or
/// validate against the current position.
pub trait PieceLookup {
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    white: PieceSet,
    black: PieceSet,
    turn: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            white: PieceSet::new(),
            black: PieceSet::new(),
            turn: Color::White,
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn starting_position() -> Self {
        chess_position! {
            rnbqkbnr
            pppppppp
            ........
            ........
            ........
            ........
            PPPPPPPP
            RNBQKBNR
        }
    }

    pub fn pieces(&self, color: Color) -> &PieceSet {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn pieces_mut(&mut self, color: Color) -> &mut PieceSet {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub fn occupied(&self) -> Bitboard {
        self.white.occupied() | self.black.occupied()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        square.overlaps(self.occupied())
    }

    pub fn get(&self, square: Square) -> Option<(Piece, Color)> {
        if let Some(piece) = self.white.get(square) {
            return Some((piece, Color::White));
        }
        self.black.get(square).map(|piece| (piece, Color::Black))
    }

    pub fn put(&mut self, square: Square, piece: Piece, color: Color) -> Result<(), BoardError> {
        if self.is_occupied(square) {
            return Err(BoardError::SquareOccupiedBoardPutError { square });
        }
        self.pieces_mut(color).put(square, piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<(Piece, Color)> {
        let (piece, color) = self.get(square)?;
        self.pieces_mut(color).remove(square)?;
        Some((piece, color))
    }

    /// Moves whatever stands on `from` to `to`, capturing any occupant of `to`.
    /// A `promotion` replaces the moving piece on arrival.
    pub fn relocate(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Option<(Piece, Color)>, BoardError> {
        let (piece, color) = self
            .remove(from)
            .ok_or(BoardError::FromSquareIsEmptyMoveApplicationError { square: from })?;
        let captured = self.remove(to);
        self.put(to, promotion.unwrap_or(piece), color)?;
        Ok(captured)
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn toggle_turn(&mut self) -> Color {
        self.turn = self.turn.opposite();
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) -> Color {
        self.turn = turn;
        turn
    }
}

impl PieceLookup for Board {
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        self.get(square)
    }
}
