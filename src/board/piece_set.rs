use common::bitboard::{Bitboard, Square};

use super::error::BoardError;
use super::piece::Piece;

/// The pieces of one color, held as one bitboard per piece type.
#[derive(Clone, PartialEq, Debug)]
pub struct PieceSet {
    /// [pawns, rooks, knights, bishops, kings, queens]
    bitboards: [Bitboard; 6],

    /// Incrementally updated as pieces are added or removed.
    occupied: Bitboard,
}

impl Default for PieceSet {
    fn default() -> Self {
        PieceSet {
            bitboards: [Bitboard::EMPTY; 6],
            occupied: Bitboard::EMPTY,
        }
    }
}

impl PieceSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        for (i, &bitboard) in self.bitboards.iter().enumerate() {
            if square.overlaps(bitboard) {
                return Some(Piece::from_usize(i));
            }
        }
        None
    }

    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        square.overlaps(self.occupied)
    }

    pub fn put(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        if square.overlaps(self.occupied) {
            return Err(BoardError::SquareOccupiedBoardPutError { square });
        }

        let bb = square.to_bitboard();
        self.bitboards[piece as usize] |= bb;
        self.occupied |= bb;
        Ok(())
    }

    /// Every occupied square with the piece standing on it.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied
            .iter()
            .filter_map(move |square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let removed_piece = self.get(square)?;
        let bb = square.to_bitboard();
        self.bitboards[removed_piece as usize] ^= bb;
        self.occupied ^= bb;
        Some(removed_piece)
    }
}
