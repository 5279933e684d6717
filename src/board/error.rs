use common::bitboard::Square;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("Cannot put a piece on {square}, the square is already occupied")]
    SquareOccupiedBoardPutError { square: Square },
    #[error("Cannot apply move, the `from` square {square} is empty")]
    FromSquareIsEmptyMoveApplicationError { square: Square },
}
