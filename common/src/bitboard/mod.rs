//! Square identities and square sets shared by the board and the interaction core.

pub mod bitboard;
pub mod square;

pub use bitboard::Bitboard;
pub use square::{Square, SquareParseError};
