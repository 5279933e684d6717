use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::bitboard::bitboard::Bitboard;

static ALGEBRAIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new("^([a-hA-H])([1-8])$").unwrap());

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("Invalid algebraic coordinate: {input:?}")]
    InvalidCoordinate { input: String },
}

/// One of the 64 board cells, indexed `rank * 8 + file` from a1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Square(u8);

impl Square {
    pub const fn new(index: u8) -> Self {
        assert!(index < 64);
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    pub const fn from_rank_file(rank: u8, file: u8) -> Self {
        Self::new(rank * 8 + file)
    }

    /// Steps `d_rank` ranks and `d_file` files away, or `None` when that walks off the board.
    pub fn offset(self, d_rank: i8, d_file: i8) -> Option<Self> {
        let rank = self.rank() as i8 + d_rank;
        let file = self.file() as i8 + d_file;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Self::from_rank_file(rank as u8, file as u8))
        } else {
            None
        }
    }

    pub const fn to_bitboard(self) -> Bitboard {
        Bitboard(1 << self.0)
    }

    pub fn overlaps(self, bitboard: Bitboard) -> bool {
        bitboard.overlaps(self.to_bitboard())
    }

    pub fn is_light(self) -> bool {
        (self.rank() + self.file()) % 2 == 1
    }

    pub fn from_algebraic(algebraic_coord: &str) -> Result<Self, SquareParseError> {
        let invalid = || SquareParseError::InvalidCoordinate {
            input: algebraic_coord.to_string(),
        };
        let caps = ALGEBRAIC_RE.captures(algebraic_coord).ok_or_else(invalid)?;
        let file = caps[1].to_ascii_lowercase().as_bytes()[0] - b'a';
        let rank = caps[2].as_bytes()[0] - b'1';
        Ok(Self::from_rank_file(rank, file))
    }

    pub fn to_algebraic(self) -> &'static str {
        tables::ALGEBRAIC[self.0 as usize]
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

pub const A1: Square = Square(0);
pub const B1: Square = Square(1);
pub const C1: Square = Square(2);
pub const D1: Square = Square(3);
pub const E1: Square = Square(4);
pub const F1: Square = Square(5);
pub const G1: Square = Square(6);
pub const H1: Square = Square(7);
pub const A2: Square = Square(8);
pub const B2: Square = Square(9);
pub const C2: Square = Square(10);
pub const D2: Square = Square(11);
pub const E2: Square = Square(12);
pub const F2: Square = Square(13);
pub const G2: Square = Square(14);
pub const H2: Square = Square(15);
pub const A3: Square = Square(16);
pub const B3: Square = Square(17);
pub const C3: Square = Square(18);
pub const D3: Square = Square(19);
pub const E3: Square = Square(20);
pub const F3: Square = Square(21);
pub const G3: Square = Square(22);
pub const H3: Square = Square(23);
pub const A4: Square = Square(24);
pub const B4: Square = Square(25);
pub const C4: Square = Square(26);
pub const D4: Square = Square(27);
pub const E4: Square = Square(28);
pub const F4: Square = Square(29);
pub const G4: Square = Square(30);
pub const H4: Square = Square(31);
pub const A5: Square = Square(32);
pub const B5: Square = Square(33);
pub const C5: Square = Square(34);
pub const D5: Square = Square(35);
pub const E5: Square = Square(36);
pub const F5: Square = Square(37);
pub const G5: Square = Square(38);
pub const H5: Square = Square(39);
pub const A6: Square = Square(40);
pub const B6: Square = Square(41);
pub const C6: Square = Square(42);
pub const D6: Square = Square(43);
pub const E6: Square = Square(44);
pub const F6: Square = Square(45);
pub const G6: Square = Square(46);
pub const H6: Square = Square(47);
pub const A7: Square = Square(48);
pub const B7: Square = Square(49);
pub const C7: Square = Square(50);
pub const D7: Square = Square(51);
pub const E7: Square = Square(52);
pub const F7: Square = Square(53);
pub const G7: Square = Square(54);
pub const H7: Square = Square(55);
pub const A8: Square = Square(56);
pub const B8: Square = Square(57);
pub const C8: Square = Square(58);
pub const D8: Square = Square(59);
pub const E8: Square = Square(60);
pub const F8: Square = Square(61);
pub const G8: Square = Square(62);
pub const H8: Square = Square(63);

#[rustfmt::skip]
mod tables {
    pub const ALGEBRAIC: [&str; 64] = [
        "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
        "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
        "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
        "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
        "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
        "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
        "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
        "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rank_file() {
        assert_eq!(A1, Square::from_rank_file(0, 0));
        assert_eq!(B2, Square::from_rank_file(1, 1));
        assert_eq!(E4, Square::from_rank_file(3, 4));
    }

    #[test]
    fn test_from_algebraic() {
        assert_eq!(Ok(A1), Square::from_algebraic("A1"));
        assert_eq!(Ok(A1), Square::from_algebraic("a1"));
        assert_eq!(Ok(E5), Square::from_algebraic("e5"));
        assert_eq!(Ok(H8), "h8".parse());
    }

    #[test]
    fn test_from_algebraic_rejects_garbage() {
        assert!(Square::from_algebraic("i1").is_err());
        assert!(Square::from_algebraic("a9").is_err());
        assert!(Square::from_algebraic("e44").is_err());
        assert!(Square::from_algebraic("").is_err());
    }

    #[test]
    fn test_to_algebraic() {
        assert_eq!("a1", A1.to_algebraic());
        assert_eq!("a8", A8.to_algebraic());
        assert_eq!("b8", B8.to_algebraic());
        assert_eq!("h8", H8.to_string());
    }

    #[test]
    fn test_offset() {
        assert_eq!(Some(F3), G1.offset(2, -1));
        assert_eq!(None, H8.offset(1, 0));
        assert_eq!(None, A1.offset(0, -1));
    }

    #[test]
    fn test_square_colors() {
        assert!(!A1.is_light());
        assert!(H1.is_light());
        assert!(!H8.is_light());
    }
}
