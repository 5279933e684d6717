use super::Board;
use common::bitboard::Square;
use std::fmt;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let row: String = (0..8u8)
                .map(|file| match self.get(Square::from_rank_file(rank, file)) {
                    Some((piece, color)) => piece.to_fen(color),
                    None => '.',
                })
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! chess_position {
    ($($piece:tt)*) => {{
        let mut board = $crate::board::Board::new();
        // Convert all input tokens to a string and filter out whitespace characters.
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        assert_eq!(
            pieces.len(),
            64,
            "Invalid number of squares. Expected 64, got {}",
            pieces.len()
        );
        for (i, &c) in pieces.iter().enumerate() {
            if c != '.' {
                let (piece, color) = $crate::board::piece::Piece::from_fen(c)
                    .expect("Invalid character in chess position");
                // The macro input is from white's perspective, so the first
                // character is a8 rather than a1.
                let rank = 7 - (i / 8) as u8;
                let file = (i % 8) as u8;
                board
                    .put(common::bitboard::Square::from_rank_file(rank, file), piece, color)
                    .expect("chess position places two pieces on one square");
            }
        }
        board
    }};
}
