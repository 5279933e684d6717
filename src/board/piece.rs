use super::color::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Piece {
    Pawn,
    Rook,
    Knight,
    Bishop,
    King,
    Queen,
}

pub const ALL_PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::King,
    Piece::Queen,
];

/// Pieces a pawn may become, in the order the promotion prompt offers them.
pub const PROMOTION_CHOICES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

impl Piece {
    pub fn from_usize(i: usize) -> Piece {
        ALL_PIECES[i]
    }

    pub fn to_fen(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Rook => 'r',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::King => 'k',
            Piece::Queen => 'q',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_fen(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'r' => Piece::Rook,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'k' => Piece::King,
            'q' => Piece::Queen,
            _ => return None,
        };
        Some((piece, color))
    }

    pub fn to_unicode_piece_char(self, color: Color) -> char {
        match (self, color) {
            (Piece::Pawn, Color::White) => '♙',
            (Piece::Rook, Color::White) => '♖',
            (Piece::Knight, Color::White) => '♘',
            (Piece::Bishop, Color::White) => '♗',
            (Piece::King, Color::White) => '♔',
            (Piece::Queen, Color::White) => '♕',
            (Piece::Pawn, Color::Black) => '♟',
            (Piece::Rook, Color::Black) => '♜',
            (Piece::Knight, Color::Black) => '♞',
            (Piece::Bishop, Color::Black) => '♝',
            (Piece::King, Color::Black) => '♚',
            (Piece::Queen, Color::Black) => '♛',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_chars() {
        assert_eq!('P', Piece::Pawn.to_fen(Color::White));
        assert_eq!('n', Piece::Knight.to_fen(Color::Black));
        assert_eq!(Some((Piece::Queen, Color::White)), Piece::from_fen('Q'));
        assert_eq!(Some((Piece::King, Color::Black)), Piece::from_fen('k'));
        assert_eq!(None, Piece::from_fen('x'));
    }

    #[test]
    fn test_from_usize_matches_piece_set_order() {
        for (i, piece) in ALL_PIECES.iter().enumerate() {
            assert_eq!(*piece, Piece::from_usize(i));
            assert_eq!(i, *piece as usize);
        }
    }
}
