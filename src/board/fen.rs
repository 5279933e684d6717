//! FEN parsing for the placement and active-color fields.
//!
//! Castling, en passant and clock fields are accepted but ignored, since the
//! board does not track them.

use std::str::FromStr;

use common::bitboard::Square;
use thiserror::Error;

use super::{color::Color, error::BoardError, piece::Piece, Board};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FenParseError {
    #[error("Wrong number of fields: 1 to 6 expected, {field_count:?} given")]
    WrongNumberOfFields { field_count: usize },
    #[error("Invalid piece character: {invalid_character:?}")]
    InvalidPieceCharacter { invalid_character: char },
    #[error("Wrong number of ranks: 8 expected, {rank_count:?} given")]
    InvalidRankCount { rank_count: usize },
    #[error("Rank too long: {invalid_rank:?}")]
    InvalidRankLength { invalid_rank: String },
    #[error("Error placing piece: {board_error:?}")]
    ErrorPlacingPiece { board_error: BoardError },
    #[error("Rank incomplete: {incomplete_rank:?}")]
    IncompleteRank { incomplete_rank: String },
    #[error("Invalid color: {invalid_color:?}")]
    InvalidColor { invalid_color: String },
}

type FenResult<T> = Result<T, FenParseError>;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parses a FEN string into a Board. Only the piece placement is required;
/// the active color defaults to white.
pub fn parse_fen(fen: &str) -> FenResult<Board> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.is_empty() || fields.len() > 6 {
        return Err(FenParseError::WrongNumberOfFields {
            field_count: fields.len(),
        });
    }

    let mut board = Board::new();
    parse_piece_placement(&mut board, fields[0])?;
    if let Some(active_color) = fields.get(1) {
        parse_active_color(&mut board, active_color)?;
    }
    Ok(board)
}

/// Serializes the board back to FEN. Fields the board does not track are
/// written as their empty values.
pub fn to_fen(board: &Board) -> String {
    let mut ranks = Vec::with_capacity(8);
    for rank in (0..8u8).rev() {
        let mut row = String::new();
        let mut empty = 0;
        for file in 0..8u8 {
            match board.get(Square::from_rank_file(rank, file)) {
                Some((piece, color)) => {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen(color));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            row.push_str(&empty.to_string());
        }
        ranks.push(row);
    }

    let turn = match board.turn() {
        Color::White => 'w',
        Color::Black => 'b',
    };
    format!("{} {} - - 0 1", ranks.join("/"), turn)
}

fn parse_piece_placement(board: &mut Board, position: &str) -> FenResult<()> {
    let ranks: Vec<&str> = position.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::InvalidRankCount {
            rank_count: ranks.len(),
        });
    }

    for (rank_idx, rank) in ranks.iter().enumerate() {
        parse_rank(board, rank, 7 - rank_idx as u8)?;
    }

    Ok(())
}

fn parse_rank(board: &mut Board, rank: &str, rank_number: u8) -> FenResult<()> {
    let mut file = 0u8;

    for c in rank.chars() {
        if file >= 8 {
            return Err(FenParseError::InvalidRankLength {
                invalid_rank: rank.to_string(),
            });
        }

        if let Some(empty_squares) = c.to_digit(10) {
            file += empty_squares as u8;
        } else {
            let invalid = FenParseError::InvalidPieceCharacter {
                invalid_character: c,
            };
            let (piece, color) = Piece::from_fen(c).ok_or(invalid)?;
            board
                .put(Square::from_rank_file(rank_number, file), piece, color)
                .map_err(|e| FenParseError::ErrorPlacingPiece { board_error: e })?;
            file += 1;
        }
    }

    if file != 8 {
        return Err(FenParseError::IncompleteRank {
            incomplete_rank: rank.to_string(),
        });
    }

    Ok(())
}

fn parse_active_color(board: &mut Board, active_color: &str) -> FenResult<()> {
    match active_color {
        "w" => {
            board.set_turn(Color::White);
            Ok(())
        }
        "b" => {
            board.set_turn(Color::Black);
            Ok(())
        }
        _ => Err(FenParseError::InvalidColor {
            invalid_color: active_color.to_string(),
        }),
    }
}

// used for parsing cli args
impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        parse_fen(fen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    #[test]
    fn test_parse_starting_position() {
        let board = parse_fen(STARTING_POSITION_FEN).unwrap();
        assert_eq!(Board::starting_position(), board);
    }

    #[test]
    fn test_parse_placement_only_defaults_to_white() {
        let board = parse_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(Color::White, board.turn());
        assert_eq!(Some((Piece::King, Color::Black)), board.get(E8));
    }

    #[test]
    fn test_parse_black_to_move() {
        let board = parse_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
        assert_eq!(Color::Black, board.turn());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Err(FenParseError::InvalidRankCount { rank_count: 7 }),
            parse_fen("8/8/8/8/8/8/8 w")
        );
        assert_eq!(
            Err(FenParseError::InvalidPieceCharacter {
                invalid_character: 'x'
            }),
            parse_fen("x7/8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(FenParseError::IncompleteRank {
                incomplete_rank: "7".to_string()
            }),
            parse_fen("7/8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(FenParseError::InvalidColor {
                invalid_color: "x".to_string()
            }),
            parse_fen("8/8/8/8/8/8/8/8 x")
        );
        assert_eq!(
            Err(FenParseError::WrongNumberOfFields { field_count: 0 }),
            parse_fen("  ")
        );
    }

    #[test]
    fn test_to_fen() {
        let board = parse_fen("4k3/8/8/8/4P3/8/8/4K3 b").unwrap();
        assert_eq!("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1", to_fen(&board));
    }
}
