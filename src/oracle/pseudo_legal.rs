//! Pseudo-legal destination generation for the side to move.
//!
//! Pieces move and capture the way they do in chess, but king safety,
//! castling and en passant are not considered.

use common::bitboard::{Bitboard, Square};

use crate::board::{color::Color, piece::Piece, Board};

use super::LegalMoveOracle;

#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash)]
pub enum Direction {
    East,
    North,
    NorthEast,
    NorthWest,
    South,
    SouthEast,
    SouthWest,
    West,
}

impl Direction {
    /// (rank delta, file delta)
    fn delta(self) -> (i8, i8) {
        match self {
            Direction::East => (0, 1),
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (1, -1),
            Direction::South => (-1, 0),
            Direction::SouthEast => (-1, 1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
        }
    }
}

pub const ROOK_DIRS: [Direction; 4] = [
    Direction::East,
    Direction::North,
    Direction::South,
    Direction::West,
];

pub const BISHOP_DIRS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Answers destination queries against a borrowed board.
pub struct PseudoLegalOracle<'a> {
    board: &'a Board,
}

impl<'a> PseudoLegalOracle<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }
}

impl LegalMoveOracle for PseudoLegalOracle<'_> {
    fn legal_destinations(&self, square: Square) -> Bitboard {
        generate_destinations(self.board, square)
    }
}

/// Destinations of the piece on `square`, or nothing if the square is empty or
/// holds a piece of the side not to move.
pub fn generate_destinations(board: &Board, square: Square) -> Bitboard {
    let (piece, color) = match board.get(square) {
        Some(occupant) => occupant,
        None => return Bitboard::EMPTY,
    };
    if color != board.turn() {
        return Bitboard::EMPTY;
    }

    let targets = match piece {
        Piece::Pawn => generate_pawn_targets(board, square, color),
        Piece::Knight => generate_step_targets(square, &KNIGHT_STEPS),
        Piece::King => generate_step_targets(square, &KING_STEPS),
        Piece::Rook => generate_ray_targets(board, square, &ROOK_DIRS),
        Piece::Bishop => generate_ray_targets(board, square, &BISHOP_DIRS),
        Piece::Queen => {
            generate_ray_targets(board, square, &ROOK_DIRS)
                | generate_ray_targets(board, square, &BISHOP_DIRS)
        }
    };

    targets & !board.pieces(color).occupied()
}

/// Whether `color` has at least one destination anywhere on the board.
pub fn has_any_destination(board: &Board, color: Color) -> bool {
    if board.turn() != color {
        return false;
    }
    board
        .pieces(color)
        .iter()
        .any(|(square, _)| !generate_destinations(board, square).is_empty())
}

fn generate_pawn_targets(board: &Board, square: Square, color: Color) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    let forward = color.pawn_direction();

    if let Some(single_move) = square.offset(forward, 0) {
        if !board.is_occupied(single_move) {
            targets.insert(single_move);

            if square.rank() == color.pawn_start_rank() {
                if let Some(double_move) = single_move.offset(forward, 0) {
                    if !board.is_occupied(double_move) {
                        targets.insert(double_move);
                    }
                }
            }
        }
    }

    let enemies = board.pieces(color.opposite()).occupied();
    for file_delta in [-1, 1].iter() {
        if let Some(attack) = square.offset(forward, *file_delta) {
            if enemies.contains(attack) {
                targets.insert(attack);
            }
        }
    }

    targets
}

fn generate_step_targets(square: Square, steps: &[(i8, i8)]) -> Bitboard {
    steps
        .iter()
        .filter_map(|&(d_rank, d_file)| square.offset(d_rank, d_file))
        .collect()
}

// rays stop at the first occupied square, which is included so that the
// caller can decide whether it is a capture or a friendly blocker
fn generate_ray_targets(board: &Board, square: Square, dirs: &[Direction]) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    for dir in dirs {
        let (d_rank, d_file) = dir.delta();
        let mut current = square;
        while let Some(next) = current.offset(d_rank, d_file) {
            targets.insert(next);
            if board.is_occupied(next) {
                break;
            }
            current = next;
        }
    }
    targets
}
