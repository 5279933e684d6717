//! The legal-move oracle: "from this square, where can the piece go right now?"
//!
//! The interaction core never caches an answer; it asks again at every
//! decision point because the answer changes after every committed move.

pub mod pseudo_legal;

use common::bitboard::{Bitboard, Square};
use rustc_hash::FxHashMap;

pub use pseudo_legal::PseudoLegalOracle;

pub trait LegalMoveOracle {
    /// Destinations reachable from `square`. Must be side-effect free, and
    /// must return an empty set for a square that holds no piece.
    fn legal_destinations(&self, square: Square) -> Bitboard;
}

impl<T: LegalMoveOracle + ?Sized> LegalMoveOracle for &T {
    fn legal_destinations(&self, square: Square) -> Bitboard {
        (**self).legal_destinations(square)
    }
}

impl<T: LegalMoveOracle + ?Sized> LegalMoveOracle for &mut T {
    fn legal_destinations(&self, square: Square) -> Bitboard {
        (**self).legal_destinations(square)
    }
}

/// An oracle answering from an explicit table, for scripted hosts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoveTable {
    destinations: FxHashMap<Square, Bitboard>,
}

impl MoveTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with(mut self, from: Square, to: &[Square]) -> Self {
        self.set(from, to.iter().copied().collect());
        self
    }

    pub fn set(&mut self, from: Square, to: Bitboard) {
        if to.is_empty() {
            self.destinations.remove(&from);
        } else {
            self.destinations.insert(from, to);
        }
    }
}

impl LegalMoveOracle for MoveTable {
    fn legal_destinations(&self, square: Square) -> Bitboard {
        self.destinations
            .get(&square)
            .copied()
            .unwrap_or(Bitboard::EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    #[test]
    fn test_move_table_lookup() {
        let table = MoveTable::new().with(E2, &[E3, E4]);
        let destinations = table.legal_destinations(E2);
        assert!(destinations.contains(E3));
        assert!(destinations.contains(E4));
        assert_eq!(2, destinations.count_ones());
    }

    #[test]
    fn test_move_table_unknown_square_is_empty() {
        let table = MoveTable::new().with(E2, &[E3, E4]);
        assert!(table.legal_destinations(D4).is_empty());
    }

    #[test]
    fn test_move_table_set_empty_removes() {
        let mut table = MoveTable::new().with(G1, &[F3, H3]);
        table.set(G1, Bitboard::EMPTY);
        assert!(table.legal_destinations(G1).is_empty());
    }
}
