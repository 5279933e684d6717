//! Decides whether a square may receive the piece currently being carried,
//! either by an in-progress drag or by an earlier click selection.

use common::bitboard::{Bitboard, Square};

use crate::board::{color::Color, piece::Piece};
use crate::oracle::LegalMoveOracle;

use super::state::Selection;

/// A piece being dragged. Lives only between drag start and drop/cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragCarry {
    pub square: Square,
    pub piece: Piece,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Carrier {
    Drag(DragCarry),
    Selection(Selection),
}

impl Carrier {
    pub fn square(&self) -> Square {
        match self {
            Carrier::Drag(carry) => carry.square,
            Carrier::Selection(selection) => selection.square,
        }
    }

    pub fn piece(&self) -> (Piece, Color) {
        match self {
            Carrier::Drag(carry) => (carry.piece, carry.color),
            Carrier::Selection(selection) => (selection.piece, selection.color),
        }
    }
}

/// The carrier whose origin is authoritative. A drag outranks a leftover selection.
pub fn active_carrier(drag: Option<&DragCarry>, selection: Option<&Selection>) -> Option<Carrier> {
    match (drag, selection) {
        (Some(carry), _) => Some(Carrier::Drag(*carry)),
        (None, Some(selection)) => Some(Carrier::Selection(*selection)),
        (None, None) => None,
    }
}

/// Every square the carrier may land on. Never includes the carrier's own square.
pub fn drop_targets<O>(carrier: Option<Carrier>, game_over: bool, oracle: &O) -> Bitboard
where
    O: LegalMoveOracle + ?Sized,
{
    if game_over {
        return Bitboard::EMPTY;
    }
    let carrier = match carrier {
        Some(carrier) => carrier,
        None => return Bitboard::EMPTY,
    };
    let mut targets = oracle.legal_destinations(carrier.square());
    targets.remove(carrier.square());
    targets
}

pub fn can_accept_drop<O>(
    square: Square,
    carrier: Option<Carrier>,
    game_over: bool,
    oracle: &O,
) -> bool
where
    O: LegalMoveOracle + ?Sized,
{
    drop_targets(carrier, game_over, oracle).contains(square)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::MoveTable;
    use common::bitboard::square::*;

    fn knight_drag() -> DragCarry {
        DragCarry {
            square: G1,
            piece: Piece::Knight,
            color: Color::White,
        }
    }

    fn pawn_selection() -> Selection {
        Selection {
            square: E2,
            piece: Piece::Pawn,
            color: Color::White,
        }
    }

    fn oracle() -> MoveTable {
        MoveTable::new()
            .with(G1, &[F3, H3])
            .with(E2, &[E3, E4])
    }

    #[test]
    fn test_no_carrier_accepts_nothing() {
        assert!(!can_accept_drop(E4, None, false, &oracle()));
    }

    #[test]
    fn test_selection_carrier() {
        let carrier = active_carrier(None, Some(&pawn_selection()));
        assert!(can_accept_drop(E4, carrier, false, &oracle()));
        assert!(!can_accept_drop(D4, carrier, false, &oracle()));
    }

    #[test]
    fn test_drag_outranks_selection() {
        let drag = knight_drag();
        let selection = pawn_selection();
        let carrier = active_carrier(Some(&drag), Some(&selection));
        assert_eq!(Some(Carrier::Drag(drag)), carrier);
        assert!(can_accept_drop(F3, carrier, false, &oracle()));
        assert!(!can_accept_drop(E4, carrier, false, &oracle()));
    }

    #[test]
    fn test_game_over_accepts_nothing() {
        let carrier = active_carrier(None, Some(&pawn_selection()));
        assert!(!can_accept_drop(E4, carrier, true, &oracle()));
    }

    #[test]
    fn test_own_square_is_never_a_target() {
        // an oracle that wrongly lists the origin as a destination
        let oracle = MoveTable::new().with(E2, &[E2, E3]);
        let carrier = active_carrier(None, Some(&pawn_selection()));
        assert!(!can_accept_drop(E2, carrier, false, &oracle));
        assert!(can_accept_drop(E3, carrier, false, &oracle));
    }
}
