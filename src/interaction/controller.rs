//! Per-square transitions. Each handler looks at one input event on one
//! square and returns the effects it implies; none of them mutate anything.

use common::bitboard::Square;
use smallvec::{smallvec, SmallVec};

use crate::board::{color::Color, piece::Piece};
use crate::game::executor::MoveRequest;
use crate::oracle::LegalMoveOracle;

use super::drop_target::{active_carrier, can_accept_drop, Carrier, DragCarry};
use super::state::{Intent, InteractionState, Selection};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Auxiliary,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Dispatch(Intent),
    Commit(MoveRequest),
    /// The drag gesture is over, whatever its outcome.
    EndDrag,
    /// Suppress the platform's default action (the context menu).
    PreventDefault,
}

pub type Transition = SmallVec<[Effect; 4]>;

fn commit(from: Square, to: Square, (piece, color): (Piece, Color)) -> Effect {
    Effect::Commit(MoveRequest::new(from, to, piece, color))
}

pub fn on_drop<O>(
    square: Square,
    carry: &DragCarry,
    state: &InteractionState,
    oracle: &O,
) -> Transition
where
    O: LegalMoveOracle + ?Sized,
{
    if !state.accepts_moves() || carry.square == square {
        return smallvec![Effect::EndDrag];
    }
    let carrier = Some(Carrier::Drag(*carry));
    if can_accept_drop(square, carrier, state.is_game_over(), oracle) {
        smallvec![
            commit(carry.square, square, (carry.piece, carry.color)),
            Effect::EndDrag
        ]
    } else {
        smallvec![Effect::EndDrag]
    }
}

/// Hover is purely visual, so it does not care whether the drop would be legal.
pub fn on_drag_hover(square: Square) -> Transition {
    smallvec![Effect::Dispatch(Intent::SetHoveredSquare(Some(square)))]
}

pub fn on_click<O>(
    square: Square,
    occupant: Option<(Piece, Color)>,
    button: MouseButton,
    state: &InteractionState,
    oracle: &O,
) -> Transition
where
    O: LegalMoveOracle + ?Sized,
{
    if button != MouseButton::Primary {
        return Transition::new();
    }

    let mut transition: Transition = smallvec![Effect::Dispatch(Intent::ResetArrows)];
    if !state.accepts_moves() {
        return transition;
    }

    // a click can never coincide with a drag, so only the selection carries
    let selection = state.selection().copied();
    let carrier = active_carrier(None, selection.as_ref());
    if let Some(selection) = selection {
        if can_accept_drop(square, carrier, state.is_game_over(), oracle) {
            transition.push(commit(
                selection.square,
                square,
                (selection.piece, selection.color),
            ));
            return transition;
        }
    }

    let next_selection = match occupant {
        None => None,
        Some(_) if selection.map(|s| s.square) == Some(square) => None,
        Some((piece, color)) => Some(Selection {
            square,
            piece,
            color,
        }),
    };
    transition.push(Effect::Dispatch(Intent::SetSelectedSquare(next_selection)));
    transition
}

pub fn on_mouse_down(square: Square, button: MouseButton) -> Transition {
    match button {
        MouseButton::Secondary => smallvec![Effect::Dispatch(Intent::SetArrowStart(square))],
        MouseButton::Primary => smallvec![Effect::Dispatch(Intent::ResetArrows)],
        MouseButton::Auxiliary => Transition::new(),
    }
}

pub fn on_mouse_up(square: Square, button: MouseButton) -> Transition {
    match button {
        MouseButton::Secondary => smallvec![Effect::Dispatch(Intent::SetArrowEnd(square))],
        _ => Transition::new(),
    }
}

pub fn on_context_menu() -> Transition {
    smallvec![Effect::PreventDefault]
}
