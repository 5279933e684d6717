//! Board-wide interaction state and the intents that are the only way to change it.

use common::bitboard::{Bitboard, Square};

use crate::board::{color::Color, piece::Piece};
use crate::game::executor::MoveRequest;

/// A piece picked up by clicking, waiting for a destination click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub square: Square,
    pub piece: Piece,
    pub color: Color,
}

/// Right-click annotation state. `start`/`end` track the gesture in
/// progress; `circles` and `arrows` are the annotations it has produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arrows {
    pub start: Option<Square>,
    pub end: Option<Square>,
    pub circles: Bitboard,
    pub arrows: Vec<(Square, Square)>,
}

impl Arrows {
    fn finish(&mut self, end: Square) {
        self.end = Some(end);
        let start = match self.start {
            Some(start) => start,
            None => return,
        };
        if start == end {
            self.circles.toggle(end);
        } else if let Some(i) = self.arrows.iter().position(|&arrow| arrow == (start, end)) {
            self.arrows.remove(i);
        } else {
            self.arrows.push((start, end));
        }
    }
}

/// Endpoints of the most recently committed move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurrentPosition {
    pub source: Option<Square>,
    pub destination: Option<Square>,
}

/// A committed move held back until the user picks a promotion piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPromotion {
    pub square: Square,
    pub request: MoveRequest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    SetHoveredSquare(Option<Square>),
    SetSelectedSquare(Option<Selection>),
    ResetArrows,
    SetArrowStart(Square),
    SetArrowEnd(Square),
    RecordMove { source: Square, destination: Square },
    RequestPromotion(PendingPromotion),
    ClearPromotion,
    SetGameOver(bool),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: Option<Square>,
    selection: Option<Selection>,
    arrows: Arrows,
    current_position: CurrentPosition,
    promotion: Option<PendingPromotion>,
    game_over: bool,
}

impl InteractionState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn hovered(&self) -> Option<Square> {
        self.hovered
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn arrows(&self) -> &Arrows {
        &self.arrows
    }

    pub fn current_position(&self) -> CurrentPosition {
        self.current_position
    }

    pub fn promotion(&self) -> Option<&PendingPromotion> {
        self.promotion.as_ref()
    }

    pub fn promotion_square(&self) -> Option<Square> {
        self.promotion.map(|pending| pending.square)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether moves can currently be started: not after the game ends, and
    /// not while a promotion choice is outstanding.
    pub fn accepts_moves(&self) -> bool {
        !self.game_over && self.promotion.is_none()
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::SetHoveredSquare(square) => self.hovered = square,
            Intent::SetSelectedSquare(selection) => self.selection = selection,
            Intent::ResetArrows => self.arrows = Arrows::default(),
            Intent::SetArrowStart(square) => {
                self.arrows.start = Some(square);
                self.arrows.end = None;
            }
            Intent::SetArrowEnd(square) => self.arrows.finish(square),
            Intent::RecordMove {
                source,
                destination,
            } => {
                self.current_position = CurrentPosition {
                    source: Some(source),
                    destination: Some(destination),
                }
            }
            Intent::RequestPromotion(pending) => self.promotion = Some(pending),
            Intent::ClearPromotion => self.promotion = None,
            Intent::SetGameOver(game_over) => {
                self.game_over = game_over;
                if game_over {
                    self.selection = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    fn selection(square: Square, piece: Piece) -> Selection {
        Selection {
            square,
            piece,
            color: Color::White,
        }
    }

    #[test]
    fn test_hover_is_last_writer_wins() {
        let mut state = InteractionState::new();
        state.apply(Intent::SetHoveredSquare(Some(E4)));
        state.apply(Intent::SetHoveredSquare(Some(D5)));
        assert_eq!(Some(D5), state.hovered());
    }

    #[test]
    fn test_arrow_between_two_squares() {
        let mut state = InteractionState::new();
        state.apply(Intent::SetArrowStart(A1));
        state.apply(Intent::SetArrowEnd(H8));
        assert_eq!(Some(A1), state.arrows().start);
        assert_eq!(Some(H8), state.arrows().end);
        assert_eq!(vec![(A1, H8)], state.arrows().arrows);
        assert!(state.arrows().circles.is_empty());

        // drawing the same arrow again removes it
        state.apply(Intent::SetArrowStart(A1));
        state.apply(Intent::SetArrowEnd(H8));
        assert!(state.arrows().arrows.is_empty());
    }

    #[test]
    fn test_arrow_on_one_square_toggles_circle() {
        let mut state = InteractionState::new();
        state.apply(Intent::SetArrowStart(C3));
        state.apply(Intent::SetArrowEnd(C3));
        assert!(state.arrows().circles.contains(C3));
        state.apply(Intent::SetArrowStart(C3));
        state.apply(Intent::SetArrowEnd(C3));
        assert!(!state.arrows().circles.contains(C3));
    }

    #[test]
    fn test_arrow_end_without_start_draws_nothing() {
        let mut state = InteractionState::new();
        state.apply(Intent::SetArrowEnd(C3));
        assert_eq!(Some(C3), state.arrows().end);
        assert!(state.arrows().circles.is_empty());
        assert!(state.arrows().arrows.is_empty());
    }

    #[test]
    fn test_reset_arrows_clears_everything() {
        let mut state = InteractionState::new();
        state.apply(Intent::SetArrowStart(C3));
        state.apply(Intent::SetArrowEnd(C3));
        state.apply(Intent::SetArrowStart(A1));
        state.apply(Intent::SetArrowEnd(H8));
        state.apply(Intent::ResetArrows);
        assert_eq!(Arrows::default(), *state.arrows());
    }

    #[test]
    fn test_game_over_clears_selection() {
        let mut state = InteractionState::new();
        state.apply(Intent::SetSelectedSquare(Some(selection(E2, Piece::Pawn))));
        state.apply(Intent::SetGameOver(true));
        assert!(state.is_game_over());
        assert!(!state.accepts_moves());
        assert_eq!(None, state.selection());
    }

    #[test]
    fn test_pending_promotion_blocks_moves() {
        let mut state = InteractionState::new();
        let request = MoveRequest::new(A7, A8, Piece::Pawn, Color::White);
        state.apply(Intent::RequestPromotion(PendingPromotion {
            square: A8,
            request,
        }));
        assert_eq!(Some(A8), state.promotion_square());
        assert!(!state.accepts_moves());
        state.apply(Intent::ClearPromotion);
        assert!(state.accepts_moves());
    }

    #[test]
    fn test_record_move() {
        let mut state = InteractionState::new();
        state.apply(Intent::RecordMove {
            source: G1,
            destination: F3,
        });
        assert_eq!(
            CurrentPosition {
                source: Some(G1),
                destination: Some(F3)
            },
            state.current_position()
        );
    }
}
