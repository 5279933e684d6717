//! Per-square flags for the presentation layer, recomputed from scratch on
//! every render.

use common::bitboard::{Bitboard, Square};
use smallvec::SmallVec;

use crate::board::{color::Color, piece::Piece, PieceLookup};
use crate::oracle::LegalMoveOracle;

use super::drop_target::{active_carrier, drop_targets, DragCarry};
use super::promotion::{show_promotion_prompt, Viewport};
use super::state::InteractionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareView {
    pub square: Square,
    pub occupant: Option<(Piece, Color)>,
    pub is_hovered: bool,
    pub can_accept_drop: bool,
    pub is_annotated: bool,
    pub show_promotion_prompt: bool,
    pub is_selected: bool,
    pub is_last_move: bool,
    pub is_drag_origin: bool,
}

/// Visual cues, most important first. A renderer with room for a single cue
/// on a square shows the first that applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Decoration {
    PromotionPrompt,
    DropTarget,
    Hovered,
    Annotated,
    Selected,
    LastMove,
}

impl SquareView {
    pub fn decorations(&self) -> SmallVec<[Decoration; 6]> {
        let flags = [
            (self.show_promotion_prompt, Decoration::PromotionPrompt),
            (self.can_accept_drop, Decoration::DropTarget),
            (self.is_hovered, Decoration::Hovered),
            (self.is_annotated, Decoration::Annotated),
            (self.is_selected, Decoration::Selected),
            (self.is_last_move, Decoration::LastMove),
        ];
        flags
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, decoration)| *decoration)
            .collect()
    }

    pub fn decoration(&self) -> Option<Decoration> {
        self.decorations().first().copied()
    }
}

/// Inputs shared by every square of one render.
pub struct RenderContext<'a> {
    pub state: &'a InteractionState,
    pub drag: Option<&'a DragCarry>,
    pub viewport: Viewport,
}

impl RenderContext<'_> {
    fn targets<O: LegalMoveOracle + ?Sized>(&self, oracle: &O) -> Bitboard {
        let carrier = active_carrier(self.drag, self.state.selection());
        drop_targets(carrier, self.state.is_game_over(), oracle)
    }

    fn view(
        &self,
        square: Square,
        occupant: Option<(Piece, Color)>,
        targets: Bitboard,
    ) -> SquareView {
        let state = self.state;
        let current = state.current_position();
        SquareView {
            square,
            occupant,
            is_hovered: state.hovered() == Some(square),
            can_accept_drop: targets.contains(square),
            is_annotated: state.arrows().circles.contains(square),
            show_promotion_prompt: show_promotion_prompt(
                state.promotion_square(),
                square,
                self.viewport,
            ),
            is_selected: state.selection().map(|s| s.square) == Some(square),
            is_last_move: current.source == Some(square) || current.destination == Some(square),
            is_drag_origin: self.drag.map(|carry| carry.square) == Some(square),
        }
    }

    pub fn square_view<H>(&self, host: &H, square: Square) -> SquareView
    where
        H: LegalMoveOracle + PieceLookup + ?Sized,
    {
        self.view(square, host.piece_at(square), self.targets(host))
    }

    /// All 64 squares, indexed by square index. Asks the oracle once.
    pub fn board_view<H>(&self, host: &H) -> Vec<SquareView>
    where
        H: LegalMoveOracle + PieceLookup + ?Sized,
    {
        let targets = self.targets(host);
        Square::all()
            .map(|square| self.view(square, host.piece_at(square), targets))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(square: Square) -> SquareView {
        SquareView {
            square,
            occupant: None,
            is_hovered: false,
            can_accept_drop: false,
            is_annotated: false,
            show_promotion_prompt: false,
            is_selected: false,
            is_last_move: false,
            is_drag_origin: false,
        }
    }

    #[test]
    fn test_plain_square_has_no_decoration() {
        assert_eq!(None, plain(Square::new(0)).decoration());
    }

    #[test]
    fn test_drop_target_outranks_annotation() {
        let view = SquareView {
            can_accept_drop: true,
            is_annotated: true,
            ..plain(Square::new(10))
        };
        assert_eq!(Some(Decoration::DropTarget), view.decoration());
        assert_eq!(
            vec![Decoration::DropTarget, Decoration::Annotated],
            view.decorations().to_vec()
        );
    }

    #[test]
    fn test_promotion_prompt_outranks_everything() {
        let view = SquareView {
            show_promotion_prompt: true,
            can_accept_drop: true,
            is_hovered: true,
            is_last_move: true,
            ..plain(Square::new(60))
        };
        assert_eq!(Some(Decoration::PromotionPrompt), view.decoration());
    }
}
