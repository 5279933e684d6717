//! The single owner of interaction state for one board view.
//!
//! Events go in through [`BoardSession::handle`]; the controller turns each
//! one into effects, and the session applies them in order. Nothing else
//! writes to the state.

use common::bitboard::Square;
use log::{debug, info, warn};

use crate::board::{piece::Piece, PieceLookup};
use crate::game::executor::{MoveExecutor, MoveRequest};
use crate::oracle::LegalMoveOracle;

use super::controller::{self, Effect, MouseButton, Transition};
use super::drop_target::DragCarry;
use super::promotion::Viewport;
use super::state::{Intent, InteractionState, PendingPromotion};
use super::view::{RenderContext, SquareView};

/// Everything a session needs from the outside world.
pub trait Host: LegalMoveOracle + PieceLookup + MoveExecutor {}

impl<T: LegalMoveOracle + PieceLookup + MoveExecutor + ?Sized> Host for T {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    DragStart { square: Square },
    DragHover { square: Square },
    Drop { square: Square },
    /// The drag was released somewhere that is not a square.
    DragCancel,
    Click { square: Square, button: MouseButton },
    MouseDown { square: Square, button: MouseButton },
    MouseUp { square: Square, button: MouseButton },
    ContextMenu { square: Square },
}

#[derive(Clone, Copy, Debug)]
struct DragGesture {
    carry: DragCarry,
    hover_before: Option<Square>,
}

#[derive(Default)]
pub struct BoardSession {
    state: InteractionState,
    drag: Option<DragGesture>,
}

impl BoardSession {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn drag_carry(&self) -> Option<&DragCarry> {
        self.drag.as_ref().map(|gesture| &gesture.carry)
    }

    /// Handles one input event to completion. Returns whether the platform's
    /// default action for the event must be suppressed.
    pub fn handle<H: Host + ?Sized>(&mut self, host: &mut H, event: BoardEvent) -> bool {
        self.discard_stale(&*host);

        let transition = match event {
            BoardEvent::DragStart { square } => {
                self.start_drag(&*host, square);
                Transition::new()
            }
            BoardEvent::DragHover { square } => controller::on_drag_hover(square),
            BoardEvent::Drop { square } => match self.drag {
                Some(gesture) => controller::on_drop(square, &gesture.carry, &self.state, &*host),
                None => Transition::new(),
            },
            BoardEvent::DragCancel => {
                self.cancel_drag();
                Transition::new()
            }
            BoardEvent::Click { square, button } => {
                let occupant = host.piece_at(square);
                controller::on_click(square, occupant, button, &self.state, &*host)
            }
            BoardEvent::MouseDown { square, button } => controller::on_mouse_down(square, button),
            BoardEvent::MouseUp { square, button } => controller::on_mouse_up(square, button),
            BoardEvent::ContextMenu { .. } => controller::on_context_menu(),
        };

        self.run(host, transition)
    }

    fn run<H: Host + ?Sized>(&mut self, host: &mut H, transition: Transition) -> bool {
        let mut prevent_default = false;
        for effect in transition {
            match effect {
                Effect::Dispatch(intent) => self.dispatch(intent),
                Effect::Commit(request) => self.commit(host, request),
                Effect::EndDrag => self.drag = None,
                Effect::PreventDefault => prevent_default = true,
            }
        }
        prevent_default
    }

    fn dispatch(&mut self, intent: Intent) {
        debug!("dispatch {:?}", intent);
        self.state.apply(intent);
    }

    fn start_drag<H: Host + ?Sized>(&mut self, host: &H, square: Square) {
        if !self.state.accepts_moves() {
            return;
        }
        let (piece, color) = match host.piece_at(square) {
            Some(occupant) => occupant,
            None => return,
        };
        debug!("drag started on {}", square);
        self.drag = Some(DragGesture {
            carry: DragCarry {
                square,
                piece,
                color,
            },
            hover_before: self.state.hovered(),
        });
    }

    fn cancel_drag(&mut self) {
        if let Some(gesture) = self.drag.take() {
            debug!("drag from {} cancelled", gesture.carry.square);
            self.dispatch(Intent::SetHoveredSquare(gesture.hover_before));
        }
    }

    /// Transient state is cleared before the executor sees the move; its
    /// outcome does not restore it.
    fn commit<H: Host + ?Sized>(&mut self, host: &mut H, request: MoveRequest) {
        if request.from == request.to {
            warn!("refusing to move {} onto itself", request.from);
            return;
        }

        self.drag = None;
        self.dispatch(Intent::SetSelectedSquare(None));

        if request.promotion.is_none() && host.requires_promotion(&request) {
            info!("move {} waits for a promotion choice", request);
            self.dispatch(Intent::RequestPromotion(PendingPromotion {
                square: request.to,
                request,
            }));
            return;
        }

        self.execute(host, request);
    }

    fn execute<H: Host + ?Sized>(&mut self, host: &mut H, request: MoveRequest) {
        match host.commit_move(request) {
            Ok(()) => self.dispatch(Intent::RecordMove {
                source: request.from,
                destination: request.to,
            }),
            Err(error) => warn!("move {} was not applied: {}", request, error),
        }
    }

    /// Completes the pending promotion with `choice`, or abandons the move
    /// when `choice` is `None`.
    pub fn resolve_promotion<H: Host + ?Sized>(&mut self, host: &mut H, choice: Option<Piece>) {
        let pending = match self.state.promotion() {
            Some(pending) => *pending,
            None => return,
        };
        self.dispatch(Intent::ClearPromotion);
        match choice {
            Some(piece) => self.execute(host, pending.request.with_promotion(piece)),
            None => info!("promotion on {} cancelled", pending.square),
        }
    }

    pub fn set_game_over(&mut self, game_over: bool) {
        if game_over == self.state.is_game_over() {
            return;
        }
        if game_over {
            self.drag = None;
        }
        self.dispatch(Intent::SetGameOver(game_over));
    }

    /// Replaces the state wholesale, e.g. on a new game. Any drag in flight
    /// refers to the old board and is dropped.
    pub fn reset(&mut self, state: InteractionState) {
        info!("interaction state reset");
        self.drag = None;
        self.state = state;
    }

    fn discard_stale<H: PieceLookup + ?Sized>(&mut self, host: &H) {
        if let Some(gesture) = self.drag {
            let carry = gesture.carry;
            if host.piece_at(carry.square) != Some((carry.piece, carry.color)) {
                debug!("discarding stale drag from {}", carry.square);
                self.cancel_drag();
            }
        }
        if let Some(selection) = self.state.selection().copied() {
            if host.piece_at(selection.square) != Some((selection.piece, selection.color)) {
                debug!("discarding stale selection on {}", selection.square);
                self.dispatch(Intent::SetSelectedSquare(None));
            }
        }
    }

    pub fn render_context(&self, viewport: Viewport) -> RenderContext<'_> {
        RenderContext {
            state: &self.state,
            drag: self.drag_carry(),
            viewport,
        }
    }

    pub fn square_view<H>(&self, host: &H, square: Square, viewport: Viewport) -> SquareView
    where
        H: LegalMoveOracle + PieceLookup + ?Sized,
    {
        self.render_context(viewport).square_view(host, square)
    }

    pub fn board_view<H>(&self, host: &H, viewport: Viewport) -> Vec<SquareView>
    where
        H: LegalMoveOracle + PieceLookup + ?Sized,
    {
        self.render_context(viewport).board_view(host)
    }
}
