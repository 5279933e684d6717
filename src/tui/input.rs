//! Turns raw terminal mouse events into board events.
//!
//! The terminal reports presses, releases, and motion with a button held; a
//! browser-style board wants clicks, drags, drops, and context menus. A press
//! that leaves its square becomes a drag; a press released where it started is
//! a click.
//!
//! A left press reports its `MouseDown` only once the gesture is settled: on
//! release as a click, or on a completed drop. A drag abandoned off the board
//! reports nothing but the drag itself.

use crossterm::event::{KeyModifiers, MouseButton as TermButton, MouseEvent, MouseEventKind};
use smallvec::SmallVec;

use common::bitboard::Square;

use crate::interaction::{BoardEvent, MouseButton};
use crate::tui::board_widget::BoardGeometry;

pub type PointerEvents = SmallVec<[BoardEvent; 3]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Press {
    origin: Square,
    button: MouseButton,
    dragging: bool,
    hovered: Option<Square>,
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    press: Option<Press>,
}

/// Ctrl+left stands in for a right click, as it does for context menus.
fn board_button(button: TermButton, modifiers: KeyModifiers) -> MouseButton {
    match button {
        TermButton::Left if modifiers.contains(KeyModifiers::CONTROL) => MouseButton::Secondary,
        TermButton::Left => MouseButton::Primary,
        TermButton::Middle => MouseButton::Auxiliary,
        TermButton::Right => MouseButton::Secondary,
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.press.map_or(false, |press| press.dragging)
    }

    /// Forgets any press in progress, e.g. when the board is replaced.
    pub fn reset(&mut self) {
        self.press = None;
    }

    pub fn translate(
        &mut self,
        event: &MouseEvent,
        geometry: Option<&BoardGeometry>,
    ) -> PointerEvents {
        let square = geometry.and_then(|geometry| geometry.square_at(event.column, event.row));
        let mut events = PointerEvents::new();

        match event.kind {
            MouseEventKind::Down(button) => {
                self.press = None;
                let square = match square {
                    Some(square) => square,
                    None => return events,
                };
                let button = board_button(button, event.modifiers);
                if button != MouseButton::Primary {
                    events.push(BoardEvent::MouseDown { square, button });
                }
                if button == MouseButton::Secondary {
                    events.push(BoardEvent::ContextMenu { square });
                }
                self.press = Some(Press {
                    origin: square,
                    button,
                    dragging: false,
                    hovered: None,
                });
            }
            MouseEventKind::Drag(_) => {
                let press = match self.press.as_mut() {
                    Some(press) if press.button == MouseButton::Primary => press,
                    _ => return events,
                };
                let square = match square {
                    Some(square) => square,
                    None => return events,
                };
                if !press.dragging {
                    if square == press.origin {
                        return events;
                    }
                    press.dragging = true;
                    events.push(BoardEvent::DragStart {
                        square: press.origin,
                    });
                }
                if press.hovered != Some(square) {
                    press.hovered = Some(square);
                    events.push(BoardEvent::DragHover { square });
                }
            }
            MouseEventKind::Up(_) => {
                let press = match self.press.take() {
                    Some(press) => press,
                    None => return events,
                };
                let held_down = BoardEvent::MouseDown {
                    square: press.origin,
                    button: press.button,
                };
                if press.dragging {
                    match square {
                        Some(square) => {
                            events.push(held_down);
                            events.push(BoardEvent::Drop { square });
                        }
                        None => events.push(BoardEvent::DragCancel),
                    }
                } else if let Some(square) = square {
                    if press.button == MouseButton::Primary {
                        events.push(held_down);
                    }
                    events.push(BoardEvent::MouseUp {
                        square,
                        button: press.button,
                    });
                    if square == press.origin && press.button == MouseButton::Primary {
                        events.push(BoardEvent::Click {
                            square,
                            button: press.button,
                        });
                    }
                }
            }
            _ => {}
        }

        events
    }
}
