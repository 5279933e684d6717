//! Terminal User Interface (TUI) for playing on the board with a mouse

pub mod app;
pub mod board_widget;
pub mod input;
pub mod theme;

pub use app::{TuiApp, TuiSettings};
pub use theme::Theme;
