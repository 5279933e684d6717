pub mod board;
pub mod game;
pub mod interaction;
pub mod oracle;
pub mod tui;
