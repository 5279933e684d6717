//! Play command - drive the board with the mouse in a terminal UI.

use std::path::PathBuf;

use interactive_board::board::color::Color;
use interactive_board::board::fen::STARTING_POSITION_FEN;
use interactive_board::board::Board;
use interactive_board::game::LocalGame;
use interactive_board::tui::{Theme, TuiApp, TuiSettings};
use structopt::StructOpt;

use super::util::{exit_with_error, init_logging};
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Board,
    /// Side shown at the bottom of the board
    #[structopt(short = "p", long = "perspective", default_value = "white")]
    pub perspective: Color,
    /// Terminal widths up to this many columns use the narrow layout
    #[structopt(long = "narrow-columns", default_value = "100")]
    pub narrow_columns: u16,
    /// Without a log file, logging is off so it cannot garble the board
    #[structopt(long = "log-file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

impl Command for PlayArgs {
    fn execute(self) {
        if let Some(path) = self.log_file.as_deref() {
            if let Err(error) = init_logging(Some(path)) {
                exit_with_error("could not open log file", error);
            }
        }

        let settings = TuiSettings {
            perspective: self.perspective,
            narrow_columns: self.narrow_columns,
        };
        let game = LocalGame::new(self.starting_position);

        let result = TuiApp::new(game, settings, Theme::load()).and_then(|mut app| app.run());
        if let Err(error) = result {
            exit_with_error("terminal error", error);
        }
    }
}
