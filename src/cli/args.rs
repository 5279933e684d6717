//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{destinations::DestinationsArgs, play::PlayArgs};

#[derive(StructOpt)]
#[structopt(
    name = "interactive_board",
    about = "A mouse-driven chessboard for the terminal ♛"
)]
pub enum InteractiveBoard {
    #[structopt(
        name = "play",
        about = "Play on a mouse-driven board in the terminal. Drag or click pieces to move them, right-drag to draw arrows, right-click a square to circle it. The initial position can be specified using FEN notation with `--fen` (default: starting position). Logs go to `--log-file` if given, filtered by RUST_LOG."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "destinations",
        about = "Print the squares a piece may move to in the position given with `--fen` (default: starting position). Restrict the output to one piece with `--square`."
    )]
    Destinations(DestinationsArgs),
}

impl crate::cli::commands::Command for InteractiveBoard {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Play(cmd),
            Destinations(cmd),
        }
    }
}
