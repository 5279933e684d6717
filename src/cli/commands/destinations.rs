//! Destinations command - list where pieces may move in a position.

use common::bitboard::Square;
use interactive_board::board::fen::STARTING_POSITION_FEN;
use interactive_board::board::Board;
use interactive_board::oracle::{LegalMoveOracle, PseudoLegalOracle};
use log::debug;
use structopt::StructOpt;

use super::util::{exit_with_error, init_logging};
use super::Command;

#[derive(StructOpt)]
pub struct DestinationsArgs {
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Board,
    /// Only report the piece on this square
    #[structopt(short = "s", long = "square")]
    pub square: Option<Square>,
}

impl Command for DestinationsArgs {
    fn execute(self) {
        if let Err(error) = init_logging(None) {
            exit_with_error("could not set up logging", error);
        }

        let board = self.starting_position;
        let oracle = PseudoLegalOracle::new(&board);
        let squares: Vec<Square> = match self.square {
            Some(square) => vec![square],
            None => board.pieces(board.turn()).occupied().iter().collect(),
        };
        debug!("listing destinations for {} squares", squares.len());

        for square in squares {
            let targets: Vec<String> = oracle
                .legal_destinations(square)
                .iter()
                .map(|target| target.to_string())
                .collect();
            println!("{}: {}", square, targets.join(" "));
        }
    }
}
