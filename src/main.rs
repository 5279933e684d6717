mod cli;

use cli::commands::Command;
use cli::InteractiveBoard;
use structopt::StructOpt;

fn main() {
    InteractiveBoard::from_args().execute();
}
