//! Shared utilities for CLI commands.

use std::fs::File;
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Sets up `env_logger`, honoring RUST_LOG. With a `log_file`, records go
/// there instead of stderr.
pub(crate) fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

pub(crate) fn exit_with_error(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(1);
}
