//! # pipegen CLI
//!
//! This is the binary entry point for the `pipegen` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`, with help text wrapped to
//!   the current terminal width.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level application errors and translating them into a
//!   non-zero exit status.
//!
//! The generator itself lives in the `pipegen` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};

use pipegen::docs::docs_url;
use pipegen::output::{terminal_width, DEFAULT_PADDING, DEFAULT_WIDTH};

fn main() -> Result<()> {
    let matches = cli::Cli::command()
        .term_width(terminal_width(DEFAULT_WIDTH, DEFAULT_PADDING))
        .after_help(format!("Travis configuration docs: {}", docs_url("travis-ci")))
        .get_matches();
    let cli = cli::Cli::from_arg_matches(&matches)?;
    cli.execute()
}
