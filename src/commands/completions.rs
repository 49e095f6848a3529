//! # Completions Command Implementation
//!
//! This module implements the `completions` subcommand, which generates shell
//! completion scripts with `clap_complete`.
//!
//! ## Example
//!
//! ```bash
//! pipegen completions bash > ~/.local/share/bash-completion/completions/pipegen
//! pipegen completions zsh > ~/.zfunc/_pipegen
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command, writing the script to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "pipegen", &mut io::stdout());
    Ok(())
}
