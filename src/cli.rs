//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// pipegen - Generate the project's Travis CI configuration
///
/// Without a subcommand, the generated `.travis.yml` is written to stdout.
#[derive(Parser, Debug)]
#[command(name = "pipegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        env = "PIPEGEN_LOG"
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the generated configuration to stdout or a file
    Generate(commands::generate::GenerateArgs),

    /// Fail if a generated file is out of date
    Check(commands::check::CheckArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            None => commands::generate::execute(commands::generate::GenerateArgs::default()),
            Some(Commands::Generate(args)) => commands::generate::execute(args),
            Some(Commands::Check(args)) => commands::check::execute(args, &self.color),
            Some(Commands::Completions(args)) => commands::completions::execute(args),
        }
    }
}

/// Logs go to stderr so stdout carries nothing but the generated document.
fn init_logging(level: &str) {
    let filter = match level.parse::<log::LevelFilter>() {
        Ok(filter) => filter,
        Err(_) => {
            eprintln!("warning: unknown log level '{}', using 'warn'", level);
            log::LevelFilter::Warn
        }
    };
    // A logger may already be installed when commands run in-process.
    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
}
