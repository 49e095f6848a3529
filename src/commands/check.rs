//! # Check Command Implementation
//!
//! This module implements the `check` subcommand, which compares a file on
//! disk with what `generate` would write. The generated file says "DO NOT
//! EDIT"; this command catches hand edits and forgotten regenerations, and
//! is meant for pre-commit hooks and CI.
//!
//! Exit status is zero when the file matches byte for byte, non-zero
//! otherwise. This command never modifies any files.

use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use std::path::PathBuf;

use pipegen::error::Error;
use pipegen::output::{emoji, OutputConfig};
use pipegen::render;

/// Fail if a generated file is out of date
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path of the generated file to check.
    #[arg(value_name = "FILE", default_value = ".travis.yml")]
    pub file: PathBuf,
}

/// Execute the `check` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: CheckArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let path = &args.file;

    let difference = render::drift(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let Some((line, content)) = difference else {
        println!("{} {} is up to date", emoji(&out, "✅", "[OK]"), path.display());
        return Ok(());
    };

    debug!("first difference at line {}: {:?}", line, content);
    println!("{} {} is out of date", emoji(&out, "❌", "[ERR]"), path.display());

    Err(Error::Stale {
        path: path.display().to_string(),
        hint: Some(format!(
            "run `pipegen generate --output {}`",
            path.display()
        )),
    }
    .into())
}
