//! # Generate Command Implementation
//!
//! This module implements the `generate` subcommand, which is also what runs
//! when `pipegen` is invoked without arguments. It renders the complete
//! configuration in memory and only then writes it, so a failure never
//! leaves a truncated file or half a document on stdout.
//!
//! ## Example
//!
//! ```bash
//! pipegen > .travis.yml
//! pipegen generate --output .travis.yml
//! ```

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

use pipegen::render;

/// Write the generated configuration
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Write to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the `generate` command.
pub fn execute(args: GenerateArgs) -> Result<()> {
    match args.output {
        Some(path) => {
            let written = render::write_to(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("wrote {} bytes to {}", written, path.display());
        }
        None => {
            let text = render::generate()?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_generate_to_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(".travis.yml");

        execute(GenerateArgs {
            output: Some(path.clone()),
        })
        .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render::generate().unwrap());
    }

    #[test]
    fn test_generate_to_missing_directory_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("missing").join(".travis.yml");

        let err = execute(GenerateArgs { output: Some(path) }).unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
