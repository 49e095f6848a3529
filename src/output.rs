//! # Terminal Output
//!
//! This module answers the two questions the CLI asks about its terminal:
//! how wide it is, and whether colors and emojis should be used.
//!
//! ## Terminal Width
//!
//! [`terminal_width`] reads `COLUMNS` first, then queries the terminal. It
//! is never cached: a long-running process must pick up a resized terminal.
//!
//! ## Respecting User Preferences
//!
//! Color detection respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

/// Width assumed when no terminal is attached.
pub const DEFAULT_WIDTH: usize = 96;

/// Columns left free at the right edge.
pub const DEFAULT_PADDING: usize = 2;

/// Usable width of the terminal attached to stdout.
///
/// A positive `COLUMNS` wins over the terminal size; with neither, the width
/// is `fallback` columns. `padding` is then subtracted.
pub fn terminal_width(fallback: usize, padding: usize) -> usize {
    let columns = columns_from_env(env::var("COLUMNS").ok().as_deref()).or_else(|| {
        console::Term::stdout()
            .size_checked()
            .map(|(_, columns)| usize::from(columns))
    });
    width_from_columns(columns, fallback, padding)
}

/// Column count from a `COLUMNS` value; unset, empty, zero or garbage is `None`.
fn columns_from_env(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&columns| columns > 0)
}

/// Usable width given a known column count, if any.
pub fn width_from_columns(columns: Option<usize>, fallback: usize, padding: usize) -> usize {
    columns.unwrap_or(fallback).saturating_sub(padding)
}

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `--color=always` overrides `NO_COLOR`; `--color=auto` detects.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // Presence alone disables colors, even when empty.
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain marker otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
