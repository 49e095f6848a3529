//! # Rendering
//!
//! Turns a [`Document`] into the text of `.travis.yml`: a fixed header
//! comment followed by block-style YAML.
//!
//! Repeated substructures (the cache policy shared by both wheel jobs, the
//! apt package list of every Linux job) are written out in full at each use.
//! `serde_yaml` never emits anchors or aliases, and [`render`] rejects any
//! output that would contain one, so reviewers diffing the file never have
//! to chase a `*id001` back to its definition.
//!
//! `serde_yaml` writes YAML 1.2, where a bare `on` is a string. Travis reads
//! the file with a YAML 1.1 parser, which loads `on`, `yes`, `n` and friends
//! as booleans, so those words are single-quoted wherever they appear as a
//! whole key or scalar.

use log::debug;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::document::{assemble, Document};
use crate::error::{Error, Result};

/// Comment block at the top of the generated file.
pub const HEADER: &str = "\
# GENERATED, DO NOT EDIT!
# To change, edit `src/jobs.rs` and run:
#   cargo run --bin pipegen > .travis.yml
";

/// Plain scalars a YAML 1.1 reader loads as booleans.
const YAML11_BOOLEANS: &[&str] = &[
    "y", "Y", "yes", "Yes", "YES", "n", "N", "no", "No", "NO", "on", "On", "ON", "off", "Off",
    "OFF",
];

/// Render the document, header included.
///
/// The document is validated first and the complete text is built before
/// returning, so callers never see partial output.
pub fn render(document: &Document) -> Result<String> {
    document.validate()?;
    let body = quote_yaml11_booleans(&serde_yaml::to_string(document)?);
    if let Some(line) = find_alias(&body) {
        return Err(Error::Alias {
            line: line.to_string(),
        });
    }
    debug!("rendered {} bytes of YAML", body.len());
    Ok(format!("{}\n\n{}", HEADER, body))
}

/// Assemble and render the project's configuration.
pub fn generate() -> Result<String> {
    render(&assemble())
}

/// Render the configuration and write it to `path` in one write.
///
/// Returns the number of bytes written.
pub fn write_to(path: &Path) -> Result<usize> {
    let text = generate()?;
    fs::write(path, &text)?;
    Ok(text.len())
}

/// Compare `path` with fresh output.
///
/// `None` when the file matches byte for byte, otherwise the 1-based number
/// and content of the first line that differs.
pub fn drift(path: &Path) -> Result<Option<(usize, String)>> {
    let existing = fs::read_to_string(path)?;
    let expected = generate()?;
    if existing == expected {
        return Ok(None);
    }
    Ok(Some(first_difference(&existing, &expected)))
}

fn first_difference(actual: &str, expected: &str) -> (usize, String) {
    let mut actual_lines = actual.lines();
    let mut expected_lines = expected.lines();
    let mut number = 0;
    loop {
        number += 1;
        match (actual_lines.next(), expected_lines.next()) {
            (Some(a), Some(e)) if a == e => continue,
            // Same lines, different line endings or trailing newline.
            (None, None) => return (number, String::new()),
            (a, _) => return (number, a.unwrap_or("").to_string()),
        }
    }
}

fn quote_yaml11_booleans(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len());
    // Indentation of the line that opened a literal block scalar.
    let mut block_indent: Option<usize> = None;
    for line in yaml.lines() {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if let Some(parent) = block_indent {
            if line.trim().is_empty() || indent > parent {
                out.push_str(line);
                out.push('\n');
                continue;
            }
            block_indent = None;
        }
        if line.ends_with('|') || line.ends_with("|-") || line.ends_with("|+") {
            block_indent = Some(indent);
        }
        out.push_str(&quote_line(line));
        out.push('\n');
    }
    out
}

/// Quote the key and value of one block-style line when they are ambiguous.
fn quote_line(line: &str) -> String {
    let mut rest = line.trim_start_matches(' ');
    let mut prefix_len = line.len() - rest.len();
    while let Some(item) = rest.strip_prefix("- ") {
        prefix_len += 2;
        rest = item;
    }

    let (key, value) = match rest.strip_suffix(':').filter(|key| !key.contains(": ")) {
        Some(key) => (Some(key), None),
        None => match rest.split_once(": ") {
            Some((key, value)) => (Some(key), Some(value)),
            None => (None, Some(rest)),
        },
    };

    let mut quoted = line[..prefix_len].to_string();
    if let Some(key) = key {
        quoted.push_str(&quote_if_boolean(key));
        quoted.push(':');
        if value.is_some() {
            quoted.push(' ');
        }
    }
    if let Some(value) = value {
        quoted.push_str(&quote_if_boolean(value));
    }
    quoted
}

fn quote_if_boolean(scalar: &str) -> Cow<'_, str> {
    if YAML11_BOOLEANS.contains(&scalar) {
        Cow::Owned(format!("'{}'", scalar))
    } else {
        Cow::Borrowed(scalar)
    }
}

/// First line that uses an anchor (`&name`) or alias (`*name`) as a node.
fn find_alias(yaml: &str) -> Option<&str> {
    yaml.lines().find(|line| {
        let item = line.trim_start().trim_start_matches("- ");
        let node = item.split_once(": ").map_or(item, |(_, value)| value);
        let node = node.strip_suffix(':').unwrap_or(node);
        (node.starts_with('&') || node.starts_with('*'))
            && node.len() > 1
            && node[1..]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    })
}
