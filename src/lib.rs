//! # pipegen
//!
//! This library generates the project's `.travis.yml` from typed definitions
//! instead of hand-edited YAML. It is used by the `pipegen` command-line tool,
//! which prints the generated file, but the pieces are usable on their own.
//!
//! ## Quick Example
//!
//! ```
//! use pipegen::{document, render};
//!
//! let doc = document::assemble();
//! assert_eq!(doc.jobs.include.len(), 4);
//!
//! let text = render::render(&doc).unwrap();
//! assert!(text.starts_with("# GENERATED, DO NOT EDIT!"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Stages (`stage`)**: The fixed, named phases of the pipeline and the
//!   conditions that gate them.
//! - **Shards (`shard`)**: One job each. Shards are composed from fragments
//!   with an explicit merge policy: list fields concatenate, scalar fields
//!   are replaced.
//! - **Static tables (`env`, `platform`, `cache`, `deploy`)**: Environment
//!   overlays, per-platform bases, the cache policy and deploy policies.
//! - **Job factories (`jobs`)**: Pure functions building each job.
//! - **Assembly and rendering (`document`, `render`)**: The whole document,
//!   and its YAML text with the generated-file header.
//!
//! Two small helpers ship alongside: `output::terminal_width` and
//! `docs::docs_url`.

pub mod cache;
pub mod deploy;
pub mod docs;
pub mod document;
pub mod env;
pub mod error;
pub mod jobs;
pub mod output;
pub mod platform;
pub mod render;
pub mod shard;
pub mod stage;

#[cfg(test)]
mod shard_proptest;
