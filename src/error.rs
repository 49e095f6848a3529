//! # Error Handling
//!
//! This module defines the centralized error type for `pipegen`. It uses the
//! `thiserror` library to describe every failure the generator can report,
//! with messages that name the offending key or file.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failures. Lookup failures (`UnknownVariant`,
//!   `UnknownStage`) are programmer errors: the generator is driven by closed
//!   enums, so they only surface when a name is parsed from text.
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Assembly itself cannot fail; only validation, serialization and reading or
//! writing the generated file can.

use thiserror::Error;

/// Main error type for pipegen operations
#[derive(Error, Debug)]
pub enum Error {
    /// A platform or runtime-version key did not name a known variant.
    #[error("Unknown {kind}: '{value}' (expected one of: {expected})")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: String,
    },

    /// A stage display name did not match any declared stage.
    #[error("Unknown stage: '{name}'")]
    UnknownStage { name: String },

    /// A job was assembled without a stage.
    #[error("Job '{job}' does not belong to any stage")]
    MissingStage { job: String },

    /// A job refers to a stage the document does not declare.
    #[error("Job '{job}' refers to undeclared stage '{stage}'")]
    UndeclaredStage { job: String, stage: String },

    /// Rendered output would make a reader follow an anchor or alias.
    #[error("Generated YAML contains an anchor or alias: {line}")]
    Alias { line: String },

    /// A generated file on disk no longer matches the generator output.
    #[error("{path} is out of date{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Stale {
        path: String,
        /// Optional hint for how to regenerate the file
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML serialization error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
