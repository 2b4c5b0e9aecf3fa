//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading entity input
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Unknown entity kind '{kind}' in record {index}")]
    UnknownKind { index: usize, kind: String },

    #[error("Invalid exclusion pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Why a relative path was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path contains an empty segment")]
    EmptySegment,

    #[error("path escapes the project root")]
    EscapesRoot,

    #[error("class record has no owning file")]
    MissingFile,
}

/// Errors raised while building, accumulating or packing the city tree.
///
/// Every variant names the offending path.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: PathError },

    #[error("Metric overflow while accumulating '{path}'")]
    MetricOverflow { path: String },

    #[error("Footprint of '{path}' is not a finite number")]
    NonFiniteFootprint { path: String },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
