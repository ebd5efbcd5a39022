//! Error types for the Squonk tools

use thiserror::Error;

/// Result type alias for Squonk operations
pub type Result<T> = std::result::Result<T, SquonkError>;

/// Status code reported for an unsupported format hint
pub const STATUS_UNSUPPORTED_FORMAT: i32 = 1;

/// Status code reported for I/O and serialization failures
pub const STATUS_IO: i32 = 2;

/// Status code reported when a record lacks a required field
pub const STATUS_MISSING_FIELD: i32 = 3;

/// Status code reported for invalid configuration
pub const STATUS_CONFIG: i32 = 4;

/// Main error type for the Squonk tools
///
/// Only fatal conditions are represented here. Malformed tag lines and
/// unterminated trailing records are absorbed by the parser and only show up
/// in logs and record counts.
#[derive(Error, Debug)]
pub enum SquonkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported format: '{0}' (expected 'mol' or 'sdf')")]
    UnsupportedFormat(String),

    #[error("Record {index} has no '{field}' value")]
    MissingField { index: usize, field: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SquonkError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Non-zero status code reported to callers for this failure
    pub fn status_code(&self) -> i32 {
        match self {
            Self::UnsupportedFormat(_) => STATUS_UNSUPPORTED_FORMAT,
            Self::Io(_) | Self::Serialization(_) => STATUS_IO,
            Self::MissingField { .. } => STATUS_MISSING_FIELD,
            Self::Config(_) => STATUS_CONFIG,
        }
    }
}
