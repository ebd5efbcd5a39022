//! Squonk Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the Squonk tools.
//!
//! # Overview
//!
//! This crate provides common functionality used across all workspace members:
//!
//! - **Error Handling**: The error taxonomy and result alias used by the converters
//! - **Logging**: Centralized `tracing` initialization
//! - **Media Types**: The payload media types understood by the job service
//!
//! # Example
//!
//! ```no_run
//! use squonk_common::{Result, SquonkError};
//!
//! fn check_format(hint: &str) -> Result<()> {
//!     match hint {
//!         "mol" | "sdf" => Ok(()),
//!         other => Err(SquonkError::UnsupportedFormat(other.to_string())),
//!     }
//! }
//! ```

pub mod error;
pub mod logging;
pub mod media;

// Re-export commonly used types
pub use error::{Result, SquonkError};
