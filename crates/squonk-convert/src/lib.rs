//! Squonk Convert Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Converts MOL and SD files into the record and metadata JSON consumed by
//! the Squonk job service.
//!
//! # Pipeline
//!
//! - **loader**: reads the file, gunzipping `.gz` input
//! - **parser**: splits lines into records with a two-state machine
//! - **metadata**: summarizes SD fields and provenance
//! - **dialect**: SD finalizing and BasicObject reduction
//! - **convert**: the entry points wiring the above together
//! - **output**: writes `<base>.data` / `<base>.metadata`
//!
//! # Example
//!
//! ```no_run
//! use squonk_convert::{convert, dialect};
//!
//! fn main() -> squonk_common::Result<()> {
//!     let result = convert("compounds.sdf.gz", None)?;
//!     println!("{} records", result.records.len());
//!
//!     let basic = dialect::reduce_to_basic(result)?;
//!     println!("{}", basic.data_media_type());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod dialect;
pub mod loader;
pub mod metadata;
pub mod models;
pub mod output;
pub mod parser;

pub use convert::{convert, convert_lines, convert_mol_as_sdf, convert_str};
pub use models::{ConversionResult, ConversionStatus, FieldMetadata, Format, ObjectType, Record};
