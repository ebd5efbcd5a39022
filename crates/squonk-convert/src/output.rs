//! Writing converted datasets to disk
//!
//! A dataset is stored as `<base>.data` (JSON array of records) and, when
//! there is metadata, `<base>.metadata` (JSON object).

use serde::Serialize;
use squonk_common::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::models::ConversionResult;

pub const DATA_EXTENSION: &str = "data";
pub const METADATA_EXTENSION: &str = "metadata";

/// Paths written for one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFiles {
    pub data: PathBuf,
    pub metadata: Option<PathBuf>,
}

/// Render a value as JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Write the records and metadata of a conversion next to `out_base`
pub fn write_dataset(
    result: &ConversionResult,
    out_base: &Path,
    config: &Config,
) -> Result<DatasetFiles> {
    let base = config.resolve(out_base);
    if let Some(parent) = base.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let data = with_suffix(&base, DATA_EXTENSION);
    std::fs::write(&data, to_json(&result.records, config.pretty)?)?;

    let metadata = match &result.metadata {
        Some(meta) => {
            let path = with_suffix(&base, METADATA_EXTENSION);
            std::fs::write(&path, to_json(meta, config.pretty)?)?;
            Some(path)
        },
        None => None,
    };

    info!(
        data = %data.display(),
        metadata = ?metadata.as_ref().map(|p| p.display().to_string()),
        records = result.records.len(),
        "Wrote dataset"
    );

    Ok(DatasetFiles { data, metadata })
}

/// Append `.suffix` to the full base name (`run.v1` becomes `run.v1.data`)
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
