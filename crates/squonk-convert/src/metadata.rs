//! Dataset metadata aggregation
//!
//! Builds the [`FieldMetadata`] summary for an SD file: one string-typed
//! mapping and one provenance entry per distinct field, plus dataset-level
//! properties carrying the field history.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::models::{FieldMap, FieldMetaProp, FieldMetadata, ObjectType, Provenance, Record, STRING_VALUE_CLASS};

/// Timestamp layout used in every provenance string
pub const DATE_FORMAT: &str = "%d-%b-%Y %H:%M:%S UTC";

const FIELD_DESCRIPTION: &str = "Data field from SDF";

/// Builds metadata for one converted file
///
/// The creation time is fixed when the aggregator is created, so every entry
/// of one summary carries the same timestamp.
#[derive(Debug, Clone)]
pub struct MetadataAggregator {
    created: String,
    file_name: String,
}

impl MetadataAggregator {
    /// Aggregator stamped with the current time
    pub fn new(source_path: &Path) -> Self {
        Self::at(source_path, Utc::now())
    }

    /// Aggregator stamped with a given time
    pub fn at(source_path: &Path, created: DateTime<Utc>) -> Self {
        let file_name = source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_path.display().to_string());

        Self {
            created: created.format(DATE_FORMAT).to_string(),
            file_name,
        }
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Summarize a record set
    ///
    /// Fields are listed in the order of `field_names`, followed by any
    /// record value keys not already named there, in first-seen order.
    pub fn aggregate(&self, records: &[Record], field_names: &[String]) -> FieldMetadata {
        let names = distinct_names(records, field_names);

        let value_class_mappings: FieldMap<String> = names
            .iter()
            .map(|name| (name.as_str(), STRING_VALUE_CLASS.to_string()))
            .collect();

        let field_meta_props = names
            .iter()
            .map(|name| FieldMetaProp {
                field_name: name.clone(),
                values: self.field_provenance(),
            })
            .collect();

        let history: String = names.iter().map(|name| self.added_note(name)).collect();

        debug!(
            records = records.len(),
            fields = names.len(),
            file = %self.file_name,
            "Built dataset metadata"
        );

        FieldMetadata {
            object_type: ObjectType::MoleculeObject,
            size: records.len(),
            value_class_mappings,
            field_meta_props,
            properties: Provenance {
                created: self.created.clone(),
                source: self.source_note(),
                description: format!("Read from SD file: {}", self.file_name),
                history,
            },
        }
    }

    fn source_note(&self) -> String {
        format!("SD file: {}", self.file_name)
    }

    fn field_provenance(&self) -> Provenance {
        Provenance {
            created: self.created.clone(),
            source: self.source_note(),
            description: FIELD_DESCRIPTION.to_string(),
            history: format!("[{}] Value read from SD file property", self.created),
        }
    }

    fn added_note(&self, name: &str) -> String {
        format!("[{}] Added field {}\n", self.created, name)
    }
}

fn distinct_names(records: &[Record], field_names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let record_keys = records.iter().flat_map(|r| r.values.keys());

    field_names
        .iter()
        .map(String::as_str)
        .chain(record_keys)
        .filter(|name| seen.insert(*name))
        .map(str::to_owned)
        .collect()
}
