//! Data models for converted datasets
//!
//! A conversion produces an ordered list of [`Record`]s and, for SD files, a
//! [`FieldMetadata`] summary. Both serialize to the JSON shapes the Squonk
//! job service expects for the "data" and "metadata" parts.

use serde::{Serialize, Serializer};
use squonk_common::{media, Result, SquonkError};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

/// Format tag carried by every emitted record
pub const RECORD_FORMAT: &str = "mol";

/// Value class reported for every SD field (no type inference is done)
pub const STRING_VALUE_CLASS: &str = "java.lang.String";

// ============================================================================
// Input format
// ============================================================================

/// Input file format understood by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// A single bare MOL block
    Mol,
    /// One or more MOL blocks with tagged fields and `$$$$` delimiters
    Sdf,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Mol => "mol",
            Format::Sdf => "sdf",
        }
    }

    /// Resolve an explicit hint, or infer one from the path's extension
    ///
    /// A trailing `.gz` is ignored when inferring, so `input.sdf.gz` is SDF.
    pub fn resolve(path: &Path, hint: Option<&str>) -> Result<Self> {
        match hint {
            Some(hint) => hint.parse(),
            None => crate::loader::format_extension(path)
                .unwrap_or_default()
                .parse(),
        }
    }
}

impl FromStr for Format {
    type Err = SquonkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mol" => Ok(Format::Mol),
            "sdf" => Ok(Format::Sdf),
            _ => Err(SquonkError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Ordered field map
// ============================================================================

/// String-keyed map that keeps keys in first-insertion order
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// its original position (last write wins). Lookups are linear scans, which
/// suits the handful of tags on a single SD record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> FieldMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a value, returning the previous value for the key if any
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            },
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for FieldMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for FieldMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for FieldMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

// ============================================================================
// Records
// ============================================================================

/// One molecule entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Identifier generated when the record was started
    #[serde(rename = "uuid")]
    pub id: Uuid,

    /// Connection-table text up to and including `M  END`, newline-terminated
    pub source: String,

    /// Always [`RECORD_FORMAT`]
    pub format: String,

    /// SD field values keyed by tag name; empty for MOL input
    pub values: FieldMap<String>,
}

impl Record {
    /// Start a new record with a fresh identifier
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            source: String::new(),
            format: RECORD_FORMAT.to_string(),
            values: FieldMap::new(),
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Record shape of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectType {
    #[serde(rename = "org.squonk.types.MoleculeObject")]
    MoleculeObject,
    #[serde(rename = "org.squonk.types.BasicObject")]
    BasicObject,
}

impl ObjectType {
    /// Fully qualified type name used in the metadata `type` key
    pub fn type_name(self) -> &'static str {
        match self {
            ObjectType::MoleculeObject => "org.squonk.types.MoleculeObject",
            ObjectType::BasicObject => "org.squonk.types.BasicObject",
        }
    }

    /// Media type of the data part holding records of this shape
    pub fn media_type(self) -> &'static str {
        match self {
            ObjectType::MoleculeObject => media::MOLECULE_OBJECT,
            ObjectType::BasicObject => media::BASIC_OBJECT,
        }
    }
}

/// Creation and history annotations shared by fields and whole datasets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub created: String,
    pub source: String,
    pub description: String,
    pub history: String,
}

/// Provenance entry for one SD field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetaProp {
    pub field_name: String,
    pub values: Provenance,
}

/// Summary of one converted file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub size: usize,
    pub value_class_mappings: FieldMap<String>,
    pub field_meta_props: Vec<FieldMetaProp>,
    pub properties: Provenance,
}

// ============================================================================
// Conversion result
// ============================================================================

/// Output of one successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub records: Vec<Record>,

    /// Present for SD input; `None` for a plain MOL block
    pub metadata: Option<FieldMetadata>,

    /// Shape of `records`
    pub object_type: ObjectType,
}

impl ConversionResult {
    /// Always [`ConversionStatus::Success`]; failures never produce a result
    pub fn status(&self) -> ConversionStatus {
        ConversionStatus::Success
    }

    /// Media type to declare for the serialized records
    pub fn data_media_type(&self) -> &'static str {
        self.object_type.media_type()
    }

    /// Media type to declare for the serialized metadata, when there is any
    pub fn metadata_media_type(&self) -> Option<&'static str> {
        self.metadata.as_ref().map(|_| media::DATASET_METADATA)
    }
}

/// Outcome code of a conversion call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    Failed(i32),
}

impl ConversionStatus {
    /// Numeric status: 0 on success, the error's status code otherwise
    pub fn code(self) -> i32 {
        match self {
            ConversionStatus::Success => 0,
            ConversionStatus::Failed(code) => code,
        }
    }

    pub fn from_result(result: &Result<ConversionResult>) -> Self {
        match result {
            Ok(converted) => converted.status(),
            Err(e) => ConversionStatus::Failed(e.status_code()),
        }
    }
}
