//! Conversions between dataset dialects
//!
//! - [`finalize_sdf`] turns a bare MOL block into a one-record SD file.
//! - [`reduce_to_basic`] turns MoleculeObject records into BasicObject
//!   records whose source is the record's SMILES value.

use squonk_common::{Result, SquonkError};
use tracing::debug;

use crate::models::{ConversionResult, FieldMap, FieldMetadata, ObjectType, Record};
use crate::parser::RECORD_DELIMITER;

/// SD field holding the SMILES string used by the BasicObject reduction
pub const SMILES_FIELD: &str = "SMI";

/// Append a record delimiter to a MOL block
pub fn finalize_sdf(mol_text: &str) -> String {
    let mut sdf = String::with_capacity(mol_text.len() + RECORD_DELIMITER.len() + 2);
    sdf.push_str(mol_text);
    if !sdf.is_empty() && !sdf.ends_with('\n') {
        sdf.push('\n');
    }
    sdf.push_str(RECORD_DELIMITER);
    sdf.push('\n');
    sdf
}

/// Reduce MoleculeObject records to BasicObject records
///
/// Each record's source becomes its `SMI` value and its values are dropped.
/// Fails with [`SquonkError::MissingField`] on the first record without an
/// `SMI` value; nothing is returned in that case.
pub fn reduce_to_basic(result: ConversionResult) -> Result<ConversionResult> {
    let ConversionResult {
        records, metadata, ..
    } = result;

    let records = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| reduce_record(index, record))
        .collect::<Result<Vec<_>>>()?;

    let metadata = metadata.map(|meta| FieldMetadata {
        object_type: ObjectType::BasicObject,
        size: meta.size,
        value_class_mappings: FieldMap::new(),
        field_meta_props: Vec::new(),
        properties: meta.properties,
    });

    debug!(records = records.len(), "Reduced records to BasicObject");

    Ok(ConversionResult {
        records,
        metadata,
        object_type: ObjectType::BasicObject,
    })
}

fn reduce_record(index: usize, record: Record) -> Result<Record> {
    let Record {
        id,
        format,
        values,
        ..
    } = record;

    let smiles = values.get(SMILES_FIELD).cloned().ok_or_else(|| SquonkError::MissingField {
        index,
        field: SMILES_FIELD.to_string(),
    })?;

    Ok(Record {
        id,
        source: smiles,
        format,
        values: FieldMap::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::Provenance;

    fn molecule(smiles: Option<&str>) -> Record {
        let mut record = Record::new();
        record.source = "x\nM  END\n".to_string();
        record.values.insert("ID", "A1".to_string());
        if let Some(smi) = smiles {
            record.values.insert(SMILES_FIELD, smi.to_string());
        }
        record
    }

    fn molecule_result(records: Vec<Record>) -> ConversionResult {
        let mut mappings = FieldMap::new();
        mappings.insert("SMI", "java.lang.String".to_string());
        let metadata = FieldMetadata {
            object_type: ObjectType::MoleculeObject,
            size: records.len(),
            value_class_mappings: mappings,
            field_meta_props: Vec::new(),
            properties: Provenance {
                created: "01-Jan-2024 00:00:00 UTC".to_string(),
                source: "SD file: in.sdf".to_string(),
                description: "Read from SD file: in.sdf".to_string(),
                history: String::new(),
            },
        };
        ConversionResult {
            records,
            metadata: Some(metadata),
            object_type: ObjectType::MoleculeObject,
        }
    }

    #[test]
    fn test_finalize_sdf_appends_delimiter() {
        assert_eq!(finalize_sdf("x\nM  END\n"), "x\nM  END\n$$$$\n");
        assert_eq!(finalize_sdf("x\nM  END"), "x\nM  END\n$$$$\n");
        assert_eq!(finalize_sdf(""), "$$$$\n");
    }

    #[test]
    fn test_reduce_to_basic() {
        let input = molecule_result(vec![molecule(Some("CCO")), molecule(Some("c1ccccc1"))]);
        let ids: Vec<_> = input.records.iter().map(|r| r.id).collect();

        let reduced = reduce_to_basic(input).unwrap();

        assert_eq!(reduced.object_type, ObjectType::BasicObject);
        assert_eq!(reduced.records.len(), 2);
        assert_eq!(reduced.records[0].source, "CCO");
        assert_eq!(reduced.records[1].source, "c1ccccc1");
        assert!(reduced.records.iter().all(|r| r.values.is_empty()));
        assert_eq!(reduced.records.iter().map(|r| r.id).collect::<Vec<_>>(), ids);

        let meta = reduced.metadata.unwrap();
        assert_eq!(meta.object_type, ObjectType::BasicObject);
        assert_eq!(meta.size, 2);
        assert!(meta.value_class_mappings.is_empty());
    }

    #[test]
    fn test_reduce_missing_smiles_fails() {
        let input = molecule_result(vec![molecule(Some("CCO")), molecule(None)]);

        let err = reduce_to_basic(input).unwrap_err();
        assert!(matches!(err, SquonkError::MissingField { index: 1, ref field } if field == "SMI"));
    }

    #[test]
    fn test_reduce_without_metadata() {
        let input = ConversionResult {
            records: vec![molecule(Some("C"))],
            metadata: None,
            object_type: ObjectType::MoleculeObject,
        };
        let reduced = reduce_to_basic(input).unwrap();
        assert!(reduced.metadata.is_none());
        assert_eq!(reduced.data_media_type(), squonk_common::media::BASIC_OBJECT);
    }
}
