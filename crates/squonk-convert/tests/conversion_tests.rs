//! End-to-end conversion tests over files on disk

use flate2::write::GzEncoder;
use flate2::Compression;
use squonk_common::{media, SquonkError};
use squonk_convert::dialect::{finalize_sdf, reduce_to_basic};
use squonk_convert::models::STRING_VALUE_CLASS;
use squonk_convert::{convert, convert_mol_as_sdf, ConversionStatus, Format, ObjectType};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BLOCK_1: &str = "aspirin\n  RDKit          2D\n\n  2  1  0  0  0  0  0  0  0  0999 V2000\n    0.0000    0.0000    0.0000 C   0  0\n    1.2990    0.7500    0.0000 O   0  0\n  1  2  2  0\nM  END\n";

const BLOCK_2: &str = "ethanol\n  RDKit          2D\n\n  3  2  0  0  0  0  0  0  0  0999 V2000\n    0.0000    0.0000    0.0000 C   0  0\n    1.2990    0.7500    0.0000 C   0  0\n    2.5981   -0.0000    0.0000 O   0  0\n  1  2  1  0\n  2  3  1  0\nM  END\n";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn write_gzip(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();
    path
}

fn two_record_sdf() -> String {
    format!("{BLOCK_1}> <ID>\nA1\n\n$$$$\n{BLOCK_2}> <ID>\nA2\n\n$$$$\n")
}

#[test]
fn test_two_record_sdf_scenario() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "pair.sdf", &two_record_sdf());

    let result = convert(&path, None).unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].source, BLOCK_1);
    assert_eq!(result.records[1].source, BLOCK_2);
    assert_eq!(result.records[0].format, "mol");
    assert_eq!(result.records[0].values.get("ID").map(String::as_str), Some("A1"));
    assert_eq!(result.records[1].values.get("ID").map(String::as_str), Some("A2"));

    let meta = result.metadata.as_ref().unwrap();
    assert_eq!(meta.size, 2);
    assert_eq!(meta.value_class_mappings.len(), 1);
    assert_eq!(meta.value_class_mappings.get("ID").map(String::as_str), Some(STRING_VALUE_CLASS));
    assert_eq!(meta.field_meta_props.len(), 1);
    assert_eq!(meta.field_meta_props[0].field_name, "ID");
    assert_eq!(result.status(), ConversionStatus::Success);
    assert_eq!(result.metadata_media_type(), Some(media::DATASET_METADATA));
}

#[test]
fn test_single_mol_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "aspirin.mol", BLOCK_1);

    let result = convert(&path, None).unwrap();

    assert_eq!(result.records.len(), 1);
    assert!(result.records[0].values.is_empty());
    assert_eq!(result.records[0].source, BLOCK_1);
    assert!(result.metadata.is_none());
    assert_eq!(result.data_media_type(), media::MOLECULE_OBJECT);
}

#[test]
fn test_explicit_hint_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "pair.txt", &two_record_sdf());

    let as_sdf = convert(&path, Some("sdf")).unwrap();
    assert_eq!(as_sdf.records.len(), 2);

    let as_mol = convert(&path, Some("mol")).unwrap();
    assert_eq!(as_mol.records.len(), 1);
    assert!(as_mol.metadata.is_none());
}

#[test]
fn test_gzip_is_transparent() {
    let dir = TempDir::new().unwrap();
    let plain = write_file(&dir, "pair.sdf", &two_record_sdf());
    let gz = write_gzip(&dir, "pair.sdf.gz", &two_record_sdf());

    let a = convert(&plain, None).unwrap();
    let b = convert(&gz, None).unwrap();

    assert_eq!(a.records.len(), b.records.len());
    for (x, y) in a.records.iter().zip(&b.records) {
        assert_eq!(x.source, y.source);
        assert_eq!(x.values, y.values);
        assert_eq!(x.format, y.format);
    }

    let (ma, mb) = (a.metadata.unwrap(), b.metadata.unwrap());
    assert_eq!(ma.size, mb.size);
    assert_eq!(ma.value_class_mappings, mb.value_class_mappings);
    assert_eq!(
        ma.field_meta_props.iter().map(|p| &p.field_name).collect::<Vec<_>>(),
        mb.field_meta_props.iter().map(|p| &p.field_name).collect::<Vec<_>>()
    );
}

#[test]
fn test_field_names_union_in_first_seen_order() {
    let text = format!(
        "{BLOCK_1}> <ID>\nA1\n> <LOGP>\n1.2\n$$$$\n{BLOCK_2}> <SMI>\nCCO\n> <ID>\nA2\n> <MW>\n46.07\n$$$$\n"
    );
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "mixed.sdf", &text);

    let meta = convert(&path, None).unwrap().metadata.unwrap();
    assert_eq!(
        meta.value_class_mappings.keys().collect::<Vec<_>>(),
        vec!["ID", "LOGP", "SMI", "MW"]
    );
}

#[test]
fn test_malformed_tag_does_not_abort() {
    let text = format!("{BLOCK_1}> <ID\nA1\n\n$$$$\n{BLOCK_2}> <ID>\nA2\n\n$$$$\n");
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.sdf", &text);

    let result = convert(&path, None).unwrap();

    assert_eq!(result.records.len(), 2);
    assert!(!result.records[0].values.contains_key("ID"));
    assert_eq!(result.records[1].values.get("ID").map(String::as_str), Some("A2"));
}

#[test]
fn test_unterminated_last_record_is_dropped() {
    let text = format!("{BLOCK_1}> <ID>\nA1\n\n$$$$\n{BLOCK_2}> <ID>\nA2\n");
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "truncated.sdf", &text);

    let result = convert(&path, None).unwrap();
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.metadata.unwrap().size, 1);
}

#[test]
fn test_mol_without_end_is_empty_success() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "partial.mol", "header\n\n\n  1  0\n");

    let result = convert(&path, None).unwrap();
    assert!(result.records.is_empty());
    assert!(result.metadata.is_none());
}

#[test]
fn test_unsupported_format_status() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "protein.pdb", "ATOM\n");

    let converted = convert(&path, None);
    assert!(matches!(converted, Err(SquonkError::UnsupportedFormat(_))));
    assert_eq!(ConversionStatus::from_result(&converted), ConversionStatus::Failed(1));
}

#[test]
fn test_corrupt_gzip_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad.sdf.gz", "definitely not gzip");

    let err = convert(&path, None).unwrap_err();
    assert!(matches!(err, SquonkError::Io(_)));
}

#[test]
fn test_finalized_mol_matches_mol_mode_count() {
    let dir = TempDir::new().unwrap();
    let mol_path = write_file(&dir, "aspirin.mol", BLOCK_1);
    let sdf_path = write_file(&dir, "aspirin.sdf", &finalize_sdf(BLOCK_1));

    let direct = convert(&mol_path, None).unwrap();
    let finalized = convert(&sdf_path, None).unwrap();
    let routed = convert_mol_as_sdf(&mol_path).unwrap();

    for result in [&finalized, &routed] {
        assert_eq!(result.records.len(), direct.records.len());
        assert!(result.records[0].values.is_empty());
        assert_eq!(result.records[0].source, direct.records[0].source);
        assert_eq!(result.metadata.as_ref().map(|m| m.size), Some(1));
    }
}

#[test]
fn test_basic_object_reduction() {
    let text = format!("{BLOCK_1}> <SMI>\nCC(=O)O\n\n$$$$\n{BLOCK_2}> <SMI>\nCCO\n\n$$$$\n");
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "smiles.sdf", &text);

    let result = convert(&path, None).unwrap();
    let smiles: Vec<String> = result
        .records
        .iter()
        .map(|r| r.values.get("SMI").cloned().unwrap())
        .collect();

    let basic = reduce_to_basic(result).unwrap();

    assert_eq!(basic.records.len(), 2);
    assert_eq!(
        basic.records.iter().map(|r| r.source.clone()).collect::<Vec<_>>(),
        smiles
    );
    let meta = basic.metadata.as_ref().unwrap();
    assert_eq!(meta.object_type, ObjectType::BasicObject);
    assert_eq!(meta.size, 2);
    assert_eq!(basic.data_media_type(), media::BASIC_OBJECT);
}

#[test]
fn test_basic_object_reduction_requires_smiles() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "pair.sdf", &two_record_sdf());

    let err = reduce_to_basic(convert(&path, None).unwrap()).unwrap_err();
    assert!(matches!(err, SquonkError::MissingField { index: 0, .. }));
}

#[test]
fn test_format_resolution_ignores_gz_suffix() {
    assert_eq!(Format::resolve(Path::new("x.sdf.gz"), None).unwrap(), Format::Sdf);
    assert_eq!(Format::resolve(Path::new("x.mol.gz"), None).unwrap(), Format::Mol);
}
