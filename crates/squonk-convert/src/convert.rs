//! Conversion entry points
//!
//! [`convert`] is the single call used by job submission: it resolves the
//! format, loads the file, parses it and, for SD input, aggregates metadata.

use squonk_common::Result;
use std::path::Path;
use tracing::{info, info_span};

use crate::dialect::finalize_sdf;
use crate::loader;
use crate::metadata::MetadataAggregator;
use crate::models::{ConversionResult, Format, ObjectType};
use crate::parser::RecordParser;

/// Convert a MOL or SD file, optionally gzip-compressed
///
/// `format_hint` must be `"mol"` or `"sdf"` when given; otherwise the format
/// comes from the file extension with any `.gz` suffix ignored. An
/// unsupported format fails before the file is read.
pub fn convert(path: impl AsRef<Path>, format_hint: Option<&str>) -> Result<ConversionResult> {
    let path = path.as_ref();
    let format = Format::resolve(path, format_hint)?;

    let _span = info_span!("convert", path = %path.display(), format = %format).entered();

    let lines = loader::load_lines(path)?;
    let result = convert_lines(lines, format, path);

    info!(
        records = result.records.len(),
        has_metadata = result.metadata.is_some(),
        "Converted file"
    );
    Ok(result)
}

/// Convert a single MOL file through the SD path
///
/// The block is closed with `$$$$` first, so the result carries (empty)
/// SD metadata instead of none.
pub fn convert_mol_as_sdf(path: impl AsRef<Path>) -> Result<ConversionResult> {
    let path = path.as_ref();
    let _span = info_span!("convert_mol_as_sdf", path = %path.display()).entered();

    let text = loader::read_text(path)?;
    Ok(convert_str(&finalize_sdf(&text), Format::Sdf, path))
}

/// Convert in-memory text; `source_path` only names the input in metadata
pub fn convert_str(text: &str, format: Format, source_path: &Path) -> ConversionResult {
    convert_lines(text.lines(), format, source_path)
}

/// Convert an already split line sequence
pub fn convert_lines<I, S>(lines: I, format: Format, source_path: &Path) -> ConversionResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let output = RecordParser::new(format).parse(lines);

    let metadata = match format {
        Format::Sdf => Some(
            MetadataAggregator::new(source_path).aggregate(&output.records, &output.field_names),
        ),
        Format::Mol => None,
    };

    ConversionResult {
        records: output.records,
        metadata,
        object_type: ObjectType::MoleculeObject,
    }
}
