//! Source loading
//!
//! Reads an input file fully into memory as text, decompressing it first
//! when the name ends in `.gz`, and splits it into lines for the parser.

use flate2::read::GzDecoder;
use squonk_common::Result;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Extension that marks a gzip-compressed source
pub const GZIP_EXTENSION: &str = "gz";

/// Whether the path names a gzip-compressed file
pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(GZIP_EXTENSION))
}

/// Lower-cased extension of the file once any `.gz` suffix is stripped
///
/// `input.sdf.gz` yields `sdf`; `input.gz` and `input` yield `None`.
pub fn format_extension(path: &Path) -> Option<String> {
    let path = if is_gzip(path) {
        Path::new(path.file_stem()?)
    } else {
        path
    };
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// Decompress gzip-compressed data
pub fn decompress_gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    debug!("Decompressed {} -> {} bytes", data.len(), decompressed.len());
    Ok(decompressed)
}

/// Read the whole file as text, decompressing `.gz` files transparently
pub fn read_text(path: &Path) -> Result<String> {
    let raw = std::fs::read(path)?;

    let bytes = if is_gzip(path) {
        debug!(path = %path.display(), "Opening gzipped file");
        decompress_gzip(&raw)?
    } else {
        debug!(path = %path.display(), "Opening ordinary file");
        raw
    };

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(path = %path.display(), "Input is not valid UTF-8, replacing invalid bytes");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        },
    }
}

/// Split text into lines, dropping `\n` / `\r\n` terminators
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}

/// Load a file as an ordered sequence of lines
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let text = read_text(path)?;
    Ok(split_lines(&text))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn create_gzip_data(content: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decompress_gzip() {
        let original = b"benzene\n  M  END\n";
        let compressed = create_gzip_data(original);
        assert_eq!(decompress_gzip(&compressed).unwrap(), original);
    }

    #[test]
    fn test_decompress_gzip_invalid() {
        assert!(decompress_gzip(b"not gzip data").is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(format_extension(Path::new("x/mols.sdf")).as_deref(), Some("sdf"));
        assert_eq!(format_extension(Path::new("mols.SDF.gz")).as_deref(), Some("sdf"));
        assert_eq!(format_extension(Path::new("aspirin.mol")).as_deref(), Some("mol"));
        assert_eq!(format_extension(Path::new("mols.gz")), None);
        assert_eq!(format_extension(Path::new("mols")), None);
    }

    #[test]
    fn test_split_lines_handles_crlf() {
        assert_eq!(split_lines("a\r\nb\nc"), vec!["a", "b", "c"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_read_text_gzip_and_plain() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("one.mol");
        let gz = dir.path().join("one.mol.gz");
        std::fs::write(&plain, "line1\nline2\n").unwrap();
        std::fs::write(&gz, create_gzip_data(b"line1\nline2\n")).unwrap();

        assert_eq!(read_text(&plain).unwrap(), read_text(&gz).unwrap());
        assert_eq!(load_lines(&gz).unwrap(), vec!["line1", "line2"]);
    }

    #[test]
    fn test_read_text_missing_file() {
        let err = read_text(Path::new("/nonexistent/input.sdf")).unwrap_err();
        assert!(matches!(err, squonk_common::SquonkError::Io(_)));
    }
}
