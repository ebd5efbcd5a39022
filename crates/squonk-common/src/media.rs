//! Media types exchanged with the Squonk job service
//!
//! Converted datasets are submitted as two parts: the records ("data") and
//! the dataset summary ("metadata"). Each part is tagged with one of the
//! media types below. Service input descriptors declare a dataset media
//! type, which [`dataset_parts`] expands into the part types to send.

/// Records that keep their per-record tagged values
pub const MOLECULE_OBJECT: &str = "application/x-squonk-molecule-object+json";

/// Records reduced to a single source string
pub const BASIC_OBJECT: &str = "application/x-squonk-basic-object+json";

/// Dataset summary part
pub const DATASET_METADATA: &str = "application/x-squonk-dataset-metadata+json";

/// Input descriptor type for a molecule dataset
pub const DATASET_MOLECULE: &str = "application/x-squonk-dataset-molecule+json";

/// Input descriptor type for a basic dataset
pub const DATASET_BASIC: &str = "application/x-squonk-dataset-basic+json";

pub const SDF: &str = "chemical/x-mdl-sdfile";
pub const MOL: &str = "chemical/x-mdl-molfile";
pub const PDB: &str = "chemical/x-pdb";
pub const ZIP: &str = "application/zip";

/// Part media types expected for one job input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetParts {
    /// Media type of the data part
    pub data: &'static str,
    /// Media type of the metadata part, when the input takes one
    pub meta: Option<&'static str>,
}

/// Part media types for a service input descriptor's declared media type
///
/// Returns `None` for media types the job service does not accept as inputs.
pub fn dataset_parts(input_media_type: &str) -> Option<DatasetParts> {
    let parts = match input_media_type {
        DATASET_BASIC => DatasetParts {
            data: BASIC_OBJECT,
            meta: Some(DATASET_METADATA),
        },
        DATASET_MOLECULE => DatasetParts {
            data: MOLECULE_OBJECT,
            meta: Some(DATASET_METADATA),
        },
        ZIP => DatasetParts {
            data: ZIP,
            meta: None,
        },
        PDB => DatasetParts {
            data: MOLECULE_OBJECT,
            meta: None,
        },
        _ => return None,
    };
    Some(parts)
}

/// Converter format hint ("mol" or "sdf") for a chemical file media type
pub fn format_for_media_type(media_type: &str) -> Option<&'static str> {
    match media_type {
        SDF => Some("sdf"),
        MOL => Some("mol"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_molecule_dataset_parts() {
        let parts = dataset_parts(DATASET_MOLECULE);
        assert_eq!(
            parts,
            Some(DatasetParts {
                data: MOLECULE_OBJECT,
                meta: Some(DATASET_METADATA),
            })
        );
    }

    #[test]
    fn test_basic_dataset_parts() {
        let parts = dataset_parts(DATASET_BASIC).map(|p| p.data);
        assert_eq!(parts, Some(BASIC_OBJECT));
    }

    #[test]
    fn test_pdb_has_no_metadata_part() {
        assert_eq!(dataset_parts(PDB).and_then(|p| p.meta), None);
        assert!(dataset_parts("text/plain").is_none());
    }

    #[test]
    fn test_format_for_media_type() {
        assert_eq!(format_for_media_type(SDF), Some("sdf"));
        assert_eq!(format_for_media_type(MOL), Some("mol"));
        assert_eq!(format_for_media_type(ZIP), None);
    }
}
