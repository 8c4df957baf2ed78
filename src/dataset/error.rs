use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    // IO and source layout errors
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Required manifest column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("Invalid label value '{value}' in manifest row {row}")]
    InvalidLabel { row: usize, value: String },

    #[error("Manifest row {row} has fewer fields than the header")]
    MalformedRow { row: usize },

    #[error("No images found in the dataset")]
    EmptyDataset,

    #[error("Partition filtering requires csv mode")]
    PartitionWithoutManifest,

    // Label encoding errors
    #[error("Class '{0}' is not part of the class mapper")]
    UnknownClass(String),

    #[error("Class index {index} out of range for {len} classes")]
    ClassIndexOutOfRange { index: usize, len: usize },

    // Shuffle errors
    #[error("Random number generator (shuffle) not set or enabled")]
    RngNotSet,

    // Sample access and decode errors
    #[error("Sample index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Failed to decode image {path:?}: {source}")]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },
}
