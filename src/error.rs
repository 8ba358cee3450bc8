use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlicerError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to decode image data: {0}")]
    ImageDecode(#[source] image::ImageError),

    #[error("Row {index} is out of range (sheet has {rows} rows)")]
    RowOutOfRange { index: usize, rows: usize },

    #[error("Invalid sprite size: {0}")]
    InvalidSize(String),

    #[error("No valid images found in input")]
    NoImages,

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),
}
