use thiserror::Error;

/// Errors produced by the clustering engine and the image helpers around it.
#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("dataset is empty")]
    EmptyDataset,
    #[error("k must be at least 1, got {0}")]
    InvalidK(usize),
    #[error("palette is empty")]
    EmptyPalette,
    #[error("vectors must have at least one channel")]
    ZeroChannels,
    #[error("channel width mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("vector {index} contains a non-finite channel value")]
    NonFinite { index: usize },
    #[error("{points} points cannot fill a {width}x{height} image")]
    ShapeMismatch {
        points: usize,
        width: u32,
        height: u32,
    },
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl QuantizeError {
    /// `true` for usage errors that will recur on retry with the same input.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, QuantizeError::Image(_))
    }
}

pub type Result<T> = std::result::Result<T, QuantizeError>;
