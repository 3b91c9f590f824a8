//! Error types for the transfer engine.

use std::path::PathBuf;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, TransferError>;

/// Errors produced by the transfer engine.
///
/// A failing stage never yields a partial image.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(#[from] FormatIssue),

    #[error("image shapes differ: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// `[height, width, channels]` the stage required.
        expected: [usize; 3],
        /// `[height, width, channels]` it received.
        actual: [usize; 3],
    },

    #[error("could not load image from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ImageIoError,
    },

    #[error("could not save image to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: ImageIoError,
    },

    #[error("invalid transfer config: {0}")]
    InvalidConfig(String),
}

/// Why a decoded buffer could not be normalized to 3-channel RGB.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatIssue {
    #[error("unsupported image dimensions: rank {0}")]
    Rank(usize),

    #[error("unsupported number of channels: {0}")]
    Channels(usize),

    #[error("sample buffer holds {actual} values, shape needs {expected}")]
    SampleCount { expected: usize, actual: usize },

    #[error("image has no pixels")]
    Empty,
}

/// Underlying cause of a load or save failure.
#[derive(Debug, thiserror::Error)]
pub enum ImageIoError {
    #[error(transparent)]
    Codec(#[from] ::image::ImageError),

    #[error(transparent)]
    Format(#[from] FormatIssue),
}
