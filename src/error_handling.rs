// error_handling.rs - Error types for the labyrinth compiler

use std::path::PathBuf;
use thiserror::Error;

/// Grid axis reported by dimension errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Depth,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Depth => write!(f, "depth"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("floor {floor_index}: {axis} is {found} tile(s) but the first floor fixed it at {expected}")]
    DimensionMismatch {
        axis: Axis,
        expected: usize,
        found: usize,
        floor_index: usize,
    },

    #[error("failed to read map file '{}'", path.display())]
    MapFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file '{}'", path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Image processing failed: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CompileError>;
