use std::path::PathBuf;
use thiserror::Error;

use super::record::Orientation;

#[derive(Error, Debug)]
pub enum RotationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No {orientation} images (jpg, jpeg, png) found in {}", dir.display())]
    EmptyPool {
        orientation: Orientation,
        dir: PathBuf,
    },

    #[error("Failed to query display geometry: {0}")]
    Display(String),

    #[error("Image error for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RotationError {
    pub fn config(message: impl Into<String>) -> Self {
        RotationError::Config(message.into())
    }

    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RotationError::Storage {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error when it ends the run
    pub fn exit_code(&self) -> i32 {
        match self {
            RotationError::Config(_) => 2,
            _ => 1,
        }
    }
}
