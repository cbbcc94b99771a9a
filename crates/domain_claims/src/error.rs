//! Claims dataset errors

use std::path::PathBuf;

use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur while loading or persisting claims data
#[derive(Debug, Error)]
pub enum ClaimDataError {
    /// The input file is absent, unreadable or malformed
    #[error("Failed to load claims data from {}: {source}", .path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A required column is absent or has the wrong type
    #[error("Schema error: {0}")]
    Schema(String),

    /// An output path could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClaimDataError {
    pub fn data_load(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ClaimDataError::DataLoad {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        ClaimDataError::Schema(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        ClaimDataError::Io {
            path: path.into(),
            source: source.into(),
        }
    }
}
