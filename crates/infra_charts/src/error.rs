//! Chart error types

use std::path::PathBuf;

use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur while rendering charts
#[derive(Debug, Error)]
pub enum ChartError {
    /// The output directory could not be created
    #[error("Cannot create output directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Drawing or PNG encoding failed
    #[error("Failed to render {chart}: {message}")]
    Render { chart: String, message: String },

    /// A plotted column is absent or has the wrong type
    #[error("Chart data error: {0}")]
    Data(#[from] CoreError),
}

impl ChartError {
    /// Creates a render error for the named chart
    pub fn render(chart: &str, message: impl std::fmt::Display) -> Self {
        ChartError::Render {
            chart: chart.to_string(),
            message: message.to_string(),
        }
    }
}
