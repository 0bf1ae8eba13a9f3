//! Error handling for the analysis crate.

use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for the analysis pipeline
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error manipulating Arrow arrays or batches
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// A required column is absent or has an unusable type
    #[error("Column error: {0}")]
    Column(String),

    /// A model could not be fitted
    #[error("Model error: {0}")]
    Model(String),

    /// Error writing a report artifact
    #[error("Report error writing {path}: {message}")]
    Report {
        /// Artifact the write failed on
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Wrapped error from the binary boundary
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnalysisError {
    /// Create a column error
    pub fn column(message: impl Into<String>) -> Self {
        Self::Column(message.into())
    }

    /// Create a model-fitting error
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model(message.into())
    }

    /// Create a report-artifact error
    pub fn report(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Report {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
