//! Error types for dataset generation and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Dataset error type.
#[derive(Error, Debug)]
pub enum DataError {
    /// One or more expected input tables are absent.
    #[error("missing input tables: {}", display_paths(.paths))]
    MissingInput {
        /// Every expected path that does not exist.
        paths: Vec<PathBuf>,
    },

    /// Failure while validating loaded tables (malformed column, bad value).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid business rules or settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Polars error while building, reading or writing a table.
    #[error("Table error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Returns true when the error reports absent input tables.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, DataError::MissingInput { .. })
    }
}

impl From<config::ConfigError> for DataError {
    fn from(e: config::ConfigError) -> Self {
        DataError::Config(e.to_string())
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for dataset operations.
pub type DataResult<T> = std::result::Result<T, DataError>;
