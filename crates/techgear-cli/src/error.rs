//! Error types for the TechGear CLI.

use techgear_data::DataError;
use thiserror::Error;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    /// Dataset generation, persistence or validation error.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Invalid progress bar template.
    #[error("Progress display error: {0}")]
    Progress(String),
}

impl From<indicatif::style::TemplateError> for CliError {
    fn from(e: indicatif::style::TemplateError) -> Self {
        CliError::Progress(e.to_string())
    }
}
