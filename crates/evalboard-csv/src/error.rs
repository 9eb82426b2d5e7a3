//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no usable header record
    #[error("Missing header row in '{0}'")]
    MissingHeader(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] evalboard_core::Error),
}
