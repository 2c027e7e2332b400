//! Error types for the sales_model crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the sales_model crate
#[derive(Debug, Error)]
pub enum SalesError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to the variable specification
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error related to user-supplied input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from the least-squares fit
    #[error("Fitting error: {0}")]
    FittingError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error from model serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, SalesError>;

impl From<PolarsError> for SalesError {
    fn from(err: PolarsError) -> Self {
        SalesError::PolarsError(err.to_string())
    }
}

impl From<serde_json::Error> for SalesError {
    fn from(err: serde_json::Error) -> Self {
        SalesError::SerializationError(err.to_string())
    }
}
