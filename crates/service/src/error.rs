//! Typed error enum for the service layer.
//!
//! Separates the user-facing outcomes (missing input, nothing found) from
//! storage and chart failures so the HTTP edge can pick a status code.

use digidash_chart::ChartError;
use digidash_core::CoreError;
use digidash_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying validation, storage and chart failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required query parameter was not provided.
    #[error("{0}")]
    MissingInput(&'static str),

    /// A parameter was provided but could not be used.
    #[error("{0}")]
    InvalidInput(String),

    /// The query matched no rows.
    #[error("{0}")]
    NotFound(&'static str),

    /// Storage operation failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Chart rendering failed.
    #[error("chart: {0}")]
    Chart(#[from] ChartError),
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidYear(raw) => Self::InvalidInput(format!("Year must be a number, got {raw:?}.")),
        }
    }
}
