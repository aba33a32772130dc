//! Typed error enum for the storage layer.
//!
//! Lets callers tell a missing source file (fatal at startup) apart from
//! transient database failures without downcasting opaque boxes.

use std::path::PathBuf;

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A source file required for ingestion does not exist.
    #[error("source file not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// A source file could not be read or parsed as CSV.
    #[error("failed to read {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from a source file header.
    #[error("{} has no {column} column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// SQL / statement failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection could not be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Row data could not be deserialized into the domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Pool(_) => true,
            Self::Database(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }

    /// Whether this error comes from the ingestion sources rather than the database.
    pub const fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::SourceMissing(_) | Self::SourceRead { .. } | Self::MissingColumn { .. }
        )
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}
