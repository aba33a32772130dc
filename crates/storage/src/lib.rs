//! Storage layer for digidash
//!
//! SQLite-based embedded table holding the merged firm-year panel.
//! Built once from CSV sources, then served read-only.

mod error;
mod migrations;
mod sources;
mod storage;
#[cfg(test)]
mod tests;
mod types;

pub use error::StorageError;
pub use sources::{read_classifications, read_panel, PanelRead};
pub use storage::Storage;
pub use types::{IngestReport, IngestSources, TableStats};

pub type Result<T> = std::result::Result<T, StorageError>;
