//! Plain data types returned by storage operations.

use std::path::PathBuf;

use digidash_core::PANEL_LAST_YEAR;
use serde::Serialize;

/// Where the startup ingestion reads from.
#[derive(Debug, Clone)]
pub struct IngestSources {
    /// Firm-year panel CSV.
    pub panel_csv: PathBuf,
    /// Industry classification CSV.
    pub industry_csv: PathBuf,
    /// Last year the latest classification is carried forward to.
    pub backfill_through: i32,
}

impl IngestSources {
    #[must_use]
    pub fn new(panel_csv: impl Into<PathBuf>, industry_csv: impl Into<PathBuf>) -> Self {
        Self {
            panel_csv: panel_csv.into(),
            industry_csv: industry_csv.into(),
            backfill_through: PANEL_LAST_YEAR,
        }
    }

    #[must_use]
    pub fn backfill_through(mut self, year: i32) -> Self {
        self.backfill_through = year;
        self
    }
}

/// Counts produced by one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Panel rows written to the table.
    pub panel_rows: usize,
    /// Panel lines skipped (malformed line or unparseable year).
    pub skipped_rows: usize,
    /// Classification rows read from the source, before backfill.
    pub classification_rows: usize,
    /// Classification rows appended by the carry-forward step.
    pub backfilled_rows: usize,
    /// Written rows that received the unclassified sentinels.
    pub unclassified_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub rows: u64,
    pub firms: u64,
    pub industries: u64,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}
