//! One-time build of the merged firm-year table.

use digidash_core::{
    backfill_classifications, merge_panel, FirmYearRecord, UNCLASSIFIED_CODE, UNCLASSIFIED_NAME,
};
use rusqlite::params;

use super::{get_conn, Storage};
use crate::sources::{read_classifications, read_panel};
use crate::{IngestReport, IngestSources, Result};

impl Storage {
    /// Builds the table from the sources unless it already holds data.
    ///
    /// Returns `None` when the existing table was kept.
    ///
    /// # Errors
    /// Returns error if a source is missing or unreadable, or the write fails.
    pub fn ensure_loaded(&self, sources: &IngestSources) -> Result<Option<IngestReport>> {
        if self.is_populated()? {
            tracing::info!("Firm-year table already populated, skipping ingestion");
            return Ok(None);
        }
        tracing::info!("First run: merging industry classifications into the index panel");
        self.ingest(sources).map(Some)
    }

    /// Reads both sources, carries classifications forward, merges, and
    /// replaces the table contents in one transaction.
    ///
    /// # Errors
    /// Returns error if a source is missing or unreadable, or the write fails.
    pub fn ingest(&self, sources: &IngestSources) -> Result<IngestReport> {
        let panel = read_panel(&sources.panel_csv)?;
        let mut classifications = read_classifications(&sources.industry_csv)?;
        let classification_rows = classifications.len();
        let backfilled_rows =
            backfill_classifications(&mut classifications, sources.backfill_through);

        let skipped_rows = panel.skipped;
        let records = merge_panel(panel.rows, &classifications);
        let unclassified_rows = records
            .iter()
            .filter(|r| r.industry_code == UNCLASSIFIED_CODE && r.industry_name == UNCLASSIFIED_NAME)
            .count();

        self.replace_records(&records)?;

        let report = IngestReport {
            panel_rows: records.len(),
            skipped_rows,
            classification_rows,
            backfilled_rows,
            unclassified_rows,
        };
        tracing::info!(
            panel_rows = report.panel_rows,
            skipped_rows = report.skipped_rows,
            classification_rows = report.classification_rows,
            backfilled_rows = report.backfilled_rows,
            unclassified_rows = report.unclassified_rows,
            "Firm-year table built"
        );
        Ok(report)
    }

    /// Replaces every row of the table with `records`.
    ///
    /// # Errors
    /// Returns error if the transaction fails; the previous contents are kept.
    pub fn replace_records(&self, records: &[FirmYearRecord]) -> Result<()> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM digi", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO digi
                   (firm_code, firm_name, year, industry_code, industry_name,
                    composite_index, normalized_index, extra)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.firm_code,
                    record.firm_name,
                    record.year,
                    record.industry_code,
                    record.industry_name,
                    record.composite_index,
                    record.normalized_index,
                    serde_json::to_string(&record.extra)?,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
