use super::{create_test_storage, write_sources, INDUSTRY_CSV, PANEL_CSV};
use crate::{IngestReport, StorageError};
use digidash_core::{RecordFilter, UNCLASSIFIED_CODE, UNCLASSIFIED_NAME};

#[test]
fn ingest_merges_and_backfills() {
    let (storage, temp_dir) = create_test_storage();
    let sources = write_sources(&temp_dir, PANEL_CSV, INDUSTRY_CSV);

    let report = storage.ingest(&sources).unwrap();

    assert_eq!(
        report,
        IngestReport {
            panel_rows: 6,
            skipped_rows: 1,
            classification_rows: 3,
            // 2021 rows (two firms) copied to 2022 and 2023
            backfilled_rows: 4,
            unclassified_rows: 1,
        }
    );

    let vanke_2022 = storage
        .query_records(&RecordFilter::by_firm_code("000002").year(Some(2022)))
        .unwrap();
    assert_eq!(vanke_2022.len(), 1);
    assert_eq!(vanke_2022[0].industry_code, "K70");

    let pudong_2023 = storage
        .query_records(&RecordFilter::by_firm_code("600000").year(Some(2023)))
        .unwrap();
    assert_eq!(pudong_2023[0].industry_name, "货币金融服务");
}

#[test]
fn ingest_marks_unmatched_rows_unclassified() {
    let (storage, temp_dir) = create_test_storage();
    let sources = write_sources(&temp_dir, PANEL_CSV, INDUSTRY_CSV);
    storage.ingest(&sources).unwrap();

    let rows = storage.query_records(&RecordFilter::by_firm_code("300001")).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].industry_code, UNCLASSIFIED_CODE);
    assert_eq!(rows[0].industry_name, UNCLASSIFIED_NAME);
}

#[test]
fn backfill_respects_configured_last_year() {
    let (storage, temp_dir) = create_test_storage();
    let sources = write_sources(&temp_dir, PANEL_CSV, INDUSTRY_CSV).backfill_through(2022);

    let report = storage.ingest(&sources).unwrap();

    assert_eq!(report.backfilled_rows, 2);
    let pudong_2023 = storage
        .query_records(&RecordFilter::by_firm_code("600000").year(Some(2023)))
        .unwrap();
    assert_eq!(pudong_2023[0].industry_code, UNCLASSIFIED_CODE);
}

#[test]
fn ensure_loaded_skips_populated_table() {
    let (storage, temp_dir) = create_test_storage();
    let sources = write_sources(&temp_dir, PANEL_CSV, INDUSTRY_CSV);

    assert!(storage.ensure_loaded(&sources).unwrap().is_some());

    std::fs::remove_file(&sources.panel_csv).unwrap();
    assert!(storage.ensure_loaded(&sources).unwrap().is_none());
    assert_eq!(storage.count_records(&RecordFilter::default()).unwrap(), 6);
}

#[test]
fn ensure_loaded_fails_without_sources() {
    let (storage, temp_dir) = create_test_storage();
    let sources = write_sources(&temp_dir, PANEL_CSV, INDUSTRY_CSV);
    std::fs::remove_file(&sources.industry_csv).unwrap();

    let err = storage.ensure_loaded(&sources).unwrap_err();

    assert!(matches!(err, StorageError::SourceMissing(_)));
    assert!(!storage.is_populated().unwrap());
}

#[test]
fn reingest_replaces_previous_rows() {
    let (storage, temp_dir) = create_test_storage();
    let sources = write_sources(&temp_dir, PANEL_CSV, INDUSTRY_CSV);
    storage.ingest(&sources).unwrap();
    storage.ingest(&sources).unwrap();

    assert_eq!(storage.count_records(&RecordFilter::default()).unwrap(), 6);
}
