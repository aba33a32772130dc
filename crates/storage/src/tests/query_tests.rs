use super::{create_test_record, create_test_storage};
use digidash_core::RecordFilter;

fn seeded() -> (crate::Storage, tempfile::TempDir) {
    let (storage, temp_dir) = create_test_storage();
    storage
        .replace_records(&[
            create_test_record("600000", "浦发银行", 2021, Some(("J66", "货币金融服务")), Some(4.0)),
            create_test_record("600000", "浦发银行", 2020, Some(("J66", "货币金融服务")), Some(3.0)),
            create_test_record("000002", "万科A", 2021, Some(("K70", "房地产业")), Some(1.0)),
            create_test_record("600276", "恒瑞医药", 2021, Some(("c27", "医药制造业")), None),
            create_test_record("688001", "100%_Tech", 2021, None, Some(2.0)),
        ])
        .unwrap();
    (storage, temp_dir)
}

#[test]
fn empty_filter_returns_everything_ordered() {
    let (storage, _temp_dir) = seeded();

    let rows = storage.query_records(&RecordFilter::default()).unwrap();

    let keys: Vec<_> = rows.iter().map(|r| (r.firm_code.as_str(), r.year)).collect();
    assert_eq!(
        keys,
        [("000002", 2021), ("600000", 2020), ("600000", 2021), ("600276", 2021), ("688001", 2021)]
    );
}

#[test]
fn filter_by_code_and_year() {
    let (storage, _temp_dir) = seeded();

    let rows = storage
        .query_records(&RecordFilter::by_firm_code("600000").year(Some(2020)))
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].composite_index, Some(3.0));
    assert_eq!(rows[0].normalized_index, Some(30.0));
}

#[test]
fn firm_name_is_substring_match() {
    let (storage, _temp_dir) = seeded();

    let rows = storage.query_records(&RecordFilter::default().firm_name(Some("万科"))).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].firm_code, "000002");
}

#[test]
fn wildcards_in_name_input_are_literal() {
    let (storage, _temp_dir) = seeded();

    let percent = storage.query_records(&RecordFilter::default().firm_name(Some("%"))).unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].firm_code, "688001");

    let underscore = storage.query_records(&RecordFilter::default().firm_name(Some("0_T"))).unwrap();
    assert!(underscore.is_empty());
}

#[test]
fn name_filters_are_case_sensitive() {
    let (storage, _temp_dir) = create_test_storage();
    storage
        .replace_records(&[create_test_record(
            "000100",
            "TCL Technology",
            2021,
            Some(("C39", "Electronics")),
            Some(5.0),
        )])
        .unwrap();

    let lower_name = storage.query_records(&RecordFilter::default().firm_name(Some("tcl"))).unwrap();
    assert!(lower_name.is_empty());
    let lower_industry =
        storage.query_records(&RecordFilter::default().industry_name(Some("electronics"))).unwrap();
    assert!(lower_industry.is_empty());

    let exact = storage
        .query_records(&RecordFilter::default().firm_name(Some("TCL")).industry_name(Some("Electro")))
        .unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].firm_code, "000100");
}

#[test]
fn industry_code_is_case_insensitive() {
    let (storage, _temp_dir) = seeded();

    let rows = storage.query_records(&RecordFilter::default().industry_code(Some("C27"))).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].firm_code, "600276");
    assert_eq!(rows[0].composite_index, None);
}

#[test]
fn industry_name_combines_with_year() {
    let (storage, _temp_dir) = seeded();

    let filter = RecordFilter::default().industry_name(Some("金融")).year(Some(2021));
    let rows = storage.query_records(&filter).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(storage.count_records(&filter).unwrap(), 1);
}

#[test]
fn limited_query_caps_rows() {
    let (storage, _temp_dir) = seeded();

    let rows = storage.query_records_limited(&RecordFilter::default(), Some(2)).unwrap();

    assert_eq!(rows.len(), 2);
}

#[test]
fn no_match_is_empty_not_error() {
    let (storage, _temp_dir) = seeded();

    let rows = storage.query_records(&RecordFilter::by_firm_code("999999")).unwrap();

    assert!(rows.is_empty());
}

#[test]
fn stats_summarize_table() {
    let (storage, _temp_dir) = seeded();

    let stats = storage.stats().unwrap();

    assert_eq!(stats.rows, 5);
    assert_eq!(stats.firms, 4);
    assert_eq!(stats.industries, 4);
    assert_eq!(stats.first_year, Some(2020));
    assert_eq!(stats.last_year, Some(2021));
}

#[test]
fn stats_of_empty_table() {
    let (storage, _temp_dir) = create_test_storage();

    let stats = storage.stats().unwrap();

    assert_eq!(stats.rows, 0);
    assert_eq!(stats.first_year, None);
    assert!(!storage.is_populated().unwrap());
}
