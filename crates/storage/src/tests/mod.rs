//! Test utilities and module declarations for storage tests.

use crate::{IngestSources, Storage};
use digidash_core::{FirmYearRecord, UNCLASSIFIED_CODE, UNCLASSIFIED_NAME};
use serde_json::Map;
use std::path::PathBuf;
use tempfile::TempDir;

mod ingest_tests;
mod query_tests;

pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn create_test_record(
    code: &str,
    name: &str,
    year: i32,
    industry: Option<(&str, &str)>,
    composite: Option<f64>,
) -> FirmYearRecord {
    let (industry_code, industry_name) = industry.unwrap_or((UNCLASSIFIED_CODE, UNCLASSIFIED_NAME));
    FirmYearRecord {
        firm_code: code.to_owned(),
        firm_name: name.to_owned(),
        year,
        industry_code: industry_code.to_owned(),
        industry_name: industry_name.to_owned(),
        composite_index: composite,
        normalized_index: composite.map(|v| v * 10.0),
        extra: Map::new(),
    }
}

/// Writes the two source CSVs into `dir` and returns sources pointing at them.
pub fn write_sources(dir: &TempDir, panel: &str, industry: &str) -> IngestSources {
    let panel_path: PathBuf = dir.path().join("panel.csv");
    let industry_path: PathBuf = dir.path().join("industry.csv");
    std::fs::write(&panel_path, panel).unwrap();
    std::fs::write(&industry_path, industry).unwrap();
    IngestSources::new(panel_path, industry_path)
}

pub const PANEL_CSV: &str = "\
股票代码,企业名称,年份,数字化转型综合指数,标准化转型指数(0-100)
600000,浦发银行,2020,3.5,40.0
600000,浦发银行,2021,4.5,50.0
600000,浦发银行,2023,5.5,60.0
000002,万科A,2021,1.0,10.0
000002,万科A,2022,2.0,20.0
000002,万科A,bad,2.0,20.0
300001,特锐德,2019,0.5,5.0
";

pub const INDUSTRY_CSV: &str = "\
股票代码全称,年度,行业代码,行业名称
600000,2020,J66,货币金融服务
600000,2021,J66,货币金融服务
000002,2021,K70,房地产业
";
