//! CSV readers for the two ingestion sources.
//!
//! Columns are located by header alias rather than position, except for the
//! two index columns, which fall back to the last two panel columns when no
//! header names them.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use digidash_core::{Classification, PanelRow};
use serde_json::{Map, Value};

use crate::{Result, StorageError};

const FIRM_CODE_ALIASES: &[&str] = &["股票代码", "stock_code", "firm_code", "code"];
const FIRM_NAME_ALIASES: &[&str] = &["企业名称", "firm_name", "name"];
const YEAR_ALIASES: &[&str] = &["年份", "year"];
const COMPOSITE_ALIASES: &[&str] = &["数字化转型综合指数", "composite_index"];
const NORMALIZED_ALIASES: &[&str] = &["标准化转型指数(0-100)", "normalized_index"];

const CLASS_CODE_ALIASES: &[&str] = &["股票代码全称", "股票代码", "stock_code", "firm_code"];
const CLASS_YEAR_ALIASES: &[&str] = &["年度", "年份", "year"];
const INDUSTRY_CODE_ALIASES: &[&str] = &["行业代码", "industry_code"];
const INDUSTRY_NAME_ALIASES: &[&str] = &["行业名称", "industry_name"];

/// Panel rows plus the number of source lines that could not be used.
#[derive(Debug, Default)]
pub struct PanelRead {
    pub rows: Vec<PanelRow>,
    pub skipped: usize,
}

fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches('\u{feff}').to_lowercase()
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        let alias = alias.to_lowercase();
        headers.iter().position(|h| *h == alias)
    })
}

fn require_column(
    headers: &[String],
    aliases: &[&str],
    path: &Path,
    column: &'static str,
) -> Result<usize> {
    find_column(headers, aliases)
        .ok_or_else(|| StorageError::MissingColumn { path: path.to_path_buf(), column })
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !path.exists() {
        return Err(StorageError::SourceMissing(path.to_path_buf()));
    }
    ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|source| StorageError::SourceRead { path: path.to_path_buf(), source })
}

fn read_headers(reader: &mut csv::Reader<std::fs::File>, path: &Path) -> Result<Vec<String>> {
    let headers = reader
        .headers()
        .map_err(|source| StorageError::SourceRead { path: path.to_path_buf(), source })?;
    Ok(headers.iter().map(normalize_header).collect())
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).map_or("", str::trim)
}

/// Parses an index cell; anything non-numeric or non-finite becomes `None`.
fn parse_index(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

struct PanelColumns {
    code: usize,
    name: usize,
    year: usize,
    composite: usize,
    normalized: usize,
}

impl PanelColumns {
    fn resolve(headers: &[String], path: &Path) -> Result<Self> {
        let code = require_column(headers, FIRM_CODE_ALIASES, path, "firm code")?;
        let name = require_column(headers, FIRM_NAME_ALIASES, path, "firm name")?;
        let year = require_column(headers, YEAR_ALIASES, path, "year")?;

        let named = find_column(headers, COMPOSITE_ALIASES).zip(find_column(headers, NORMALIZED_ALIASES));
        let (composite, normalized) = match named {
            Some(pair) => pair,
            None => {
                let n = headers.len();
                let keys = [code, name, year];
                if n < 2 || keys.contains(&(n - 2)) || keys.contains(&(n - 1)) {
                    return Err(StorageError::MissingColumn {
                        path: path.to_path_buf(),
                        column: "composite/normalized index",
                    });
                }
                (n - 2, n - 1)
            },
        };

        Ok(Self { code, name, year, composite, normalized })
    }

    fn is_curated(&self, index: usize) -> bool {
        [self.code, self.name, self.year, self.composite, self.normalized].contains(&index)
    }
}

/// Reads the firm-year panel.
///
/// Malformed lines and lines whose year does not parse are skipped and
/// counted. Columns other than the five curated ones land in `extra`.
pub fn read_panel(path: &Path) -> Result<PanelRead> {
    let mut reader = open_reader(path)?;
    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(|source| StorageError::SourceRead { path: path.to_path_buf(), source })?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_owned())
        .collect();
    let headers = read_headers(&mut reader, path)?;
    let columns = PanelColumns::resolve(&headers, path)?;

    let mut read = PanelRead::default();
    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(line, error = %e, "Skipping malformed panel line");
                read.skipped = read.skipped.saturating_add(1);
                continue;
            },
        };

        let Ok(year) = digidash_core::parse_year(field(&record, columns.year)) else {
            tracing::debug!(line, "Skipping panel line with unparseable year");
            read.skipped = read.skipped.saturating_add(1);
            continue;
        };

        let mut extra = Map::new();
        for (index, value) in record.iter().enumerate() {
            if columns.is_curated(index) {
                continue;
            }
            if let Some(header) = raw_headers.get(index) {
                extra.insert(header.clone(), Value::String(value.trim().to_owned()));
            }
        }

        read.rows.push(PanelRow {
            firm_code: field(&record, columns.code).to_owned(),
            firm_name: field(&record, columns.name).to_owned(),
            year,
            composite_index: parse_index(field(&record, columns.composite)),
            normalized_index: parse_index(field(&record, columns.normalized)),
            extra,
        });
    }

    if read.skipped > 0 {
        tracing::warn!(path = %path.display(), skipped = read.skipped, "Skipped unusable panel lines");
    }
    tracing::info!(path = %path.display(), rows = read.rows.len(), "Read firm-year panel");
    Ok(read)
}

/// Reads the industry classification table. All cells are taken as text;
/// rows whose year does not parse are dropped.
pub fn read_classifications(path: &Path) -> Result<Vec<Classification>> {
    let mut reader = open_reader(path)?;
    let headers = read_headers(&mut reader, path)?;
    let code = require_column(&headers, CLASS_CODE_ALIASES, path, "firm code")?;
    let year = require_column(&headers, CLASS_YEAR_ALIASES, path, "year")?;
    let industry_code = require_column(&headers, INDUSTRY_CODE_ALIASES, path, "industry code")?;
    let industry_name = require_column(&headers, INDUSTRY_NAME_ALIASES, path, "industry name")?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let Ok(record) = result else {
            skipped = skipped.saturating_add(1);
            continue;
        };
        let Ok(parsed_year) = digidash_core::parse_year(field(&record, year)) else {
            skipped = skipped.saturating_add(1);
            continue;
        };
        rows.push(Classification::new(
            field(&record, code),
            parsed_year,
            field(&record, industry_code),
            field(&record, industry_name),
        ));
    }

    if skipped > 0 {
        tracing::warn!(path = %path.display(), skipped, "Skipped unusable classification lines");
    }
    tracing::info!(path = %path.display(), rows = rows.len(), "Read industry classifications");
    Ok(rows)
}
