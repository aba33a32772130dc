use anyhow::Result;
use digidash_core::{RecordFilter, MAX_QUERY_LIMIT};
use digidash_storage::Storage;
use std::path::Path;

use crate::ensure_db_dir;

pub(crate) fn run_query(db_path: &Path, filter: &RecordFilter, limit: usize) -> Result<()> {
    ensure_db_dir(db_path)?;
    let storage = Storage::new(db_path)?;
    let results = storage.query_records_limited(filter, Some(limit.min(MAX_QUERY_LIMIT)))?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

pub(crate) fn run_stats(db_path: &Path) -> Result<()> {
    ensure_db_dir(db_path)?;
    let storage = Storage::new(db_path)?;
    let stats = storage.stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
