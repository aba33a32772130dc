use anyhow::Result;
use digidash_storage::{IngestSources, Storage};
use std::path::Path;

use crate::ensure_db_dir;

pub(crate) fn run(db_path: &Path, sources: &IngestSources, force: bool) -> Result<()> {
    ensure_db_dir(db_path)?;
    let storage = Storage::new(db_path)?;

    let report = if force {
        Some(storage.ingest(sources)?)
    } else {
        storage.ensure_loaded(sources)?
    };

    match report {
        Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
        None => println!("Table already populated; pass --force to rebuild."),
    }
    Ok(())
}
