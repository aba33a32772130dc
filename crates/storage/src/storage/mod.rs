//! `SQLite` storage implementation
//!
//! All methods are synchronous; async callers wrap them in `spawn_blocking`.

// SQLite uses i64 for counts/limits, Rust uses usize - safe conversions within DB context
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]

mod ingest;
mod records;

use digidash_core::{env_parse_with_default, FirmYearRecord};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;

use crate::migrations;
use crate::Result;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn> {
    Ok(pool.get()?)
}

/// Parse JSON from string, converting error to rusqlite error
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(s: &str) -> rusqlite::Result<T> {
    serde_json::from_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Log row read errors and filter them out
pub(crate) fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

/// Column list shared by every record query, in `map_record` order.
pub(crate) const RECORD_COLUMNS: &str = "firm_code, firm_name, year, industry_code, industry_name, \
     composite_index, normalized_index, extra";

/// Map database row to `FirmYearRecord` (columns as in `RECORD_COLUMNS`)
pub(crate) fn map_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<FirmYearRecord> {
    Ok(FirmYearRecord {
        firm_code: row.get(0)?,
        firm_name: row.get(1)?,
        year: row.get(2)?,
        industry_code: row.get(3)?,
        industry_name: row.get(4)?,
        composite_index: row.get(5)?,
        normalized_index: row.get(6)?,
        extra: parse_json(&row.get::<_, String>(7)?)?,
    })
}

/// Connection initializer for concurrency settings
fn init_connection(conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

fn db_pool_size() -> u32 {
    env_parse_with_default("DIGIDASH_DB_POOL_SIZE", 4u32).max(1)
}

impl Storage {
    /// Create new storage instance with `SQLite` connection pool.
    ///
    /// Creates the database file and schema if they do not exist yet.
    pub fn new(db_path: &Path) -> Result<Self> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

        let pool_size = db_pool_size();
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        let conn = pool.get()?;
        migrations::run_migrations(&conn)?;
        drop(conn);

        tracing::info!(pool_size, path = %db_path.display(), "Storage initialized with connection pool");

        Ok(Self { pool })
    }
}
