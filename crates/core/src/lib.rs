//! Core types and rules for digidash
//!
//! This crate contains the domain types shared across all other crates, plus the
//! pure merge/backfill and aggregation logic that does not need a database.

pub mod constants;
mod env_config;
mod error;
mod filter;
mod merge;
mod record;
mod trend;

pub use constants::*;
pub use env_config::env_parse_with_default;
pub use error::*;
pub use filter::RecordFilter;
pub use merge::{backfill_classifications, merge_panel};
pub use record::{Classification, FirmYearRecord, PanelRow};
pub use trend::{rank_by_composite, reindex_years, yearly_trend, TrendPoint};
