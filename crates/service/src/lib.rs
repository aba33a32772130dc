//! Service layer for digidash
//!
//! Centralizes input validation, query composition and chart selection
//! between HTTP handlers and storage.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod dashboard_service;
mod error;
mod views;

pub use dashboard_service::DashboardService;
pub use error::ServiceError;
pub use views::{ComparisonView, FirmView, IndustryMembersView, IndustryView, RankingView, TrendView};
