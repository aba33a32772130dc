//! HTTP server for the digidash dashboard.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::shadow_reuse, reason = "Shadowing for Arc clones is idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod blocking;
mod handlers;
pub mod page_error;
mod pages;
mod query_types;

use axum::{response::Html, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use digidash_service::DashboardService;

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for thread-safe sharing across handlers.
pub struct AppState {
    /// Lookups behind every page and API route
    pub service: Arc<DashboardService>,
}

impl AppState {
    #[must_use]
    pub const fn new(service: Arc<DashboardService>) -> Self {
        Self { service }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/query", get(handlers::firm::firm_query))
        .route("/compare", get(handlers::firm::compare))
        .route("/industry", get(handlers::industry::industry))
        .route("/industry_full", get(handlers::industry::industry_full))
        .route("/industry_bar", get(handlers::industry::industry_bar))
        .route("/api/records", get(handlers::api::records))
        .route("/api/stats", get(handlers::api::stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Html<String> {
    Html(pages::home_page())
}

async fn health() -> &'static str {
    "ok"
}
