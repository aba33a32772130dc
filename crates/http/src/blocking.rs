//! Helpers for running blocking service calls in async handlers.
//!
//! Storage queries and chart drawing are synchronous, so every handler hands
//! them to `spawn_blocking` and maps join and service errors to its response
//! error type.

use axum::{response::Html, Json};
use digidash_service::ServiceError;
use serde::Serialize;
use tokio::task::spawn_blocking;

use crate::api_error::ApiError;
use crate::page_error::PageError;

/// Runs a blocking closure producing page markup.
///
/// # Example
/// ```ignore
/// let service = Arc::clone(&state.service);
/// blocking_page(move || Ok(pages::firm_page(&service.firm_lookup(code, name, year)?))).await
/// ```
pub async fn blocking_page<F>(f: F) -> Result<Html<String>, PageError>
where
    F: FnOnce() -> Result<String, ServiceError> + Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| {
            tracing::error!("Join error: {}", e);
            PageError::Internal(e.into())
        })?
        .map(Html)
        .map_err(PageError::from)
}

/// Runs a blocking closure and wraps its value in `Json`.
pub async fn blocking_json<T, F>(f: F) -> Result<Json<T>, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static + Serialize,
{
    spawn_blocking(f)
        .await
        .map_err(|e| {
            tracing::error!("Join error: {}", e);
            ApiError::Internal(e.into())
        })?
        .map(Json)
        .map_err(ApiError::from)
}
