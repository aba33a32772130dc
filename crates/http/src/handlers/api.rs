use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use digidash_core::FirmYearRecord;
use digidash_storage::TableStats;

use crate::api_error::ApiError;
use crate::blocking::blocking_json;
use crate::query_types::RecordsQuery;
use crate::AppState;

pub async fn records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<Vec<FirmYearRecord>>, ApiError> {
    let filter = query.to_filter()?;
    let limit = query.capped_limit();
    let service = Arc::clone(&state.service);
    blocking_json(move || service.records(&filter, limit)).await
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<TableStats>, ApiError> {
    let service = Arc::clone(&state.service);
    blocking_json(move || service.stats()).await
}
