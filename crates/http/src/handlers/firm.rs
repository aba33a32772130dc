use axum::{
    extract::{Query, State},
    response::Html,
};
use std::sync::Arc;

use crate::blocking::blocking_page;
use crate::page_error::PageError;
use crate::pages;
use crate::query_types::{CompareQuery, FirmQuery};
use crate::AppState;

pub async fn firm_query(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FirmQuery>,
) -> Result<Html<String>, PageError> {
    let service = Arc::clone(&state.service);
    blocking_page(move || {
        let view = service.firm_lookup(
            query.code.as_deref(),
            query.name.as_deref(),
            query.year.as_deref(),
        )?;
        Ok(pages::firm_page(&view))
    })
    .await
}

pub async fn compare(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompareQuery>,
) -> Result<Html<String>, PageError> {
    let service = Arc::clone(&state.service);
    blocking_page(move || {
        let view = service.compare_firms(query.code1.as_deref(), query.code2.as_deref())?;
        Ok(pages::comparison_page(&view))
    })
    .await
}
