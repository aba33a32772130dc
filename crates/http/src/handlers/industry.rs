use axum::{
    extract::{Query, State},
    response::Html,
};
use std::sync::Arc;

use digidash_service::IndustryView;

use crate::blocking::blocking_page;
use crate::page_error::PageError;
use crate::pages;
use crate::query_types::{IndustryBarQuery, IndustryQuery};
use crate::AppState;

pub async fn industry(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndustryQuery>,
) -> Result<Html<String>, PageError> {
    let service = Arc::clone(&state.service);
    blocking_page(move || {
        let view = service.industry_lookup(
            query.ind_code.as_deref(),
            query.ind_name.as_deref(),
            query.year.as_deref(),
        )?;
        Ok(match view {
            IndustryView::Ranking(ranking) => pages::ranking_page(&ranking, Some(&query)),
            IndustryView::Trend(trend) => pages::industry_trend_page(&trend),
        })
    })
    .await
}

pub async fn industry_full(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndustryQuery>,
) -> Result<Html<String>, PageError> {
    let service = Arc::clone(&state.service);
    blocking_page(move || {
        let view = service.industry_members(
            query.ind_code.as_deref(),
            query.ind_name.as_deref(),
            query.year.as_deref(),
        )?;
        Ok(pages::members_page(&view))
    })
    .await
}

pub async fn industry_bar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndustryBarQuery>,
) -> Result<Html<String>, PageError> {
    let service = Arc::clone(&state.service);
    blocking_page(move || {
        let view = service.industry_chart_for_firm(query.code.as_deref(), query.year.as_deref())?;
        Ok(pages::ranking_page(&view, None))
    })
    .await
}
