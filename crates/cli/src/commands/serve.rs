use anyhow::{Context as _, Result};
use digidash_http::{create_router, AppState};
use digidash_service::DashboardService;
use digidash_storage::{IngestSources, Storage};
use std::path::Path;
use std::sync::Arc;

use crate::ensure_db_dir;

pub(crate) async fn run(
    db_path: &Path,
    sources: &IngestSources,
    port: u16,
    host: String,
) -> Result<()> {
    ensure_db_dir(db_path)?;
    let storage = Arc::new(Storage::new(db_path)?);

    let startup = {
        let storage = Arc::clone(&storage);
        let sources = sources.clone();
        tokio::task::spawn_blocking(move || storage.ensure_loaded(&sources)).await?
    };
    match startup {
        Ok(Some(report)) => tracing::info!(rows = report.panel_rows, "Firm-year table ready"),
        Ok(None) => {},
        Err(e) if e.is_source_error() => {
            return Err(anyhow::Error::new(e).context(
                "cannot build the firm-year table; point --panel-csv/--industry-csv \
                 (or DIGIDASH_PANEL_CSV/DIGIDASH_INDUSTRY_CSV) at the source files",
            ));
        },
        Err(e) => return Err(e).context("failed to build the firm-year table"),
    }

    let service = Arc::new(DashboardService::new(storage));
    let state = Arc::new(AppState::new(service));

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
