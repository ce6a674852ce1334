//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use tracing::info;

use super::AppState;
use super::types::{ApiError, ClearResponse, InvalidateResponse, ReportResponse, RunQuery};
use crate::devices::{self, Device};
use crate::io::export::{DEFAULT_FILE_NAME, to_csv_string};
use crate::sim::types::{AdjustedRecord, SimConfig};

/// Unwraps the query, turning malformed values into a JSON 400.
fn run_query(query: Result<Query<RunQuery>, QueryRejection>) -> Result<RunQuery, ApiError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// `GET /devices` → 200 + the catalog in fixed order.
pub async fn get_devices() -> Json<&'static [Device]> {
    Json(devices::devices())
}

/// `GET /report` → 200 + `ReportResponse`, or 400 for out-of-range parameters.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RunQuery>, QueryRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    let out = state.run(&run_query(query)?)?;
    Ok(Json(ReportResponse::from(&out)))
}

/// Returns the adjusted series.
///
/// `GET /series` → every hour
/// `GET /series?waste_only=true` → hours above the threshold only
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RunQuery>, QueryRejection>,
) -> Result<Json<Vec<AdjustedRecord>>, ApiError> {
    let query = run_query(query)?;
    let out = state.run(&query)?;
    let records = if query.waste_only.unwrap_or(false) {
        out.waste.waste_hours().copied().collect()
    } else {
        out.waste.adjusted
    };
    Ok(Json(records))
}

/// `GET /export.csv` → the adjusted series as a CSV attachment.
pub async fn get_export(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RunQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let out = state.run(&run_query(query)?)?;
    let body = to_csv_string(out.series())?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DEFAULT_FILE_NAME}\""),
        ),
    ];
    Ok((headers, body))
}

/// Drops the cached series of one `(days, seed)` pair.
///
/// Both fall back to the server defaults; a seed is required one way or
/// the other since unseeded runs are never reused.
pub async fn invalidate_cache(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RunQuery>, QueryRejection>,
) -> Result<Json<InvalidateResponse>, ApiError> {
    let query = run_query(query)?;
    let days = query.days.unwrap_or(state.defaults.days);
    let seed = query
        .seed
        .or(state.defaults.seed)
        .ok_or_else(|| ApiError::BadRequest("`seed` is required".to_string()))?;
    let config = SimConfig::new(days, seed)?;

    let removed = state.cache()?.invalidate(config.days(), config.seed());
    info!(days, seed, removed, "Cache entry invalidated");
    Ok(Json(InvalidateResponse {
        days,
        seed,
        removed,
    }))
}

/// `DELETE /cache` → drops every cached series.
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearResponse>, ApiError> {
    let mut cache = state.cache()?;
    let cleared = cache.len();
    cache.clear();
    info!(cleared, "Cache cleared");
    Ok(Json(ClearResponse { cleared }))
}
