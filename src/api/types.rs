//! API query, response, and error types.
//!
//! Series records reuse the CSV column names (`timestamp`, `total_kwh`,
//! `is_waste`, `adjusted_kwh`) plus `excess_kwh`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::error::EngineError;
use crate::sim::engine::EngineOutput;
use crate::sim::types::{ImpactEntry, PeakHourEntry};

/// Query parameters shared by every run-driven endpoint.
///
/// Missing values fall back to the scenario the server was started with.
/// `waste_only` is only read by `GET /series`.
#[derive(Debug, Default, Deserialize)]
pub struct RunQuery {
    /// Simulated days, in `[1, 30]`.
    pub days: Option<usize>,
    /// Reduction percentage, in `[0, 100]`.
    pub reduction_percent: Option<f64>,
    /// Random seed.
    pub seed: Option<u64>,
    /// Keep only waste hours in the series.
    pub waste_only: Option<bool>,
}

/// Scalar metrics plus rankings for one run.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Seed that reproduces this run.
    pub seed: u64,
    /// Simulated days.
    pub days: usize,
    /// Applied reduction percentage.
    pub reduction_percent: f64,
    /// Summed excess over the threshold (kWh).
    pub total_excess_kwh: f64,
    /// Excess removed by the policy (kWh).
    pub reduced_kwh: f64,
    /// Savings in currency units.
    pub savings_currency: f64,
    /// Avoided emissions (kg).
    pub co2_avoided_kg: f64,
    /// Number of hours above the threshold.
    pub waste_hours: usize,
    /// Devices ranked by attributed excess.
    pub by_device: Vec<ImpactEntry>,
    /// Hours of day ranked by summed excess.
    pub by_hour: Vec<PeakHourEntry>,
}

impl From<&EngineOutput> for ReportResponse {
    fn from(out: &EngineOutput) -> Self {
        let w = &out.waste;
        Self {
            seed: out.seed,
            days: out.days,
            reduction_percent: w.reduction_percent.percent(),
            total_excess_kwh: w.total_excess_kwh,
            reduced_kwh: w.reduced_kwh,
            savings_currency: w.savings_currency,
            co2_avoided_kg: w.co2_avoided_kg,
            waste_hours: w.waste_hour_count(),
            by_device: out.attribution.by_device.clone(),
            by_hour: out.attribution.by_hour.clone(),
        }
    }
}

/// Result of `POST /cache/invalidate`.
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub days: usize,
    pub seed: u64,
    /// Whether an entry was dropped.
    pub removed: bool,
}

/// Result of `DELETE /cache`.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    /// Number of dropped entries.
    pub cleared: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Errors surfaced by the request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidParameter(#[from] EngineError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("simulation cache is unavailable")]
    CachePoisoned,

    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::CachePoisoned | ApiError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Rejected request");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
