//! REST API over the waste engine.
//!
//! Endpoints:
//! - `GET /devices`: the device catalog
//! - `GET /report`: scalar metrics and rankings for one run
//! - `GET /series`: the adjusted hourly series (`waste_only` filter)
//! - `GET /export.csv`: the adjusted series as a CSV download
//! - `POST /cache/invalidate`: drop one `(days, seed)` entry
//! - `DELETE /cache`: drop every cached series
//!
//! Run endpoints accept `days`, `reduction_percent` and `seed`; missing
//! values come from the scenario the server was started with.

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::routing::{delete, get, post};
use tracing::{debug, info};

use crate::cache::SimulationCache;
use crate::config::{ScenarioConfig, SimulationConfig};
use crate::sim::engine::{self, EngineOutput, RunParams};

pub use types::{ApiError, ErrorResponse, RunQuery};

/// State shared across request handlers.
///
/// Simulations run per request with their own random source; only the
/// series cache is shared, behind a mutex.
pub struct AppState {
    /// Fallback run parameters.
    pub defaults: SimulationConfig,
    cache: Mutex<SimulationCache>,
}

impl AppState {
    /// Builds state from a loaded scenario.
    pub fn new(scenario: &ScenarioConfig) -> Self {
        Self {
            defaults: scenario.simulation.clone(),
            cache: Mutex::new(SimulationCache::new(scenario.cache.capacity)),
        }
    }

    /// Fills unset query fields from the defaults and validates them.
    fn params(&self, query: &RunQuery) -> Result<RunParams, ApiError> {
        let days = query.days.unwrap_or(self.defaults.days);
        let reduction = query
            .reduction_percent
            .unwrap_or(self.defaults.reduction_percent);
        let seed = query.seed.or(self.defaults.seed);
        Ok(RunParams::new(days, reduction, seed)?)
    }

    fn cache(&self) -> Result<MutexGuard<'_, SimulationCache>, ApiError> {
        self.cache.lock().map_err(|_| ApiError::CachePoisoned)
    }

    /// Evaluates a run, simulating only on a cache miss.
    ///
    /// The cache lock is not held while simulating, so concurrent misses
    /// run in parallel; the last one to finish wins the slot.
    fn run(&self, query: &RunQuery) -> Result<EngineOutput, ApiError> {
        let params = self.params(query)?;
        let config = params.sim_config()?;
        let cached = self.cache()?.get(config.days(), config.seed());
        let series = match cached {
            Some(series) => series,
            None => {
                debug!(days = config.days(), seed = config.seed(), "Cache miss");
                let series = Arc::new(engine::simulate(&config));
                self.cache()?.insert(Arc::clone(&series));
                series
            }
        };
        Ok(engine::evaluate(&series, params.reduction))
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/devices", get(handlers::get_devices))
        .route("/report", get(handlers::get_report))
        .route("/series", get(handlers::get_series))
        .route("/export.csv", get(handlers::get_export))
        .route("/cache/invalidate", post(handlers::invalidate_cache))
        .route("/cache", delete(handlers::clear_cache))
        .with_state(state)
}

/// Binds to `addr` and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::sim::types::ReductionPercent;

    fn query(days: usize, seed: u64) -> RunQuery {
        RunQuery {
            days: Some(days),
            seed: Some(seed),
            ..RunQuery::default()
        }
    }

    #[test]
    fn concurrent_misses_store_one_series() {
        let state = AppState::new(&ScenarioConfig::baseline());
        let outputs: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| state.run(&query(3, 11))))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let first = outputs[0].as_ref().unwrap();
        for out in &outputs {
            assert_eq!(out.as_ref().unwrap(), first);
        }
        assert_eq!(state.cache().unwrap().len(), 1);
    }

    #[test]
    fn lookup_uses_a_previously_stored_series() {
        let state = AppState::new(&ScenarioConfig::baseline());
        let config = RunParams::new(2, 0.0, Some(5))
            .and_then(|p| p.sim_config())
            .unwrap();
        let stored = Arc::new(engine::simulate(&config));
        state.cache().unwrap().insert(Arc::clone(&stored));

        let reduction = ReductionPercent::new(state.defaults.reduction_percent).unwrap();
        let out = state.run(&query(2, 5)).unwrap();
        assert_eq!(out, engine::evaluate(&stored, reduction));
        assert_eq!(state.cache().unwrap().len(), 1);
    }
}
