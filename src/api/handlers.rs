//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::sync::Arc;

use axum::{extract::State, http::Method, Json};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, StatsResponse};
use crate::service::ReferenceService;
use crate::upstream::{FipeClient, ReferenceSource};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Cache-or-fetch controller
    pub service: ReferenceService,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(service: ReferenceService) -> Self {
        Self { service }
    }

    /// Creates a new AppState from configuration and an opened store.
    ///
    /// Upstream calls go to the configured FIPE endpoint.
    pub fn from_config(config: &Config, store: CacheStore) -> Self {
        let source: Arc<dyn ReferenceSource> = Arc::new(FipeClient::new(&config.fipe_api_url));
        Self::new(ReferenceService::new(store, source))
    }
}

/// Handler for /reference-table
///
/// Returns the current reference table code as a bare JSON integer.
pub async fn reference_table_handler(
    State(state): State<AppState>,
    method: Method,
) -> Result<Json<u32>> {
    let resolution = state.service.resolve(&method).await?;
    Ok(Json(resolution.code()))
}

/// Handler for GET /stats
///
/// Returns cache hit/miss counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.service.stats().await;
    Json(StatsResponse::new(&stats, state.service.current_period()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
