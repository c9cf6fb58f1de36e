//! Response DTOs for the reference table API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Requests answered from the store
    pub hits: u64,
    /// Requests that missed the store
    pub misses: u64,
    /// Upstream API calls made
    pub upstream_fetches: u64,
    /// Failed inserts after a fetch
    pub write_failures: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Period key the service is currently answering for
    pub current_period: String,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, current_period: impl Into<String>) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            upstream_fetches: stats.upstream_fetches,
            write_failures: stats.write_failures,
            hit_rate: stats.hit_rate(),
            current_period: current_period.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
