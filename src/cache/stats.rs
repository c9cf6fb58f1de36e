//! Cache Statistics Module
//!
//! Tracks lookup hits and misses, upstream fetches and failed writes.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Requests answered from the store
    pub hits: u64,
    /// Requests that found no entry for the current period
    pub misses: u64,
    /// Calls made to the upstream API
    pub upstream_fetches: u64,
    /// Inserts that failed after a successful fetch
    pub write_failures: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Fetch ==
    /// Increments the upstream fetch counter.
    pub fn record_fetch(&mut self) {
        self.upstream_fetches += 1;
    }

    // == Record Write Failure ==
    /// Increments the failed insert counter.
    pub fn record_write_failure(&mut self) {
        self.write_failures += 1;
    }
}
