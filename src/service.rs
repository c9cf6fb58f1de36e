//! Reference Service
//!
//! Answers "what is the current reference table code" from the cache, falling
//! back to the upstream API on a miss and persisting what it fetched.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::Method;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{ReferenceError, Result};
use crate::period::{period_key, system_clock, Clock};
use crate::upstream::ReferenceSource;

/// Where a resolved code came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Found in the store for the current period
    Cached(u32),
    /// Fetched from upstream after a miss
    Fetched(u32),
}

impl Resolution {
    // == Code ==
    /// The resolved reference table code, wherever it came from.
    pub fn code(&self) -> u32 {
        match self {
            Resolution::Cached(code) | Resolution::Fetched(code) => *code,
        }
    }
}

/// Per-period gates serializing concurrent misses.
type Gates = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// Cache-or-fetch controller shared by all request handlers.
#[derive(Clone)]
pub struct ReferenceService {
    store: CacheStore,
    source: Arc<dyn ReferenceSource>,
    clock: Clock,
    stats: Arc<RwLock<CacheStats>>,
    gates: Gates,
}

impl ReferenceService {
    /// Creates a service reading the period from the system clock.
    pub fn new(store: CacheStore, source: Arc<dyn ReferenceSource>) -> Self {
        Self::with_clock(store, source, system_clock())
    }

    /// Creates a service with an explicit clock.
    pub fn with_clock(store: CacheStore, source: Arc<dyn ReferenceSource>, clock: Clock) -> Self {
        Self {
            store,
            source,
            clock,
            stats: Arc::new(RwLock::new(CacheStats::new())),
            gates: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The store backing this service.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Key of the period the clock currently falls in.
    pub fn current_period(&self) -> String {
        period_key(&(self.clock)())
    }

    /// Snapshot of the hit/miss counters.
    pub async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }

    /// Resolves the current code for a request made with `method`.
    ///
    /// Only GET is accepted; anything else is rejected before the store or
    /// upstream is touched.
    pub async fn resolve(&self, method: &Method) -> Result<Resolution> {
        if *method != Method::GET {
            return Err(ReferenceError::MethodNotAllowed(method.to_string()));
        }
        self.current_code().await
    }

    /// Returns the code for the current period, fetching it on a miss.
    pub async fn current_code(&self) -> Result<Resolution> {
        let period = self.current_period();

        if let Some(code) = self.store.lookup(&period).await? {
            info!("Current month {} was found on cache", period);
            self.stats.write().await.record_hit();
            return Ok(Resolution::Cached(code));
        }

        let gate = self.gate(&period);
        let result = {
            let _guard = gate.lock().await;
            self.fetch_and_store(&period).await
        };
        drop(gate);
        self.release_gate(&period);

        result
    }

    async fn fetch_and_store(&self, period: &str) -> Result<Resolution> {
        // Another request may have filled the period while we waited.
        if let Some(code) = self.store.lookup(period).await? {
            debug!("Current month {} was cached by a concurrent request", period);
            self.stats.write().await.record_hit();
            return Ok(Resolution::Cached(code));
        }

        info!("Current month {} not found on cache, fetching...", period);
        {
            let mut stats = self.stats.write().await;
            stats.record_miss();
            stats.record_fetch();
        }
        let latest = self.source.fetch_latest().await?;

        let fetched_period = latest.period();
        if fetched_period != period {
            warn!(
                "Upstream latest table is for {}, current month is {}",
                fetched_period, period
            );
        }

        match self.store.insert(&fetched_period, latest.code).await {
            Ok(true) => info!("Inserted into database {} {}", latest.code, fetched_period),
            Ok(false) => debug!("Month {} already stored, insert ignored", fetched_period),
            Err(e) => {
                error!("Failed to insert into database: {}", e);
                self.stats.write().await.record_write_failure();
            }
        }

        Ok(Resolution::Fetched(latest.code))
    }

    fn gate(&self, period: &str) -> Arc<AsyncMutex<()>> {
        let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(gates.entry(period.to_string()).or_default())
    }

    fn release_gate(&self, period: &str) {
        let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        if gates
            .get(period)
            .is_some_and(|gate| Arc::strong_count(gate) == 1)
        {
            gates.remove(period);
        }
    }
}

impl std::fmt::Debug for ReferenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
