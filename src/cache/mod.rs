//! Cache Module
//!
//! Persistent storage of reference table codes keyed by period.

mod entry;
mod stats;
mod store;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
