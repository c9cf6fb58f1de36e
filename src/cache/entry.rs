//! Cache Entry Module
//!
//! Defines a persisted reference table row.

use serde::Serialize;

// == Cache Entry ==
/// A reference table code cached for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    /// Normalized period key, e.g. `janeiro/2024`
    pub period: String,
    /// FIPE reference table code
    pub code: u32,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry for `period`.
    pub fn new(period: impl Into<String>, code: u32) -> Self {
        Self {
            period: period.into(),
            code,
        }
    }
}
