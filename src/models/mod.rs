//! Response models for the reference table API
//!
//! DTOs serialized by the health and stats endpoints.

pub mod responses;

// Re-export commonly used types
pub use responses::{HealthResponse, StatsResponse};
