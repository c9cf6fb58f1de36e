//! Upstream Module
//!
//! Client for the FIPE reference table API.

mod client;
mod models;

pub use client::{parse_latest, FipeClient, ReferenceSource};
pub use models::UpstreamTableReference;
