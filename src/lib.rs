//! FIPE Reference - current reference table code service
//!
//! Caches the FIPE reference table code per month in SQLite and fetches it
//! from the FIPE API when the current month is missing.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod period;
pub mod service;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{ReferenceError, Result};
pub use service::{ReferenceService, Resolution};
