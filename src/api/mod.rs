//! API Module
//!
//! HTTP handlers and routing for the reference table service.
//!
//! # Endpoints
//! - `GET /reference-table` - Current FIPE reference table code
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
