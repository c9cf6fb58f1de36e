//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Default upstream endpoint listing FIPE reference tables.
pub const DEFAULT_FIPE_API_URL: &str =
    "https://veiculos.fipe.org.br/api/veiculos/ConsultarTabelaDeReferencia";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Path of the SQLite cache database
    pub database_path: String,
    /// Upstream reference table endpoint
    pub fipe_api_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `DATABASE_PATH` - SQLite file path (default: fipe.db)
    /// - `FIPE_API_URL` - Upstream endpoint (default: the public FIPE API)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.database_path),
            fipe_api_url: env::var("FIPE_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.fipe_api_url),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            database_path: "fipe.db".to_string(),
            fipe_api_url: DEFAULT_FIPE_API_URL.to_string(),
        }
    }
}
