//! FIPE API client
//!
//! Fetches the list of reference tables and picks the latest one.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::debug;

use super::UpstreamTableReference;
use crate::error::{ReferenceError, Result};

/// Anything able to report the latest reference table.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Fetches the most recent reference table.
    async fn fetch_latest(&self) -> Result<UpstreamTableReference>;
}

/// Parses an upstream body and returns its first record.
///
/// The API lists tables newest first.
pub fn parse_latest(body: &[u8]) -> Result<UpstreamTableReference> {
    let records: Vec<UpstreamTableReference> = serde_json::from_slice(body)?;
    records
        .into_iter()
        .next()
        .ok_or(ReferenceError::EmptyUpstreamResponse)
}

/// Client for the FIPE `ConsultarTabelaDeReferencia` endpoint.
#[derive(Debug, Clone)]
pub struct FipeClient {
    client: Client,
    url: String,
}

impl FipeClient {
    /// Create a new FipeClient targeting `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Create a new FipeClient with a custom HTTP client
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint this client posts to
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReferenceSource for FipeClient {
    async fn fetch_latest(&self) -> Result<UpstreamTableReference> {
        debug!("POST {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?
            .error_for_status()?;

        // `bytes` consumes the response, releasing the connection on every path.
        let body = response.bytes().await?;
        parse_latest(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_latest_takes_first_record() {
        let body = br#"[{"Codigo": 320, "Mes": "janeiro/2024 "}, {"Codigo": 319, "Mes": "dezembro/2023 "}]"#;
        let latest = parse_latest(body).unwrap();
        assert_eq!(latest.code, 320);
        assert_eq!(latest.period(), "janeiro/2024");
    }

    #[test]
    fn test_parse_latest_empty_array() {
        let result = parse_latest(b"[]");
        assert!(matches!(result, Err(ReferenceError::EmptyUpstreamResponse)));
    }

    #[test]
    fn test_parse_latest_malformed_body() {
        let result = parse_latest(b"<html>Service Unavailable</html>");
        assert!(matches!(result, Err(ReferenceError::Parse(_))));
    }

    #[test]
    fn test_parse_latest_wrong_shape() {
        let result = parse_latest(br#"{"Codigo": 320, "Mes": "janeiro/2024"}"#);
        assert!(matches!(result, Err(ReferenceError::Parse(_))));
    }

    #[test]
    fn test_client_keeps_url() {
        let client = FipeClient::new("http://localhost:9/tables");
        assert_eq!(client.url(), "http://localhost:9/tables");
    }
}
