//! Integration Tests for the FIPE client
//!
//! Runs `FipeClient` against a local Axum server standing in for the FIPE API.

use axum::{
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use fipe_reference::{
    upstream::{FipeClient, ReferenceSource},
    ReferenceError,
};

// == Helper Functions ==

/// Serves `router` on an ephemeral port and returns its base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn fixed_body(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        "/api/veiculos/ConsultarTabelaDeReferencia",
        post(move || async move { (status, body) }),
    )
}

fn endpoint(base: &str) -> String {
    format!("{}/api/veiculos/ConsultarTabelaDeReferencia", base)
}

// == Tests ==

#[tokio::test]
async fn test_fetch_latest_returns_first_record() {
    let base = spawn_upstream(fixed_body(
        StatusCode::OK,
        r#"[{"Codigo": 320, "Mes": "janeiro/2024 "}, {"Codigo": 319, "Mes": "dezembro/2023 "}]"#,
    ))
    .await;
    let client = FipeClient::new(endpoint(&base));

    let latest = client.fetch_latest().await.unwrap();

    assert_eq!(latest.code, 320);
    assert_eq!(latest.period(), "janeiro/2024");
}

#[tokio::test]
async fn test_fetch_latest_sends_json_content_type() {
    let router = Router::new().route(
        "/api/veiculos/ConsultarTabelaDeReferencia",
        post(|headers: HeaderMap, body: String| async move {
            let is_json = headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                == Some("application/json");
            if is_json && body.is_empty() {
                (StatusCode::OK, r#"[{"Codigo": 1, "Mes": "janeiro/2024"}]"#)
            } else {
                (StatusCode::BAD_REQUEST, "unexpected request")
            }
        }),
    );
    let base = spawn_upstream(router).await;
    let client = FipeClient::new(endpoint(&base));

    let latest = client.fetch_latest().await.unwrap();
    assert_eq!(latest.code, 1);
}

#[tokio::test]
async fn test_fetch_latest_empty_array() {
    let base = spawn_upstream(fixed_body(StatusCode::OK, "[]")).await;
    let client = FipeClient::new(endpoint(&base));

    let result = client.fetch_latest().await;
    assert!(matches!(result, Err(ReferenceError::EmptyUpstreamResponse)));
}

#[tokio::test]
async fn test_fetch_latest_malformed_body() {
    let base = spawn_upstream(fixed_body(StatusCode::OK, "not json at all")).await;
    let client = FipeClient::new(endpoint(&base));

    let result = client.fetch_latest().await;
    assert!(matches!(result, Err(ReferenceError::Parse(_))));
}

#[tokio::test]
async fn test_fetch_latest_upstream_error_status() {
    let base = spawn_upstream(fixed_body(StatusCode::SERVICE_UNAVAILABLE, "down")).await;
    let client = FipeClient::new(endpoint(&base));

    let result = client.fetch_latest().await;
    assert!(matches!(result, Err(ReferenceError::Transport(_))));
}

#[tokio::test]
async fn test_fetch_latest_connection_refused() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = FipeClient::new(endpoint(&format!("http://{}", addr)));

    let result = client.fetch_latest().await;
    assert!(matches!(result, Err(ReferenceError::Transport(_))));
}
