//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, reference_table_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `/reference-table` - Current reference table code (GET only, checked by the handler)
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Tracing: Logs all requests
///
/// No CORS layer is installed: it would answer `OPTIONS` preflights itself,
/// and every non-GET request to `/reference-table` must get a 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reference-table", any(reference_table_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::error::Result;
    use crate::period::fixed_clock;
    use crate::service::ReferenceService;
    use crate::upstream::{ReferenceSource, UpstreamTableReference};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct FixedSource;

    #[async_trait]
    impl ReferenceSource for FixedSource {
        async fn fetch_latest(&self) -> Result<UpstreamTableReference> {
            Ok(UpstreamTableReference {
                code: 320,
                month_label: "janeiro/2024".to_string(),
            })
        }
    }

    fn create_test_app() -> Router {
        let store = CacheStore::open_in_memory().unwrap();
        let clock = fixed_clock(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let service = ReferenceService::with_clock(store, Arc::new(FixedSource), clock);
        create_router(AppState::new(service))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_reference_table_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/reference-table")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_reference_table_put_not_allowed() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/reference-table")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_reference_table_preflight_not_allowed() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/reference-table")
                    .header("origin", "https://example.com")
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
