//! HTTP route handlers for the CRM server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                                       - Banner
//! GET    /health                                 - Liveness check
//! GET    /health/ready                           - Readiness check (database)
//!
//! # Relationships
//! GET    /api/relationships/user/{user_id}       - List a user's relationships
//! GET    /api/relationships/{id}                 - Get one relationship
//! POST   /api/relationships                      - Create a relationship
//! PUT    /api/relationships/{id}                 - Replace a relationship
//! DELETE /api/relationships/{id}?userId=         - Delete a relationship
//!
//! # Preferences
//! GET    /api/preferences/colorscheme/{user_id}  - Get color scheme
//! POST   /api/preferences/colorscheme            - Save color scheme
//!
//! # Calendar
//! GET    /api/calendar?userId=                   - Follow-up events
//! ```

pub mod api;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Banner returned from the root path.
pub const BANNER: &str = "Agent Pipeline CRM Server running";

/// Build the application router with CORS and request tracing.
///
/// Sentry layers are added by the binary so tests can use this directly.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(api::router())
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

async fn index() -> &'static str {
    BANNER
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Readiness check failed: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use super::*;

    async fn get_text(uri: &str) -> (StatusCode, String) {
        let response = app(test_support::unreachable_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_banner() {
        let (status, body) = get_text("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, BANNER);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_text("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_readiness_without_database() {
        let (status, _) = get_text("/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_cors_is_permissive() {
        let response = app(test_support::unreachable_state())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = get_text("/api/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
