//! HTTP request handlers for the surfsup API.
//!
//! This module contains all the endpoint handlers for the web server and
//! the router that binds them to their paths.

pub mod heartbeat;
pub mod index;
pub mod precipitation;
pub mod stations;
pub mod stats;
pub mod tobs;

use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::error::SurfsUpError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

pub use heartbeat::heartbeat_handler;
pub use index::index_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use stats::{range_stats_handler, start_stats_handler};
pub use tobs::tobs_handler;

/// Build the application router over the shared state
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(start_stats_handler))
        .route("/api/v1.0/:start/:end", get(range_stats_handler))
        .layer(CorsLayer::permissive())
        .layer(create_http_trace_layer())
        .with_state(state)
}

/// Log a failed request and turn the error into a JSON response
pub(crate) fn handle_request_error(
    error: SurfsUpError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    (
        error.status_code(),
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::Config;
    use crate::db::fixtures;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// Router over the in-memory fixture database
    pub async fn fixture_router() -> Router {
        let pool = fixtures::memory_pool().await;
        create_router(AppState::new_shared(Config::default(), pool))
    }

    /// Send a GET and return the status and the raw body
    pub async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// Send a GET and parse the body as JSON
    pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = get(router, uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }
}
