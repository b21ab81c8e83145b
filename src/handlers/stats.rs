//! Date-range temperature statistics handlers.
//!
//! `/api/v1.0/:start` and `/api/v1.0/:start/:end` return `[min, max, avg]` of
//! `tobs` over every station. Dates in the path are `MMDDYYYY`; both bounds
//! are inclusive and an empty range yields `[null, null, null]`.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use super::handle_request_error;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::query::{temperature_stats, DateFilter, TemperatureStats};
use crate::state::AppState;

/// Handle GET /api/v1.0/:start requests
pub async fn start_stats_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Response {
    stats_response(&state, "/api/v1.0/:start", &start, None).await
}

/// Handle GET /api/v1.0/:start/:end requests
pub async fn range_stats_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    stats_response(&state, "/api/v1.0/:start/:end", &start, Some(&end)).await
}

async fn stats_response(
    state: &AppState,
    endpoint: &str,
    start: &str,
    end: Option<&str>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        start = start,
        end = end.unwrap_or("none"),
        "Processing temperature stats request"
    );

    match load_stats(state, start, end).await {
        Ok(stats) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                empty = stats.min.is_none(),
                "Temperature stats request successful"
            );
            Json(stats.to_array()).into_response()
        }
        Err(error) => handle_request_error(
            error,
            endpoint,
            &request_id,
            Some(format!("start={}, end={}", start, end.unwrap_or("none")).as_str()),
        ),
    }
}

async fn load_stats(state: &AppState, start: &str, end: Option<&str>) -> Result<TemperatureStats> {
    // Reject bad dates before touching the pool
    let filter = DateFilter::from_path(start, end)?;
    let mut conn = state.acquire().await?;
    temperature_stats(&mut conn, &filter).await
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_open_ended_stats_ignore_station() {
        let router = fixture_router().await;
        let (status, json) = get_json(router, "/api/v1.0/08232017").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([76.0, 82.0, 79.0]));
    }

    #[tokio::test]
    async fn test_closed_range_is_inclusive() {
        let router = fixture_router().await;
        let (status, json) = get_json(router, "/api/v1.0/08232016/08242016").await;

        assert_eq!(status, StatusCode::OK);
        // 77, 81, 76, 77 on 2016-08-23 and 2016-08-24
        assert_eq!(json, json!([76.0, 81.0, 77.75]));
    }

    #[tokio::test]
    async fn test_end_before_start_is_empty() {
        let router = fixture_router().await;
        let (status, json) = get_json(router, "/api/v1.0/08232017/08232016").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([null, null, null]));
    }

    #[tokio::test]
    async fn test_no_rows_after_start() {
        let router = fixture_router().await;
        let (status, json) = get_json(router, "/api/v1.0/01012020").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([null, null, null]));
    }

    #[tokio::test]
    async fn test_malformed_dates_are_bad_requests() {
        for uri in [
            "/api/v1.0/2016-08-23",
            "/api/v1.0/13452016",
            "/api/v1.0/08232016/tomorrow",
        ] {
            let router = fixture_router().await;
            let (status, json) = get_json(router, uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "for {}", uri);
            assert!(json["error"].as_str().unwrap().contains("Invalid date"));
            assert!(json["request_id"].is_string());
        }
    }
}
