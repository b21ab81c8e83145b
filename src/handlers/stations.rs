//! Stations endpoint handler.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use super::handle_request_error;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::query::station_codes;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/stations";

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing stations request"
    );

    match load_stations(&state).await {
        Ok(codes) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                station_count = codes.len(),
                "Stations request successful"
            );
            Json(codes).into_response()
        }
        Err(error) => handle_request_error(error, ENDPOINT, &request_id, None),
    }
}

async fn load_stations(state: &AppState) -> Result<Vec<String>> {
    let mut conn = state.acquire().await?;
    station_codes(&mut conn).await
}
