//! Temperature observation endpoint handler.
//!
//! Returns the last year of readings for the configured station as one flat
//! array of alternating dates and temperatures: `[date, tobs, date, tobs, ...]`.
//! Clients depend on this interleaved layout, so it must not become a list of
//! pairs.

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
use crate::query::{flatten_observations, temperature_observations};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        station = state.tobs_station(),
        "Processing temperature observation request"
    );

    match load_observations(&state).await {
        Ok(flat) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                observation_count = flat.len() / 2,
                "Temperature observation request successful"
            );
            Json(flat).into_response()
        }
        Err(error) => handle_request_error(
            error,
            ENDPOINT,
            &request_id,
            Some(format!("station={}", state.tobs_station()).as_str()),
        ),
    }
}

async fn load_observations(state: &AppState) -> Result<Vec<serde_json::Value>> {
    let filter = state.last_year();
    let mut conn = state.acquire().await?;
    let rows = temperature_observations(&mut conn, state.tobs_station(), &filter).await?;
    Ok(flatten_observations(&rows))
}
