//! Precipitation endpoint handler.
//!
//! Returns the last year of precipitation readings as a date-keyed JSON object.

use std::collections::BTreeMap;
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
use crate::query::{precipitation_by_date, precipitation_rows};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing precipitation request"
    );

    match load_precipitation(&state).await {
        Ok(by_date) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                date_count = by_date.len(),
                "Precipitation request successful"
            );
            Json(by_date).into_response()
        }
        Err(error) => handle_request_error(error, ENDPOINT, &request_id, None),
    }
}

async fn load_precipitation(state: &AppState) -> Result<BTreeMap<String, Option<f64>>> {
    let filter = state.last_year();
    let mut conn = state.acquire().await?;
    let rows = precipitation_rows(&mut conn, &filter).await?;
    Ok(precipitation_by_date(rows))
}
