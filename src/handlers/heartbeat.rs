//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime, memory usage, and dataset information.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::warn;
use uuid::Uuid;

use crate::db::{dataset_summary, DatasetSummary};
use crate::error::Result;
use crate::state::AppState;

/// Identifier for this server process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Process memory usage in bytes
    pub memory_usage_bytes: Option<u64>,
    /// Dataset information
    pub dataset: DatasetInfo,
    /// "healthy", or "degraded" when the database cannot be queried
    pub status: String,
}

/// Dataset information structure
#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    /// Database file path
    pub database_path: String,
    /// Reference date for the last-year endpoints
    pub reference_date: String,
    /// Row counts and date coverage, absent if the store is unreachable
    #[serde(flatten)]
    pub summary: Option<DatasetSummary>,
}

/// Mark the process start; call once at startup so uptime is measured from there
pub fn mark_start() {
    once_cell::sync::Lazy::force(&START_TIME);
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    let summary = match load_summary(&state).await {
        Ok(summary) => Some(summary),
        Err(error) => {
            warn!(error = %error, endpoint = "/heartbeat", "Dataset unavailable");
            None
        }
    };
    let status = if summary.is_some() { "healthy" } else { "degraded" };

    let dataset = DatasetInfo {
        database_path: state.config.database.path.display().to_string(),
        reference_date: state.config.database.reference_date.to_string(),
        summary,
    };

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        memory_usage_bytes: get_memory_usage(),
        dataset,
        status: status.to_string(),
    })
}

async fn load_summary(state: &AppState) -> Result<DatasetSummary> {
    let mut conn = state.acquire().await?;
    dataset_summary(&mut conn).await
}

/// Get current process memory usage (platform-dependent)
fn get_memory_usage() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        // RSS is the second field of /proc/self/statm, in pages
        let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
        let pages = statm.split_whitespace().nth(1)?.parse::<u64>().ok()?;
        Some(pages * 4096)
    }

    #[cfg(target_os = "macos")]
    {
        let output = std::process::Command::new("ps")
            .args(["-o", "rss=", "-p", &std::process::id().to_string()])
            .output()
            .ok()?;
        let rss_kb = String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse::<u64>()
            .ok()?;
        Some(rss_kb * 1024)
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}
