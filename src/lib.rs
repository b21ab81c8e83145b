//! # surfsup
//!
//! A small read-only JSON API over the Hawaii weather observation dataset.
//!
//! The server reads two tables from an existing SQLite database, `station`
//! and `measurement`, and exposes them through a handful of GET endpoints.
//!
//! ## Endpoints
//!
//! - `/api/v1.0/precipitation`: last year of precipitation keyed by date
//! - `/api/v1.0/stations`: every station code
//! - `/api/v1.0/tobs`: last year of temperatures for the most active station
//! - `/api/v1.0/<start>[/<end>]`: `[min, max, avg]` temperature over a date range
//!
//! ## Architecture
//!
//! - **Data Layer**: a read-only `sqlx` pool; each request checks out its own connection
//! - **Query Layer**: date filters and one SQL statement per endpoint
//! - **API Layer**: `axum` handlers that serialize query results as JSON

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod query;
pub mod state;

pub use config::Config;
pub use error::{Result, SurfsUpError};
pub use handlers::create_router;
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats, log_error,
    log_operation_end, log_operation_start, log_request_error,
};
pub use query::{DateFilter, TemperatureStats};
pub use state::AppState;
