//! Application state management for surfsup.
//!
//! This module defines the shared state that is passed to all handlers:
//! the configuration and the connection pool over the weather database.

use std::sync::Arc;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqlitePool};

use crate::config::Config;
use crate::error::Result;
use crate::query::DateFilter;

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Pool of read-only connections
    pub pool: SqlitePool,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, pool: SqlitePool) -> Arc<Self> {
        Arc::new(Self::new(config, pool))
    }

    /// Check out a connection for the duration of one request.
    ///
    /// The connection goes back to the pool when the guard is dropped.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Filter for the last-year endpoints
    pub fn last_year(&self) -> DateFilter {
        DateFilter::last_year(self.config.database.reference_date)
    }

    /// Station served by the temperature observation endpoint
    pub fn tobs_station(&self) -> &str {
        &self.config.database.tobs_station
    }
}
