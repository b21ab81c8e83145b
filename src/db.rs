//! SQLite store access.
//!
//! This module opens the weather database read-only, verifies it has the
//! tables the API reads from, and summarizes its contents for startup logs
//! and the heartbeat endpoint.

use std::path::Path;

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, SurfsUpError};
use crate::state::AppState;

/// Tables and the columns the queries depend on
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("measurement", &["station", "date", "prcp", "tobs"]),
    ("station", &["station"]),
];

/// Row counts and date coverage of the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub station_count: i64,
    pub measurement_count: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

/// Open the database named in the config and create the application state
pub async fn open_database(config: Config) -> Result<AppState> {
    let pool = connect(&config.database.path, config.database.max_connections).await?;

    // Validate the schema before serving anything
    {
        let mut conn = pool.acquire().await?;
        validate_schema(&mut conn).await?;
    }

    Ok(AppState::new(config, pool))
}

/// Create a read-only connection pool over an existing SQLite file
pub async fn connect(path: &Path, max_connections: u32) -> Result<SqlitePool> {
    // Check if the file exists; SQLite would otherwise report a vague open error
    if !path.exists() {
        return Err(SurfsUpError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Database not found: {}", path.display()),
        )));
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!(
        path = %path.display(),
        max_connections = max_connections,
        "Opened database"
    );

    Ok(pool)
}

/// Check that every required table and column is present
pub async fn validate_schema(conn: &mut SqliteConnection) -> Result<()> {
    for &(table, columns) in REQUIRED_COLUMNS {
        let present: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
                .bind(table)
                .fetch_all(&mut *conn)
                .await?;

        if present.is_empty() {
            return Err(SurfsUpError::Schema {
                message: format!("Missing table: {}", table),
            });
        }

        debug!(table = table, columns = ?present, "Found table");

        for &column in columns {
            if !present.iter().any(|name| name == column) {
                return Err(SurfsUpError::Schema {
                    message: format!("Table {} has no column {}", table, column),
                });
            }
        }
    }

    Ok(())
}

/// Count rows and find the date range of the measurements
pub async fn dataset_summary(conn: &mut SqliteConnection) -> Result<DatasetSummary> {
    let station_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
        .fetch_one(&mut *conn)
        .await?;

    let (measurement_count, first_date, last_date): (i64, Option<String>, Option<String>) =
        sqlx::query_as("SELECT COUNT(*), MIN(date), MAX(date) FROM measurement")
            .fetch_one(&mut *conn)
            .await?;

    Ok(DatasetSummary {
        station_count,
        measurement_count,
        first_date,
        last_date,
    })
}
