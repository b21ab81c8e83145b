//! Print what a weather database contains: tables, columns, row counts,
//! the measurement date range and the station list.
//!
//! Useful for checking that the configured reference date still matches the
//! last observation in the data.

use std::path::PathBuf;

use anyhow::{bail, Context};
use sqlx::Row;

use surfsup::db::{connect, dataset_summary};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Resources/hawaii.sqlite"));

    println!("Inspecting database: {}", path.display());

    let pool = connect(&path, 1)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut conn = pool.acquire().await?;

    println!("\n=== TABLES ===");
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    )
    .fetch_all(&mut *conn)
    .await?;

    if tables.is_empty() {
        bail!("{} contains no tables", path.display());
    }

    for table in &tables {
        let columns = sqlx::query("SELECT name, type FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(&mut *conn)
            .await?;
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM \"{}\"", table))
            .fetch_one(&mut *conn)
            .await?;

        println!("\n{} ({} rows)", table, count);
        for column in columns {
            let name: String = column.try_get("name")?;
            let decl: String = column.try_get("type")?;
            println!("  {} {}", name, decl);
        }
    }

    let summary = dataset_summary(&mut conn)
        .await
        .context("Database is missing the station or measurement table")?;

    println!("\n=== MEASUREMENTS ===");
    println!("  rows:       {}", summary.measurement_count);
    println!("  first date: {}", summary.first_date.as_deref().unwrap_or("-"));
    println!("  last date:  {}", summary.last_date.as_deref().unwrap_or("-"));

    println!("\n=== STATIONS ({}) ===", summary.station_count);
    let stations = sqlx::query(
        "SELECT s.station, s.name, COUNT(m.station) AS readings \
         FROM station s LEFT JOIN measurement m ON m.station = s.station \
         GROUP BY s.station, s.name ORDER BY readings DESC",
    )
    .fetch_all(&mut *conn)
    .await?;

    for row in stations {
        let code: String = row.try_get("station")?;
        let name: Option<String> = row.try_get("name")?;
        let readings: i64 = row.try_get("readings")?;
        println!("  {} {:>6} readings  {}", code, readings, name.unwrap_or_default());
    }

    Ok(())
}
