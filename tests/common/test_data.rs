//! Test data generation utilities.
//!
//! This module writes a SQLite database shaped like the Hawaii dataset, with
//! a deterministic pattern of readings, so tests can recompute every expected
//! answer from the same rows.

use chrono::{NaiveDate, TimeDelta};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::path::Path;

/// Stations in insertion order; the last one never reports
pub const STATIONS: &[(&str, &str)] = &[
    ("USC00519397", "WAIKIKI 717.2, HI US"),
    ("USC00519281", "WAIHEE 837.5, HI US"),
    ("USC00513117", "KANEOHE 838.1, HI US"),
    ("USC00518838", "UPPER WAHIAWA 874.3, HI US"),
];

/// Stations that have measurements
const REPORTING: usize = 3;

/// One generated measurement row
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station: &'static str,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

pub fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 7, 1).unwrap()
}

pub fn last_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 8, 23).unwrap()
}

/// Every row, in the order it is inserted
pub fn measurements() -> Vec<Measurement> {
    let days = (last_day() - first_day()).num_days();
    let mut rows = Vec::new();

    for day in 0..=days {
        let date = first_day() + TimeDelta::days(day);
        for (i, &(station, _)) in STATIONS.iter().take(REPORTING).enumerate() {
            let i = i as i64;
            let prcp = if (day + i) % 11 == 0 {
                None
            } else {
                Some(((day * 3 + i) % 50) as f64 / 100.0)
            };
            rows.push(Measurement {
                station,
                date: date.format("%Y-%m-%d").to_string(),
                prcp,
                tobs: 65.0 + ((day * 7 + i * 13) % 20) as f64,
            });
        }
    }

    rows
}

/// Create the database file at `path`
pub async fn create_test_weather_db(path: &Path) -> Result<(), sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    sqlx::query(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY, station TEXT, name TEXT,
            latitude FLOAT, longitude FLOAT, elevation FLOAT
        )",
    )
    .execute(&mut conn)
    .await?;

    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT
        )",
    )
    .execute(&mut conn)
    .await?;

    let mut tx = conn.begin().await?;

    for (i, (station, name)) in STATIONS.iter().enumerate() {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(*station)
        .bind(*name)
        .bind(21.3 + i as f64 * 0.05)
        .bind(-157.8 - i as f64 * 0.02)
        .bind(3.0 + i as f64 * 10.0)
        .execute(&mut *tx)
        .await?;
    }

    for row in measurements() {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(row.station)
            .bind(row.date.as_str())
            .bind(row.prcp)
            .bind(row.tobs)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    conn.close().await?;

    Ok(())
}
