//! Date filters and the read queries behind each API endpoint.
//!
//! Every function here runs exactly one statement on a connection the caller
//! has checked out of the pool. Dates are stored as `YYYY-MM-DD` text, so
//! filter bounds are rendered in that format and compared lexically, which
//! keeps both ends of a range inclusive.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;
use sqlx::{FromRow, SqliteConnection};

use crate::error::{Result, SurfsUpError};

/// Last observation day in the Hawaii dataset; "today" for the last-year endpoints.
pub const REFERENCE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2017, 8, 23) {
    Some(date) => date,
    None => panic!("invalid reference date"),
};

/// Most active station in the dataset.
pub const DEFAULT_TOBS_STATION: &str = "USC00519281";

/// Length of the "last year" window.
pub const LOOKBACK_DAYS: i64 = 365;

const STORE_DATE_FORMAT: &str = "%Y-%m-%d";
const PATH_DATE_FORMAT: &str = "%m%d%Y";

/// Inclusive date bounds applied to `measurement.date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilter {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateFilter {
    /// Everything from `reference - 365 days` onward.
    pub fn last_year(reference: NaiveDate) -> Self {
        Self {
            start: reference - TimeDelta::days(LOOKBACK_DAYS),
            end: None,
        }
    }

    /// Build a filter from the `start` and optional `end` path segments.
    pub fn from_path(start: &str, end: Option<&str>) -> Result<Self> {
        let start = parse_path_date("start", start)?;
        let end = end.map(|end| parse_path_date("end", end)).transpose()?;
        Ok(Self { start, end })
    }

    fn lower_bound(&self) -> String {
        self.start.format(STORE_DATE_FORMAT).to_string()
    }

    fn upper_bound(&self) -> Option<String> {
        self.end.map(|end| end.format(STORE_DATE_FORMAT).to_string())
    }
}

/// Parse a `MMDDYYYY` path segment.
///
/// The segment must be exactly eight ASCII digits naming a real calendar day.
pub fn parse_path_date(param: &str, value: &str) -> Result<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SurfsUpError::InvalidDate {
            param: param.to_string(),
            message: format!("'{}' is not in MMDDYYYY format", value),
        });
    }

    NaiveDate::parse_from_str(value, PATH_DATE_FORMAT).map_err(|e| SurfsUpError::InvalidDate {
        param: param.to_string(),
        message: format!("'{}' is not a calendar date: {}", value, e),
    })
}

/// One (date, precipitation) row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

/// One (date, temperature) row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
}

/// Min/max/mean of `tobs`; all `None` when no row matched.
#[derive(Debug, Clone, Copy, PartialEq, Default, FromRow, Serialize)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl TemperatureStats {
    /// Wire form: `[min, max, avg]`.
    pub fn to_array(&self) -> [Option<f64>; 3] {
        [self.min, self.max, self.avg]
    }
}

/// All precipitation readings on or after the filter start.
pub async fn precipitation_rows(
    conn: &mut SqliteConnection,
    filter: &DateFilter,
) -> Result<Vec<PrecipitationRow>> {
    let rows = sqlx::query_as::<_, PrecipitationRow>(
        "SELECT date, CAST(prcp AS REAL) AS prcp FROM measurement WHERE date >= ?",
    )
    .bind(filter.lower_bound())
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// Collapse rows into a date-keyed mapping.
///
/// Several stations report on the same day; the row seen last wins.
pub fn precipitation_by_date(rows: Vec<PrecipitationRow>) -> BTreeMap<String, Option<f64>> {
    let mut by_date = BTreeMap::new();
    for row in rows {
        by_date.insert(row.date, row.prcp);
    }
    by_date
}

/// Every station code, in the store's row order.
pub async fn station_codes(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    let codes = sqlx::query_scalar::<_, String>("SELECT station FROM station")
        .fetch_all(conn)
        .await?;

    Ok(codes)
}

/// Temperature observations for one station on or after the filter start.
pub async fn temperature_observations(
    conn: &mut SqliteConnection,
    station: &str,
    filter: &DateFilter,
) -> Result<Vec<TemperatureObservation>> {
    let rows = sqlx::query_as::<_, TemperatureObservation>(
        "SELECT date, CAST(tobs AS REAL) AS tobs FROM measurement \
         WHERE date >= ? AND station = ?",
    )
    .bind(filter.lower_bound())
    .bind(station)
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// Flatten observations into `[date, tobs, date, tobs, ...]`.
pub fn flatten_observations(rows: &[TemperatureObservation]) -> Vec<serde_json::Value> {
    rows.iter()
        .flat_map(|row| {
            [
                serde_json::Value::from(row.date.as_str()),
                serde_json::Value::from(row.tobs),
            ]
        })
        .collect()
}

/// Min, max and mean temperature across all stations within the filter.
pub async fn temperature_stats(
    conn: &mut SqliteConnection,
    filter: &DateFilter,
) -> Result<TemperatureStats> {
    const SELECT: &str = "SELECT CAST(MIN(tobs) AS REAL) AS min, \
                          CAST(MAX(tobs) AS REAL) AS max, \
                          CAST(AVG(tobs) AS REAL) AS avg \
                          FROM measurement WHERE date >= ?";

    let mut sql = String::from(SELECT);
    if filter.end.is_some() {
        sql.push_str(" AND date <= ?");
    }

    let mut query = sqlx::query_as::<_, TemperatureStats>(&sql).bind(filter.lower_bound());
    if let Some(upper) = filter.upper_bound() {
        query = query.bind(upper);
    }
    let stats = query.fetch_one(conn).await?;

    Ok(stats)
}
