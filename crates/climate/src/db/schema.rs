//! Startup schema check.
//!
//! The record kinds are declared statically, so instead of reflecting the
//! schema at runtime the store checks once, at connect time, that the tables
//! and columns those declarations rely on are present.

use crate::db::models::MeasurementRow;
use crate::error::{ClimateError, ClimateResult};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Table holding one row per station per day.
pub const MEASUREMENT_TABLE: &str = "measurement";

/// Columns of [`MEASUREMENT_TABLE`] used by the queries.
pub const MEASUREMENT_COLUMNS: &[&str] = &["station", "date", "prcp", "tobs"];

/// Table holding station metadata.
pub const STATION_TABLE: &str = "station";

/// Columns of [`STATION_TABLE`] used by the queries.
pub const STATION_COLUMNS: &[&str] = &["station"];

/// Row counts gathered during verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaSummary {
    pub measurements: i64,
    pub stations: i64,
}

/// Verify that both record kinds exist with the expected columns.
///
/// Also decodes one measurement row, so a column holding the wrong type
/// fails here rather than on the first request.
pub async fn verify_schema(pool: &SqlitePool) -> ClimateResult<SchemaSummary> {
    verify_table(pool, MEASUREMENT_TABLE, MEASUREMENT_COLUMNS).await?;
    verify_table(pool, STATION_TABLE, STATION_COLUMNS).await?;

    let sample = sqlx::query_as::<_, MeasurementRow>(
        "SELECT station, date, prcp, tobs FROM measurement LIMIT 1",
    )
    .fetch_optional(pool)
    .await
    .map_err(|e| ClimateError::SchemaError(format!("Failed to decode measurement row: {}", e)))?;

    if let Some(row) = sample {
        debug!(sample = ?row, "Decoded sample measurement");
    }

    let measurements: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
        .fetch_one(pool)
        .await?;
    let stations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
        .fetch_one(pool)
        .await?;

    info!(measurements, stations, "Schema verified");
    Ok(SchemaSummary {
        measurements,
        stations,
    })
}

async fn verify_table(pool: &SqlitePool, table: &str, required: &[&str]) -> ClimateResult<()> {
    let exists: Option<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
    )
    .bind(table)
    .fetch_optional(pool)
    .await?;

    if exists.is_none() {
        return Err(ClimateError::SchemaError(format!(
            "Table '{}' not found",
            table
        )));
    }

    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
        .bind(table)
        .fetch_all(pool)
        .await?;

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|c| !columns.iter().any(|have| have == c))
        .collect();

    if !missing.is_empty() {
        return Err(ClimateError::SchemaError(format!(
            "Table '{}' is missing column(s): {}",
            table,
            missing.join(", ")
        )));
    }

    debug!(table, columns = ?columns, "Table verified");
    Ok(())
}
