//! Database row models for measurements and stations.
//!
//! These structs map directly to SQLite result rows and handle
//! conversion to the domain types in `crate::types`.

use crate::types::{
    PrecipitationReading, StationActivity, TemperatureObservation, TemperatureStats,
};
use sqlx::FromRow;

/// Row of the `measurement` table.
#[derive(Debug, Clone, FromRow)]
pub struct MeasurementRow {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

/// `(date, station, prcp)` projection.
#[derive(Debug, Clone, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub station: String,
    pub prcp: Option<f64>,
}

impl From<PrecipitationRow> for PrecipitationReading {
    fn from(row: PrecipitationRow) -> Self {
        Self {
            date: row.date,
            station: row.station.into(),
            prcp: row.prcp,
        }
    }
}

/// `(date, tobs)` projection.
#[derive(Debug, Clone, FromRow)]
pub struct TemperatureRow {
    pub date: String,
    pub tobs: Option<f64>,
}

impl From<TemperatureRow> for TemperatureObservation {
    fn from(row: TemperatureRow) -> Self {
        Self {
            date: row.date,
            tobs: row.tobs,
        }
    }
}

/// `(station, count)` projection of the grouped activity query.
#[derive(Debug, Clone, FromRow)]
pub struct StationActivityRow {
    pub station: String,
    pub count: i64,
}

impl From<StationActivityRow> for StationActivity {
    fn from(row: StationActivityRow) -> Self {
        Self {
            station: row.station.into(),
            count: row.count,
        }
    }
}

/// Aggregate row of the temperature stats query.
#[derive(Debug, Clone, FromRow)]
pub struct TemperatureStatsRow {
    pub min_tobs: Option<f64>,
    pub avg_tobs: Option<f64>,
    pub max_tobs: Option<f64>,
}

impl From<TemperatureStatsRow> for TemperatureStats {
    fn from(row: TemperatureStatsRow) -> Self {
        Self {
            min: row.min_tobs,
            avg: row.avg_tobs,
            max: row.max_tobs,
        }
    }
}
