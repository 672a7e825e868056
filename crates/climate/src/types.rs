//! Core domain types for climate data.
//!
//! - `Measurement`: one daily observation reported by a station
//! - `Station`: station metadata
//! - `PrecipitationReading`, `TemperatureObservation`, `StationActivity`,
//!   `TemperatureStats`: the shapes returned by the query layer
//! - `DateRange`: inclusive date filter for temperature aggregates
//!
//! Dates are carried as `YYYY-MM-DD` strings, the same representation the
//! store uses, so that filters compare exactly the way the store does.

use crate::error::{ClimateError, ClimateResult};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used by the measurement table.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the "last year" window, counted back from the most recent date.
pub const LOOKBACK_DAYS: i64 = 365;

/// Identifier of a weather station (e.g. `USC00519281`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Create a new station ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single observation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub station: StationId,
    /// Observation date, `YYYY-MM-DD`.
    pub date: String,
    /// Precipitation; absent for days the station did not report it.
    pub prcp: Option<f64>,
    /// Temperature observation.
    pub tobs: Option<f64>,
}

impl Measurement {
    pub fn new(
        station: impl Into<StationId>,
        date: impl Into<String>,
        prcp: Option<f64>,
        tobs: Option<f64>,
    ) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            prcp,
            tobs,
        }
    }
}

/// Weather station metadata. Only `station` is used by queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station: StationId,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl Station {
    /// Station with no descriptive metadata.
    pub fn bare(station: impl Into<StationId>) -> Self {
        Self {
            station: station.into(),
            name: None,
            latitude: None,
            longitude: None,
            elevation: None,
        }
    }
}

/// One precipitation value inside the last-year window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationReading {
    pub date: String,
    pub station: StationId,
    pub prcp: Option<f64>,
}

/// One temperature observation of a single station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: Option<f64>,
}

/// Measurement count for a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationActivity {
    pub station: StationId,
    pub count: i64,
}

/// Min / average / max temperature over a filtered set of measurements.
///
/// All three are `None` when no measurement matched the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureStats {
    /// Compute stats over an iterator of temperatures, skipping missing values.
    pub fn from_values(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;
        let mut sum = 0.0;
        let mut count = 0usize;

        for value in values.into_iter().flatten() {
            min = Some(min.map_or(value, |m| m.min(value)));
            max = Some(max.map_or(value, |m| m.max(value)));
            sum += value;
            count += 1;
        }

        Self {
            min,
            avg: (count > 0).then(|| sum / count as f64),
            max,
        }
    }

    /// True when no temperature contributed to the stats.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

/// Date filter for temperature stats: `date >= start` and, if set, `date <= end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

impl DateRange {
    /// Open-ended range starting at `start`.
    pub fn starting(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    /// Range bounded on both sides.
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    /// Check that both bounds are well-formed dates.
    ///
    /// Bounds are still passed to the store as the original strings.
    pub fn validate(&self) -> ClimateResult<()> {
        for bound in std::iter::once(&self.start).chain(self.end.as_ref()) {
            parse_date(bound).map_err(|_| ClimateError::InvalidFilter(bound.clone()))?;
        }
        Ok(())
    }

    /// Whether a `YYYY-MM-DD` date falls inside the range (string comparison).
    pub fn contains(&self, date: &str) -> bool {
        date >= self.start.as_str() && self.end.as_deref().map_or(true, |end| date <= end)
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> ClimateResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ClimateError::InvalidDate(s.to_string()))
}

/// The date exactly [`LOOKBACK_DAYS`] days before `date`, formatted `YYYY-MM-DD`.
pub fn one_year_before(date: &str) -> ClimateResult<String> {
    let date = parse_date(date)?;
    Ok((date - Duration::days(LOOKBACK_DAYS))
        .format(DATE_FORMAT)
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_id() {
        let id = StationId::new("USC00519281");
        assert_eq!(id.as_str(), "USC00519281");
        assert_eq!(id.to_string(), "USC00519281");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"USC00519281\"");
    }

    #[test]
    fn test_one_year_before() {
        assert_eq!(one_year_before("2017-08-23").unwrap(), "2016-08-23");
        // 2016 is a leap year: 365 days back from 2017-03-01 is 2016-03-01
        assert_eq!(one_year_before("2017-03-01").unwrap(), "2016-03-01");
        // ...and 365 days back from 2016-03-01 is 2015-03-02
        assert_eq!(one_year_before("2016-03-01").unwrap(), "2015-03-02");
    }

    #[test]
    fn test_one_year_before_rejects_garbage() {
        assert!(matches!(
            one_year_before("not-a-date"),
            Err(ClimateError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_date_range_validate() {
        assert!(DateRange::starting("2017-01-01").validate().is_ok());
        assert!(DateRange::between("2017-01-01", "2017-12-31").validate().is_ok());
        assert!(matches!(
            DateRange::starting("2017-1-1x").validate(),
            Err(ClimateError::InvalidFilter(d)) if d == "2017-1-1x"
        ));
        assert!(matches!(
            DateRange::between("2017-01-01", "end").validate(),
            Err(ClimateError::InvalidFilter(d)) if d == "end"
        ));
    }

    #[test]
    fn test_date_range_contains() {
        let range = DateRange::between("2017-01-01", "2017-01-01");
        assert!(range.contains("2017-01-01"));
        assert!(!range.contains("2016-12-31"));
        assert!(!range.contains("2017-01-02"));

        let open = DateRange::starting("2017-06-01");
        assert!(open.contains("2017-08-23"));
        assert!(!open.contains("2017-05-31"));

        let inverted = DateRange::between("2017-02-01", "2017-01-01");
        assert!(!inverted.contains("2017-01-15"));
    }

    #[test]
    fn test_temperature_stats_from_values() {
        let stats = TemperatureStats::from_values(vec![Some(70.0), None, Some(80.0), Some(75.0)]);
        assert_eq!(stats.min, Some(70.0));
        assert_eq!(stats.max, Some(80.0));
        assert_eq!(stats.avg, Some(75.0));
        assert!(!stats.is_empty());

        let empty = TemperatureStats::from_values(vec![None, None]);
        assert!(empty.is_empty());
        assert_eq!(empty, TemperatureStats::default());
    }
}
