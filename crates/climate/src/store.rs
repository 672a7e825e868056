//! Climate storage trait and the in-memory implementation.
//!
//! `ClimateStore` is the query layer: every operation is a pure read. The
//! "last year" operations are provided methods built on the date-bounded
//! primitives, so each backend only implements the raw queries.

use crate::error::ClimateResult;
use crate::types::{
    one_year_before, DateRange, Measurement, PrecipitationReading, Station, StationActivity,
    StationId, TemperatureObservation, TemperatureStats,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Read-only access to measurements and stations.
///
/// # Example
///
/// ```ignore
/// use climate::{ClimateStore, DateRange};
///
/// async fn example(store: &dyn ClimateStore) {
///     let stats = store.temperature_stats(&DateRange::starting("2017-01-01")).await?;
///     println!("min={:?} avg={:?} max={:?}", stats.min, stats.avg, stats.max);
/// }
/// ```
#[async_trait]
pub trait ClimateStore: Send + Sync {
    /// Maximum observation date across all measurements, `None` if there are none.
    async fn most_recent_date(&self) -> ClimateResult<Option<String>>;

    /// `(date, station, prcp)` for every measurement dated on or after `from`,
    /// ordered by date. Rows sharing a date keep store order.
    async fn precipitation_since(&self, from: &str) -> ClimateResult<Vec<PrecipitationReading>>;

    /// Every station identifier, in store order.
    async fn station_ids(&self) -> ClimateResult<Vec<StationId>>;

    /// Station with the most measurement rows.
    async fn most_active_station(&self) -> ClimateResult<Option<StationActivity>>;

    /// `(date, tobs)` for one station on or after `from`, ordered by date.
    async fn temperature_observations_since(
        &self,
        station: &StationId,
        from: &str,
    ) -> ClimateResult<Vec<TemperatureObservation>>;

    /// Min / avg / max temperature over measurements inside `range`.
    async fn temperature_stats(&self, range: &DateRange) -> ClimateResult<TemperatureStats>;

    /// Start of the trailing one-year window, `None` if there is no data.
    async fn last_year_start(&self) -> ClimateResult<Option<String>> {
        match self.most_recent_date().await? {
            Some(latest) => Ok(Some(one_year_before(&latest)?)),
            None => Ok(None),
        }
    }

    /// Precipitation for the year preceding the most recent measurement.
    async fn precipitation_last_year(&self) -> ClimateResult<Vec<PrecipitationReading>> {
        match self.last_year_start().await? {
            Some(from) => self.precipitation_since(&from).await,
            None => Ok(Vec::new()),
        }
    }

    /// Temperature observations of `station` for the year preceding the most
    /// recent measurement of any station.
    async fn temperature_last_year(
        &self,
        station: &StationId,
    ) -> ClimateResult<Vec<TemperatureObservation>> {
        match self.last_year_start().await? {
            Some(from) => self.temperature_observations_since(station, &from).await,
            None => Ok(Vec::new()),
        }
    }
}

/// In-memory implementation of ClimateStore.
///
/// Vectors keep insertion order, which stands in for the store's natural
/// row order. Useful for tests and development.
#[derive(Debug, Default)]
pub struct InMemoryClimateStore {
    measurements: Arc<RwLock<Vec<Measurement>>>,
    stations: Arc<RwLock<Vec<Station>>>,
}

impl InMemoryClimateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with data.
    pub fn with_data(measurements: Vec<Measurement>, stations: Vec<Station>) -> Self {
        Self {
            measurements: Arc::new(RwLock::new(measurements)),
            stations: Arc::new(RwLock::new(stations)),
        }
    }

    /// Append a measurement.
    pub fn add_measurement(&self, measurement: Measurement) {
        self.measurements.write().push(measurement);
    }

    /// Append a station.
    pub fn add_station(&self, station: Station) {
        self.stations.write().push(station);
    }

    /// Number of measurements in the store.
    pub fn len(&self) -> usize {
        self.measurements.read().len()
    }

    /// Check if the store holds no measurements.
    pub fn is_empty(&self) -> bool {
        self.measurements.read().is_empty()
    }
}

impl Clone for InMemoryClimateStore {
    fn clone(&self) -> Self {
        Self {
            measurements: Arc::clone(&self.measurements),
            stations: Arc::clone(&self.stations),
        }
    }
}

#[async_trait]
impl ClimateStore for InMemoryClimateStore {
    async fn most_recent_date(&self) -> ClimateResult<Option<String>> {
        Ok(self
            .measurements
            .read()
            .iter()
            .map(|m| m.date.clone())
            .max())
    }

    async fn precipitation_since(&self, from: &str) -> ClimateResult<Vec<PrecipitationReading>> {
        let mut readings: Vec<PrecipitationReading> = self
            .measurements
            .read()
            .iter()
            .filter(|m| m.date.as_str() >= from)
            .map(|m| PrecipitationReading {
                date: m.date.clone(),
                station: m.station.clone(),
                prcp: m.prcp,
            })
            .collect();

        // Stable: same-date rows keep insertion order
        readings.sort_by(|a, b| a.date.cmp(&b.date));
        debug!(from, rows = readings.len(), "precipitation_since");
        Ok(readings)
    }

    async fn station_ids(&self) -> ClimateResult<Vec<StationId>> {
        Ok(self
            .stations
            .read()
            .iter()
            .map(|s| s.station.clone())
            .collect())
    }

    async fn most_active_station(&self) -> ClimateResult<Option<StationActivity>> {
        let measurements = self.measurements.read();

        // First-seen order, so ties go to the station encountered first
        let mut counts: Vec<StationActivity> = Vec::new();
        for m in measurements.iter() {
            match counts.iter_mut().find(|c| c.station == m.station) {
                Some(entry) => entry.count += 1,
                None => counts.push(StationActivity {
                    station: m.station.clone(),
                    count: 1,
                }),
            }
        }

        let mut best: Option<StationActivity> = None;
        for entry in counts {
            if best.as_ref().map_or(true, |b| entry.count > b.count) {
                best = Some(entry);
            }
        }
        Ok(best)
    }

    async fn temperature_observations_since(
        &self,
        station: &StationId,
        from: &str,
    ) -> ClimateResult<Vec<TemperatureObservation>> {
        let mut observations: Vec<TemperatureObservation> = self
            .measurements
            .read()
            .iter()
            .filter(|m| &m.station == station && m.date.as_str() >= from)
            .map(|m| TemperatureObservation {
                date: m.date.clone(),
                tobs: m.tobs,
            })
            .collect();

        observations.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(observations)
    }

    async fn temperature_stats(&self, range: &DateRange) -> ClimateResult<TemperatureStats> {
        let measurements = self.measurements.read();
        Ok(TemperatureStats::from_values(
            measurements
                .iter()
                .filter(|m| range.contains(&m.date))
                .map(|m| m.tobs),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> InMemoryClimateStore {
        InMemoryClimateStore::with_data(
            vec![
                Measurement::new("USC1", "2016-08-22", Some(0.5), Some(70.0)),
                Measurement::new("USC1", "2016-08-23", Some(0.1), Some(72.0)),
                Measurement::new("USC2", "2017-08-22", Some(0.02), Some(79.0)),
                Measurement::new("USC1", "2017-08-22", Some(0.3), Some(77.0)),
                Measurement::new("USC1", "2017-08-23", None, Some(81.0)),
            ],
            vec![Station::bare("USC1"), Station::bare("USC2")],
        )
    }

    #[tokio::test]
    async fn test_most_recent_date() {
        let store = sample_store();
        assert_eq!(
            store.most_recent_date().await.unwrap(),
            Some("2017-08-23".to_string())
        );
        assert_eq!(InMemoryClimateStore::new().most_recent_date().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_precipitation_last_year_window() {
        let store = sample_store();
        let readings = store.precipitation_last_year().await.unwrap();

        // 2016-08-23 is exactly 365 days back and is included; 2016-08-22 is not
        let dates: Vec<&str> = readings.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2016-08-23", "2017-08-22", "2017-08-22", "2017-08-23"]
        );

        // Same-date rows keep insertion order, nulls pass through
        assert_eq!(readings[1].station, StationId::new("USC2"));
        assert_eq!(readings[2].station, StationId::new("USC1"));
        assert_eq!(readings[3].prcp, None);
    }

    #[tokio::test]
    async fn test_station_ids_in_store_order() {
        let store = sample_store();
        store.add_station(Station::bare("USC0"));
        let ids = store.station_ids().await.unwrap();
        assert_eq!(
            ids,
            vec![StationId::new("USC1"), StationId::new("USC2"), StationId::new("USC0")]
        );
    }

    #[tokio::test]
    async fn test_most_active_station() {
        let store = sample_store();
        let active = store.most_active_station().await.unwrap().unwrap();
        assert_eq!(active.station, StationId::new("USC1"));
        assert_eq!(active.count, 4);
    }

    #[tokio::test]
    async fn test_most_active_station_tie_goes_to_first_seen() {
        let store = InMemoryClimateStore::with_data(
            vec![
                Measurement::new("B", "2017-01-01", None, Some(70.0)),
                Measurement::new("A", "2017-01-01", None, Some(70.0)),
                Measurement::new("A", "2017-01-02", None, Some(70.0)),
                Measurement::new("B", "2017-01-02", None, Some(70.0)),
            ],
            vec![],
        );
        let active = store.most_active_station().await.unwrap().unwrap();
        assert_eq!(active.station, StationId::new("B"));
        assert!(InMemoryClimateStore::new()
            .most_active_station()
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_temperature_last_year_for_station() {
        let store = sample_store();
        let observations = store
            .temperature_last_year(&StationId::new("USC1"))
            .await
            .unwrap();
        let dates: Vec<&str> = observations.iter().map(|o| o.date.as_str()).collect();
        assert_eq!(dates, vec!["2016-08-23", "2017-08-22", "2017-08-23"]);
        assert_eq!(observations[2].tobs, Some(81.0));
    }

    #[tokio::test]
    async fn test_temperature_stats_ranges() {
        let store = sample_store();

        let stats = store
            .temperature_stats(&DateRange::starting("2017-08-22"))
            .await
            .unwrap();
        assert_eq!(stats.min, Some(77.0));
        assert_eq!(stats.max, Some(81.0));
        assert_eq!(stats.avg, Some(79.0));

        let single_day = store
            .temperature_stats(&DateRange::between("2016-08-22", "2016-08-22"))
            .await
            .unwrap();
        assert_eq!(single_day.min, Some(70.0));
        assert_eq!(single_day.max, Some(70.0));

        let inverted = store
            .temperature_stats(&DateRange::between("2017-08-23", "2016-01-01"))
            .await
            .unwrap();
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_clones_share_data() {
        let store = InMemoryClimateStore::new();
        let handle = store.clone();
        handle.add_measurement(Measurement::new("USC1", "2017-08-23", None, Some(81.0)));

        assert_eq!(store.len(), 1);
        let latest = tokio_test::block_on(store.most_recent_date()).unwrap();
        assert_eq!(latest.as_deref(), Some("2017-08-23"));
    }

    #[tokio::test]
    async fn test_empty_store_last_year_queries() {
        let store = InMemoryClimateStore::new();
        assert!(store.is_empty());
        assert!(store.precipitation_last_year().await.unwrap().is_empty());
        assert!(store
            .temperature_last_year(&StationId::new("USC1"))
            .await
            .unwrap()
            .is_empty());
    }
}
