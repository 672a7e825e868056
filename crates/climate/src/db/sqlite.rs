//! SQLite implementation of the `ClimateStore` trait.
//!
//! The database is opened read-only and never created. All dates are
//! compared as `YYYY-MM-DD` text, exactly as stored.

use crate::db::models::{
    PrecipitationRow, StationActivityRow, TemperatureRow, TemperatureStatsRow,
};
use crate::db::schema::{verify_schema, SchemaSummary};
use crate::error::{ClimateError, ClimateResult};
use crate::store::ClimateStore;
use crate::types::{
    DateRange, PrecipitationReading, StationActivity, StationId, TemperatureObservation,
    TemperatureStats,
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// SQLite-backed climate store.
#[derive(Debug, Clone)]
pub struct SqliteClimateStore {
    pool: SqlitePool,
}

impl SqliteClimateStore {
    /// Open the database read-only and verify its schema.
    ///
    /// Fails if the file does not exist or either record kind is missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> ClimateResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| ClimateError::StorageError(format!("Invalid database URL: {}", e)))?
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                ClimateError::StorageError(format!("Failed to connect to database: {}", e))
            })?;

        info!(database_url, max_connections, "Connected to SQLite");

        let store = Self::from_pool(pool);
        store.verify().await?;
        Ok(store)
    }

    /// Create from an existing connection pool. Does not verify the schema.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check the schema and return row counts.
    pub async fn verify(&self) -> ClimateResult<SchemaSummary> {
        verify_schema(&self.pool).await
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ClimateStore for SqliteClimateStore {
    #[instrument(skip(self))]
    async fn most_recent_date(&self) -> ClimateResult<Option<String>> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                ClimateError::StorageError(format!("Failed to get most recent date: {}", e))
            })?;

        debug!(?latest, "Most recent measurement date");
        Ok(latest)
    }

    #[instrument(skip(self))]
    async fn precipitation_since(&self, from: &str) -> ClimateResult<Vec<PrecipitationReading>> {
        let rows = sqlx::query_as::<_, PrecipitationRow>(
            "SELECT date, station, prcp FROM measurement WHERE date >= ?1 ORDER BY date",
        )
        .bind(from)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ClimateError::StorageError(format!("Failed to query precipitation: {}", e)))?;

        debug!(rows = rows.len(), "Fetched precipitation");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn station_ids(&self) -> ClimateResult<Vec<StationId>> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT station FROM station")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ClimateError::StorageError(format!("Failed to list stations: {}", e)))?;

        debug!(rows = ids.len(), "Fetched stations");
        Ok(ids.into_iter().map(StationId::from).collect())
    }

    #[instrument(skip(self))]
    async fn most_active_station(&self) -> ClimateResult<Option<StationActivity>> {
        let row = sqlx::query_as::<_, StationActivityRow>(
            "SELECT station, COUNT(station) AS count FROM measurement \
             GROUP BY station \
             ORDER BY COUNT(station) DESC \
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            ClimateError::StorageError(format!("Failed to find most active station: {}", e))
        })?;

        debug!(?row, "Most active station");
        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn temperature_observations_since(
        &self,
        station: &StationId,
        from: &str,
    ) -> ClimateResult<Vec<TemperatureObservation>> {
        let rows = sqlx::query_as::<_, TemperatureRow>(
            "SELECT date, tobs FROM measurement \
             WHERE station = ?1 AND date >= ?2 \
             ORDER BY date",
        )
        .bind(station.as_str())
        .bind(from)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            ClimateError::StorageError(format!("Failed to query temperature observations: {}", e))
        })?;

        debug!(rows = rows.len(), "Fetched temperature observations");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn temperature_stats(&self, range: &DateRange) -> ClimateResult<TemperatureStats> {
        let mut sql = String::from(
            "SELECT MIN(tobs) AS min_tobs, AVG(tobs) AS avg_tobs, MAX(tobs) AS max_tobs \
             FROM measurement WHERE date >= ?1",
        );
        if range.end.is_some() {
            sql.push_str(" AND date <= ?2");
        }

        let mut query = sqlx::query_as::<_, TemperatureStatsRow>(&sql).bind(range.start.as_str());
        if let Some(end) = &range.end {
            query = query.bind(end.as_str());
        }

        let row = query.fetch_one(&self.pool).await.map_err(|e| {
            ClimateError::StorageError(format!("Failed to compute temperature stats: {}", e))
        })?;

        Ok(row.into())
    }
}
