//! # Climate Crate
//!
//! Read-only access to historical weather-station measurements and the JSON
//! API that exposes them.
//!
//! ## Key Components
//!
//! - **Domain Types**: `Measurement`, `Station`, `StationId`, `TemperatureStats`, `DateRange`
//! - **Traits**: `ClimateStore` for storage abstraction
//! - **Stores**: `SqliteClimateStore` (production), `InMemoryClimateStore` (tests)
//! - **API**: axum handlers for the `/api/v1.0` routes
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  api::climate_routes                                     │
//! │   /api/v1.0/precipitation  /stations  /tobs  /{start}..  │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │ Arc<dyn ClimateStore>
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  ClimateStore                                            │
//! │   most_recent_date · precipitation_last_year ·           │
//! │   station_ids · most_active_station ·                    │
//! │   temperature_last_year · temperature_stats              │
//! └────────────────────────────┬─────────────────────────────┘
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  SqliteClimateStore  (read-only pool, schema checked)    │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod flatten;
pub mod store;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod db;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for convenience
pub use error::{ClimateError, ClimateResult};
pub use flatten::{flatten, FlatRow};
pub use store::{ClimateStore, InMemoryClimateStore};
pub use types::{
    one_year_before, parse_date, DateRange, Measurement, PrecipitationReading, Station,
    StationActivity, StationId, TemperatureObservation, TemperatureStats, LOOKBACK_DAYS,
};

#[cfg(feature = "sqlite")]
pub use db::{SchemaSummary, SqliteClimateStore};

#[cfg(feature = "api")]
pub use api::{climate_routes, ClimateApiState};
