//! Axum route definitions for the climate API.

use crate::api::handlers;
use crate::api::models::ClimateApiState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Create all climate routes.
///
/// # Routes
///
/// - `GET /` - Route listing
/// - `GET /api/v1.0/precipitation` - Last year of precipitation
/// - `GET /api/v1.0/stations` - All station identifiers
/// - `GET /api/v1.0/tobs` - Last year of temperatures at the most active station
/// - `GET /api/v1.0/{start}` - Temperature stats from `start`
/// - `GET /api/v1.0/{start}/{end}` - Temperature stats from `start` to `end`, inclusive
pub fn climate_routes(state: Arc<ClimateApiState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/v1.0/precipitation", get(handlers::precipitation))
        .route("/api/v1.0/stations", get(handlers::stations))
        .route("/api/v1.0/tobs", get(handlers::tobs))
        .route("/api/v1.0/:start", get(handlers::temperature_stats_from))
        .route(
            "/api/v1.0/:start/:end",
            get(handlers::temperature_stats_between),
        )
        .with_state(state)
}
