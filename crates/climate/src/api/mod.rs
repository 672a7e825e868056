//! HTTP API for climate queries.
//!
//! ## Modules
//!
//! - `handlers` - Route handlers, one per endpoint
//! - `routes` - Axum router
//! - `models` - Response types and shared handler state

pub mod handlers;
pub mod models;
pub mod routes;

pub use models::{ClimateApiState, ErrorResponse, PrecipitationResponse};
pub use routes::climate_routes;
