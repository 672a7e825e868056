//! HTTP request handlers for the climate API.

use crate::api::models::{ClimateApiState, ErrorResponse, PrecipitationResponse};
use crate::error::{ClimateError, ClimateResult};
use crate::flatten::flatten;
use crate::types::{DateRange, StationId};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Route listing served at `/`.
pub const INDEX_PAGE: &str = "Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/&lt;start&gt;<br/>\
/api/v1.0/&lt;start&gt;/&lt;end&gt;<br/>";

impl IntoResponse for ClimateError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            warn!(error = %self, "Rejected request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    success: false,
                    error: self.to_string(),
                }),
            )
                .into_response();
        }

        // Store failures carry no body
        error!(error = %self, "Request failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// GET /api/v1.0/precipitation
pub async fn precipitation(
    State(state): State<Arc<ClimateApiState>>,
) -> ClimateResult<Json<PrecipitationResponse>> {
    let readings = state.store.precipitation_last_year().await?;
    let body = PrecipitationResponse::from_readings(readings, state.options.precipitation);
    debug!(entries = body.len(), "Precipitation response");
    Ok(Json(body))
}

/// GET /api/v1.0/stations
pub async fn stations(
    State(state): State<Arc<ClimateApiState>>,
) -> ClimateResult<Json<Vec<StationId>>> {
    Ok(Json(state.store.station_ids().await?))
}

/// GET /api/v1.0/tobs
///
/// Last year of temperature observations for the most active station, as
/// `[date, tobs, date, tobs, ...]`.
pub async fn tobs(State(state): State<Arc<ClimateApiState>>) -> ClimateResult<Json<Vec<Value>>> {
    let Some(active) = state.store.most_active_station().await? else {
        return Ok(Json(Vec::new()));
    };

    debug!(station = %active.station, count = active.count, "Most active station");
    let observations = state.store.temperature_last_year(&active.station).await?;
    Ok(Json(flatten(&observations)))
}

/// GET /api/v1.0/{start}
pub async fn temperature_stats_from(
    State(state): State<Arc<ClimateApiState>>,
    Path(start): Path<String>,
) -> ClimateResult<Json<Vec<Value>>> {
    temperature_stats(&state, DateRange::starting(start)).await
}

/// GET /api/v1.0/{start}/{end}
pub async fn temperature_stats_between(
    State(state): State<Arc<ClimateApiState>>,
    Path((start, end)): Path<(String, String)>,
) -> ClimateResult<Json<Vec<Value>>> {
    temperature_stats(&state, DateRange::between(start, end)).await
}

/// `[min, avg, max]` over the range.
async fn temperature_stats(
    state: &ClimateApiState,
    range: DateRange,
) -> ClimateResult<Json<Vec<Value>>> {
    if state.options.strict_dates {
        range.validate()?;
    }

    let stats = state.store.temperature_stats(&range).await?;
    Ok(Json(flatten(std::iter::once(&stats))))
}
