//! API response models and handler state.

use crate::store::ClimateStore;
use crate::types::PrecipitationReading;
use config::{ApiConfig, PrecipitationLayout};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared state for climate API handlers.
pub struct ClimateApiState {
    pub store: Arc<dyn ClimateStore>,
    pub options: ApiConfig,
}

impl ClimateApiState {
    pub fn new(store: Arc<dyn ClimateStore>, options: ApiConfig) -> Self {
        Self { store, options }
    }
}

/// Body of `/api/v1.0/precipitation`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PrecipitationResponse {
    /// `{date: prcp}`; when several stations report on one date the last row wins.
    ByDate(BTreeMap<String, Option<f64>>),
    /// One entry per measurement, nothing dropped.
    ByStation(Vec<PrecipitationReading>),
}

impl PrecipitationResponse {
    /// Shape query rows according to the configured layout.
    pub fn from_readings(readings: Vec<PrecipitationReading>, layout: PrecipitationLayout) -> Self {
        match layout {
            PrecipitationLayout::LastWins => {
                let mut by_date = BTreeMap::new();
                for reading in readings {
                    by_date.insert(reading.date, reading.prcp);
                }
                PrecipitationResponse::ByDate(by_date)
            }
            PrecipitationLayout::ByStation => PrecipitationResponse::ByStation(readings),
        }
    }

    /// Number of entries in the body.
    pub fn len(&self) -> usize {
        match self {
            PrecipitationResponse::ByDate(map) => map.len(),
            PrecipitationResponse::ByStation(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Error response for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn readings() -> Vec<PrecipitationReading> {
        vec![
            PrecipitationReading {
                date: "2017-08-22".into(),
                station: "USC1".into(),
                prcp: Some(0.5),
            },
            PrecipitationReading {
                date: "2017-08-22".into(),
                station: "USC2".into(),
                prcp: Some(0.02),
            },
            PrecipitationReading {
                date: "2017-08-23".into(),
                station: "USC1".into(),
                prcp: None,
            },
        ]
    }

    #[test]
    fn test_last_wins_layout() {
        let body = PrecipitationResponse::from_readings(readings(), PrecipitationLayout::LastWins);
        assert_eq!(body.len(), 2);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"2017-08-22": 0.02, "2017-08-23": null})
        );
    }

    #[test]
    fn test_by_station_layout() {
        let body = PrecipitationResponse::from_readings(readings(), PrecipitationLayout::ByStation);
        assert_eq!(body.len(), 3);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!([
                {"date": "2017-08-22", "station": "USC1", "prcp": 0.5},
                {"date": "2017-08-22", "station": "USC2", "prcp": 0.02},
                {"date": "2017-08-23", "station": "USC1", "prcp": null}
            ])
        );
    }
}
