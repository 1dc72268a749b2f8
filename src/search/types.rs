use crate::drivers::types::{Driver, TaxiType};
use crate::geo::GeoPoint;
use crate::storage::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Search radius of the reference deployment.
pub const DEFAULT_RADIUS_KM: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery {
    pub center: GeoPoint,
    pub category: Option<TaxiType>,
    pub radius_km: f64,
}

impl SearchQuery {
    pub fn new(center: GeoPoint, category: Option<TaxiType>) -> Self {
        Self {
            center,
            category,
            radius_km: DEFAULT_RADIUS_KM,
        }
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }
}

/// A driver's public projection paired with its distance from the query center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub plate: String,
    pub taxi_type: TaxiType,
    pub distance_km: f64,
}

impl RankedResult {
    pub fn from_driver(driver: Driver, distance_km: f64) -> Self {
        Self {
            id: driver.id,
            first_name: driver.first_name,
            last_name: driver.last_name,
            plate: driver.plate,
            taxi_type: driver.taxi_type,
            distance_km,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NearbyOutcome {
    /// Non-decreasing in `distance_km`, every entry within the radius.
    pub results: Vec<RankedResult>,
    /// Candidate documents that could not be decoded and were left out.
    pub skipped_malformed: usize,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("candidate store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}
