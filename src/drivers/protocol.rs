//! Driver API Protocol
//!
//! Endpoint paths and the Data Transfer Objects exchanged with HTTP clients
//! (the gateway in production).

use super::types::Driver;
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Liveness probe.
pub const ENDPOINT_HEALTH: &str = "/health";
/// Collection endpoint: create (POST) and paginated listing (GET).
pub const ENDPOINT_DRIVERS: &str = "/api/v1/drivers";
/// Nearby-driver search.
pub const ENDPOINT_NEARBY: &str = "/api/v1/drivers/nearby";
/// Single driver: fetch (GET) and partial update (PUT).
pub const ENDPOINT_DRIVER: &str = "/api/v1/drivers/:id";

// --- Requests ---

/// Body of `POST /api/v1/drivers`.
///
/// Missing fields deserialize to empty values and are rejected by validation,
/// except `lat`/`lon`, which default to `0` (the "no location yet" sentinel).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub plate: String,
    /// Wire name is `taksiType`; `taxiType` is accepted as well.
    #[serde(default, rename = "taksiType", alias = "taxiType")]
    pub taxi_type: String,
    #[serde(default)]
    pub car_brand: String,
    #[serde(default)]
    pub car_model: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
}

/// Body of `PUT /api/v1/drivers/:id`. Only provided fields change.
///
/// The new position may be sent nested (`location`) or as top-level `lat`/`lon`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub plate: Option<String>,
    #[serde(rename = "taksiType", alias = "taxiType")]
    pub taxi_type: Option<String>,
    pub car_brand: Option<String>,
    pub car_model: Option<String>,
    pub location: Option<GeoPoint>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Query string of `GET /api/v1/drivers`. Unparsable values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Query string of `GET /api/v1/drivers/nearby`, parsed by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    #[serde(rename = "taksiType", alias = "taxiType")]
    pub taxi_type: Option<String>,
}

impl ListParams {
    /// A repeated key keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "pageSize" => &mut params.page_size,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

impl NearbyParams {
    /// A repeated key keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "lat" => &mut params.lat,
                "lon" => &mut params.lon,
                "taksiType" | "taxiType" => &mut params.taxi_type,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

// --- Responses ---

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDriversResponse {
    pub drivers: Vec<Driver>,
    pub total_count: u64,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Uniform error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}
