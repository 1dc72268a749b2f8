use super::types::RankedResult;
use crate::drivers::error::ApiError;
use crate::drivers::protocol::NearbyParams;
use crate::drivers::service::DriverService;
use crate::drivers::types::TaxiType;
use crate::geo::GeoPoint;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query};
use std::sync::Arc;

const INVALID_TAXI_TYPE: &str = "invalid taksiType. Must be one of: sari, turkuaz, siyah";

pub async fn handle_find_nearby(
    Extension(service): Extension<Arc<DriverService>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<RankedResult>>, ApiError> {
    let Query(pairs) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    let params = NearbyParams::from_pairs(pairs);

    let (lat, lon) = match (non_empty(params.lat), non_empty(params.lon)) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return Err(ApiError::validation("lat and lon are required")),
    };

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| ApiError::validation("invalid lat format"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| ApiError::validation("invalid lon format"))?;

    let category = match non_empty(params.taxi_type) {
        Some(raw) => Some(
            raw.parse::<TaxiType>()
                .map_err(|_| ApiError::validation(INVALID_TAXI_TYPE))?,
        ),
        None => None,
    };

    tracing::debug!("Nearby search at ({}, {}) category={:?}", lat, lon, category);

    service
        .find_nearby(GeoPoint::new(lat, lon), category)
        .await
        .map(Json)
        .map_err(|e| e.into_api_error("failed to find nearby drivers"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
