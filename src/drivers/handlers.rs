use super::error::ApiError;
use super::protocol::{
    CreateDriverRequest, HealthResponse, ListDriversResponse, ListParams, UpdateDriverRequest,
};
use super::service::DriverService;
use super::types::Driver;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use std::sync::Arc;

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn handle_create_driver(
    Extension(service): Extension<Arc<DriverService>>,
    body: Result<Json<CreateDriverRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Driver>), ApiError> {
    let Json(req) = body.map_err(|e| ApiError::validation(e.body_text()))?;

    match service.create_driver(req).await {
        Ok(driver) => Ok((StatusCode::CREATED, Json(driver))),
        Err(e) => Err(e.into_api_error("failed to create driver")),
    }
}

pub async fn handle_update_driver(
    Extension(service): Extension<Arc<DriverService>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateDriverRequest>, JsonRejection>,
) -> Result<Json<Driver>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::validation(e.body_text()))?;

    service
        .update_driver(&id, req)
        .await
        .map(Json)
        .map_err(|e| e.into_api_error("failed to update driver"))
}

pub async fn handle_get_driver(
    Extension(service): Extension<Arc<DriverService>>,
    Path(id): Path<String>,
) -> Result<Json<Driver>, ApiError> {
    service
        .get_driver(&id)
        .await
        .map(Json)
        .map_err(|e| e.into_api_error("failed to get driver"))
}

pub async fn handle_list_drivers(
    Extension(service): Extension<Arc<DriverService>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ListDriversResponse>, ApiError> {
    let params = match query {
        Ok(Query(pairs)) => ListParams::from_pairs(pairs),
        Err(e) => {
            tracing::debug!("Ignoring unreadable list query: {}", e.body_text());
            ListParams::default()
        }
    };

    // Unparsable values fall through to the service clamps.
    let page = parse_or(params.page.as_deref(), 1);
    let page_size = parse_or(params.page_size.as_deref(), 20);

    service
        .list_drivers(page, page_size)
        .await
        .map(Json)
        .map_err(|e| e.into_api_error("failed to list drivers"))
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
