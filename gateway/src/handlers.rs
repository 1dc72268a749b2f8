use crate::client::{DriverServiceClient, UpstreamError, UpstreamResponse};
use crate::rate_limit::RateLimiter;

use axum::Json;
use axum::body::Body;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use taxihub::drivers::error::CODE_VALIDATION;
use taxihub::drivers::protocol::{ErrorResponse, HealthResponse, NearbyParams};

const CODE_BAD_GATEWAY: &str = "BAD_GATEWAY";

#[derive(Clone)]
pub struct AppState {
    pub client: DriverServiceClient,
    pub limiter: Arc<RateLimiter>,
}

fn validation_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(CODE_VALIDATION, message)),
    )
        .into_response()
}

/// Relays the driver service answer, or 502 when it could not be reached.
/// A driver id the URL parser would resolve away is a local 400.
fn relay(result: Result<UpstreamResponse, UpstreamError>, failure: &str) -> Response {
    match result {
        Ok(upstream) => {
            let status =
                StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let mut response = axum::http::Response::builder().status(status);
            if let Some(content_type) = upstream.content_type {
                response = response.header(header::CONTENT_TYPE, content_type);
            }
            response
                .body(Body::from(upstream.body))
                .unwrap_or_else(|e| {
                    tracing::error!("Failed to build relayed response: {}", e);
                    bad_gateway(failure)
                })
        }
        Err(UpstreamError::InvalidSegment(segment)) => {
            tracing::debug!("Refusing to forward path segment {:?}", segment);
            validation_error("invalid driver ID")
        }
        Err(e) => {
            tracing::error!("{}: {}", failure, e);
            bad_gateway(failure)
        }
    }
}

fn bad_gateway(message: &str) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse::new(CODE_BAD_GATEWAY, message)),
    )
        .into_response()
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn handle_create_driver(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(e) => return validation_error(e.body_text()),
    };

    relay(
        state.client.create_driver(&body).await,
        "failed to create driver",
    )
}

pub async fn handle_update_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(e) => return validation_error(e.body_text()),
    };

    relay(
        state.client.update_driver(&id, &body).await,
        "failed to update driver",
    )
}

pub async fn handle_get_driver(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    relay(state.client.get_driver(&id).await, "failed to get driver")
}

pub async fn handle_list_drivers(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    relay(
        state.client.list_drivers(query.as_deref()).await,
        "failed to list drivers",
    )
}

pub async fn handle_find_nearby(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
    RawQuery(query): RawQuery,
) -> Response {
    let params = match pairs {
        Ok(Query(pairs)) => NearbyParams::from_pairs(pairs),
        Err(e) => return validation_error(e.body_text()),
    };
    let has = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
    if !has(&params.lat) || !has(&params.lon) {
        return validation_error("lat and lon are required");
    }

    relay(
        state
            .client
            .find_nearby(query.as_deref().unwrap_or_default())
            .await,
        "failed to find nearby drivers",
    )
}
