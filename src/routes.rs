use crate::drivers::DriverService;
use crate::drivers::handlers::{
    handle_create_driver, handle_get_driver, handle_health, handle_list_drivers,
    handle_update_driver,
};
use crate::drivers::protocol::{ENDPOINT_DRIVER, ENDPOINT_DRIVERS, ENDPOINT_HEALTH, ENDPOINT_NEARBY};
use crate::search::handlers::handle_find_nearby;

use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// The driver service HTTP API.
pub fn build_router(service: Arc<DriverService>) -> Router {
    Router::new()
        .route(ENDPOINT_HEALTH, get(handle_health))
        .route(
            ENDPOINT_DRIVERS,
            post(handle_create_driver).get(handle_list_drivers),
        )
        .route(ENDPOINT_NEARBY, get(handle_find_nearby))
        .route(
            ENDPOINT_DRIVER,
            get(handle_get_driver).put(handle_update_driver),
        )
        .layer(Extension(service))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
