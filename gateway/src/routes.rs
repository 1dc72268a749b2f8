use crate::handlers::{
    AppState, handle_create_driver, handle_find_nearby, handle_get_driver, handle_health,
    handle_list_drivers, handle_update_driver,
};
use crate::rate_limit::rate_limit;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Public routes. Every request passes the rate limiter first.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/drivers",
            post(handle_create_driver).get(handle_list_drivers),
        )
        .route("/drivers/nearby", get(handle_find_nearby))
        .route(
            "/drivers/:id",
            get(handle_get_driver).put(handle_update_driver),
        )
        .layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            rate_limit,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
