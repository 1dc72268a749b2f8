use super::protocol::ErrorResponse;
use crate::search::SearchError;
use crate::storage::StoreError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const CODE_VALIDATION: &str = "VALIDATION_ERROR";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_INTERNAL: &str = "INTERNAL_ERROR";

#[derive(Debug, Error)]
pub enum DriverError {
    /// Caller input was rejected; the message is safe to show.
    #[error("{0}")]
    Validation(String),
    #[error("driver not found")]
    NotFound,
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl From<SearchError> for DriverError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidArgument(message) => DriverError::Validation(message),
            SearchError::StoreUnavailable(e) => DriverError::Store(e),
        }
    }
}

impl DriverError {
    /// Maps the error to an HTTP response. Store failures are logged and replaced
    /// by `failure`, so internals never reach the client.
    pub fn into_api_error(self, failure: &str) -> ApiError {
        match self {
            DriverError::Validation(message) => ApiError::validation(message),
            DriverError::NotFound => ApiError::not_found("driver not found"),
            DriverError::Store(e) => {
                tracing::error!("{}: {}", failure, e);
                ApiError::internal(failure)
            }
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new(CODE_VALIDATION, message),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorResponse::new(CODE_NOT_FOUND, message),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorResponse::new(CODE_INTERNAL, message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
