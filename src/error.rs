//! Request-level error taxonomy.
//!
//! Three cases cover the whole surface: a singular resource that does not
//! exist (404), a write the store reported as affecting no rows (400), and
//! any store failure (500). Store failures are logged with detail but the
//! client only sees a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadWrite(String),

    #[error(transparent)]
    Upstream(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::BadWrite(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Upstream(err) => {
                error!("store call failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
