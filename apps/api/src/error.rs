//! API error type and its HTTP mapping.
//!
//! Handlers return `Result<T, ApiError>` and rely on `?` to convert from
//! the core and database error types. The `IntoResponse` impl is the single
//! place where errors become status codes, so the mapping stays consistent
//! across every route:
//!
//! - validation failures and constraint violations -> 400
//! - missing entities -> 404
//! - everything else -> 500, with the detail withheld from the client

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use merx_core::ValidationError;
use merx_db::DbError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),

            ApiError::Db(err) => match err {
                DbError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                DbError::UniqueViolation { .. }
                | DbError::ForeignKeyViolation { .. }
                | DbError::CheckViolation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                other => {
                    // Log the real failure, return a generic message.
                    error!(error = %other, "internal error while handling request");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal server error".to_string(),
                    )
                }
            },
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
