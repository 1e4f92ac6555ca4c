//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::service::BurnJobError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest { kind: &'static str, message: String },
    Unauthorized(String),
    Unprocessable(String),
    DatabaseError(sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest { kind, message } => (StatusCode::BAD_REQUEST, kind, message),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthenticated", msg),
            ApiError::Unprocessable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "transition_rejected", msg)
            }
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({ "error": kind, "message": message })),
        )
            .into_response()
    }
}

impl From<BurnJobError> for ApiError {
    fn from(err: BurnJobError) -> Self {
        let kind = err.kind();
        match err {
            BurnJobError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BurnJobError::InvalidRange(_) | BurnJobError::Validation(_) => ApiError::BadRequest {
                kind,
                message: err.to_string(),
            },
            BurnJobError::Unauthenticated => ApiError::Unauthorized(err.to_string()),
            BurnJobError::TransitionRejected { .. } => ApiError::Unprocessable(err.to_string()),
            BurnJobError::Database(err) => ApiError::DatabaseError(err),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
