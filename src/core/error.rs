use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// A single validation failure as exposed in Bad Request bodies.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConstraintViolation {
    pub message: String,
    pub value: serde_json::Value,
}

impl ConstraintViolation {
    pub fn new(message: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            message: message.into(),
            value,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed with {} violation(s)", .0.len())]
    Validation(Vec<ConstraintViolation>),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "message": "Database error occurred" })),
                )
                    .into_response()
            }
            // A designed outcome, not a failure - no logging
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(serde_json::json!({ "message": msg })))
                    .into_response()
            }
            AppError::Validation(violations) => {
                (StatusCode::BAD_REQUEST, Json(violations)).into_response()
            }
            // Malformed ids are a caller problem, reported like any other
            // constraint violation
            AppError::InvalidIdentifier(id) => (
                StatusCode::BAD_REQUEST,
                Json(vec![ConstraintViolation::new(
                    "id must be a valid object identifier",
                    serde_json::Value::String(id),
                )]),
            )
                .into_response(),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "message": msg })))
                    .into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
