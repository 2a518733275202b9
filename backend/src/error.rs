//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting pipeline errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bmi_insights_shared::{BmiError, ErrorDetail, ErrorResponse};
use thiserror::Error;
use tracing::warn;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid measurement: {message}")]
    InvalidMeasurement {
        field: Option<String>,
        message: String,
    },

    #[error("Advice unavailable: {0}")]
    AdviceUnavailable(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl From<BmiError> for ApiError {
    fn from(err: BmiError) -> Self {
        match err {
            BmiError::InvalidMeasurement { field, message } => {
                ApiError::InvalidMeasurement { field, message }
            }
            BmiError::AdviceUnavailable(message) => ApiError::AdviceUnavailable(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match self {
            ApiError::InvalidMeasurement { field, message } => (
                StatusCode::BAD_REQUEST,
                "INVALID_MEASUREMENT",
                message,
                field,
            ),
            ApiError::AdviceUnavailable(message) => {
                warn!(%message, "Advice unavailable");
                (StatusCode::BAD_GATEWAY, "ADVICE_UNAVAILABLE", message, None)
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
