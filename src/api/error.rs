//! API error types mapping to HTTP responses.
//!
//! Two externally visible kinds: validation failures (422, with field-level
//! detail) and inference failures (500, logged with the full error chain).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error type that converts to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input field outside its declared domain (422)
    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    /// Inference pipeline failure (500); indicates a mis-exported artifact,
    /// not a request problem
    #[error("Inference failed")]
    Inference(#[from] anyhow::Error),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the machine-readable error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Inference(_) => "INTERNAL_ERROR",
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Per-field validation detail
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

/// A single field-level validation failure.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        let details = match &self {
            ApiError::Validation(errors) => errors
                .field_errors()
                .iter()
                .flat_map(|(field, field_errors)| {
                    field_errors.iter().map(|e| FieldError {
                        field: field.to_string(),
                        message: match &e.message {
                            Some(message) => message.to_string(),
                            None => format!("violates `{}` constraint", e.code),
                        },
                    })
                })
                .collect(),
            ApiError::Inference(_) => Vec::new(),
        };

        match &self {
            ApiError::Inference(source) => {
                tracing::error!(error = %self, source = %source, "API error");
            }
            _ => {
                tracing::warn!(error = %self, "API error");
            }
        }

        let body = ErrorResponse {
            code,
            message: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
