//! API error mapping

use crate::models::ErrorResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use titan_forms::{FormValidation, StoreError};

/// Handler failure
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Body could not be parsed or failed definition checks
    #[error("{message}")]
    Body { status: StatusCode, message: String },

    /// Submission failed validation
    #[error("submission failed validation")]
    Rejected(FormValidation),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body { status: rejection.status(), message: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            Self::Store(StoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, ErrorResponse::new("NOT_FOUND", message))
            }
            Self::Store(StoreError::ValidationFailed(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorResponse::new("VALIDATION_FAILED", message))
            }
            Self::Store(StoreError::Schema(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorResponse::new("SCHEMA_ERROR", message))
            }
            Self::Store(StoreError::Storage(_)) => {
                tracing::error!(error = %message, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new("STORAGE_ERROR", message))
            }
            Self::Body { status, .. } => (status, ErrorResponse::new("INVALID_BODY", message)),
            Self::Rejected(validation) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    validation: Some(validation),
                    ..ErrorResponse::new("VALIDATION_FAILED", message)
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
