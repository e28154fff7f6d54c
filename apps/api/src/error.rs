use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orgreg_core::AppError;
use serde::Serialize;
use tracing::error;

use crate::audit_trail::AuditNote;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    success: bool,
    message: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self.0 {
            AppError::Internal(detail) => {
                error!(error = %detail, "request failed with internal error");
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
            other => other.message().to_owned(),
        };

        error_response(status, message)
    }
}

/// Builds the standard failure body and tags it for the audit trail.
pub fn error_response(status: StatusCode, message: String) -> Response {
    let mut response = (
        status,
        Json(ErrorResponse {
            success: false,
            message: message.clone(),
        }),
    )
        .into_response();
    response.extensions_mut().insert(AuditNote(message));
    response
}

/// Converts a handler panic into a standard 500 response.
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|detail| (*detail).to_owned())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    error!(panic = %detail, "request handler panicked");

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE.to_owned(),
    )
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
