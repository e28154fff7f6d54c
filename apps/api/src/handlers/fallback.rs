use orgreg_core::AppError;

use crate::error::ApiError;

/// Message returned for API paths with no route.
pub const UNKNOWN_ROUTE_MESSAGE: &str = "Resource not found.";

pub async fn unknown_api_route_handler() -> ApiError {
    ApiError(AppError::NotFound(UNKNOWN_ROUTE_MESSAGE.to_owned()))
}
