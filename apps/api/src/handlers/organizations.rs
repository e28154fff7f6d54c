use axum::extract::State;
use axum::http::HeaderMap;
use orgreg_core::AppError;
use orgreg_domain::{RejectionKind, ValidationResult};

use crate::dto::{ApiResponse, OrganizationResponse};
use crate::error::ApiResult;
use crate::middleware::authorization_header;
use crate::state::AppState;

/// Header naming the organization a request targets.
pub const ORGANIZATION_ID_HEADER: &str = "x-org-id";

/// Audit label for [`my_organization_handler`].
pub const RETRIEVE_ORGANIZATION_ACTIVITY: &str = "Retrieve Organization by organization id";

pub async fn my_organization_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<ApiResponse<OrganizationResponse>> {
    let organization_id = headers
        .get(ORGANIZATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .trim();

    if let ValidationResult::Rejected { kind, message } = state
        .organization_access_policy
        .authorize_instance(organization_id, authorization_header(&headers))
    {
        return Err(match kind {
            RejectionKind::BadRequest => AppError::Validation(message),
            RejectionKind::AccessDenied => AppError::Forbidden(message),
        }
        .into());
    }

    let organization = state
        .organization_service
        .find_active(organization_id)
        .await?;

    Ok(ApiResponse::success(
        format!("{} is found.", organization.organization_name),
        OrganizationResponse::from(organization),
    ))
}
