use axum::Extension;
use orgreg_core::Principal;

use crate::dto::{ApiResponse, PrincipalResponse};

/// Audit label for [`me_handler`].
pub const RETRIEVE_PRINCIPAL_ACTIVITY: &str = "Retrieve Current Principal";

pub async fn me_handler(
    Extension(principal): Extension<Principal>,
) -> ApiResponse<PrincipalResponse> {
    ApiResponse::success(
        format!("{} is authenticated.", principal.username()),
        PrincipalResponse::from(&principal),
    )
}
