use axum::Json;
use axum::response::{IntoResponse, Response};
use orgreg_core::Principal;
use orgreg_domain::Organization;
use serde::Serialize;

use crate::audit_trail::AuditNote;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let note = AuditNote(self.message.clone());
        let mut response = Json(self).into_response();
        response.extensions_mut().insert(note);
        response
    }
}

/// API representation of an organization.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
    pub organization_id: String,
    pub organization_name: String,
    pub unique_entity_number: String,
    pub sector_name: Option<String>,
    pub primary_contact_name: String,
    pub primary_contact_email: String,
    pub is_active: bool,
}

impl From<Organization> for OrganizationResponse {
    fn from(value: Organization) -> Self {
        Self {
            organization_id: value.organization_id,
            organization_name: value.organization_name,
            unique_entity_number: value.unique_entity_number,
            sector_name: value.sector_name,
            primary_contact_name: value.primary_contact_name,
            primary_contact_email: value.primary_contact_email,
            is_active: value.is_active,
        }
    }
}

/// API representation of the authenticated caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalResponse {
    pub user_id: String,
    pub username: String,
    pub email: Option<String>,
    pub org_id: Option<String>,
    pub authorities: Vec<String>,
}

impl From<&Principal> for PrincipalResponse {
    fn from(value: &Principal) -> Self {
        Self {
            user_id: value.user_id().to_owned(),
            username: value.username().to_owned(),
            email: value.email().map(ToOwned::to_owned),
            org_id: value.org_id().map(ToOwned::to_owned),
            authorities: value.authorities().to_vec(),
        }
    }
}

/// Dependency check outcome.
#[derive(Debug, Serialize)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub postgres: HealthDependencyStatus,
}
