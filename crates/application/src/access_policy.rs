use std::sync::Arc;

use orgreg_domain::{ScopeGrant, ScopeSet, ValidationResult};
use tracing::debug;

use crate::{TokenCodec, bearer_token};

/// Message returned when a view-scoped caller requests another organization.
pub const ORGANIZATION_ACCESS_DENIED_MESSAGE: &str =
    "Access Denied. Not authorized to view this organization.";

/// Per-instance access check for one resource kind.
///
/// Layered on top of the route-level scope check: a route scope says the
/// caller may use the endpoint, this says whether they may touch this id.
pub trait InstanceAccessPolicy: Send + Sync {
    /// Decides whether the caller may access `resource_id`.
    fn authorize_instance(
        &self,
        resource_id: &str,
        authorization_header: Option<&str>,
    ) -> ValidationResult;
}

/// Instance policy for organizations.
///
/// Manage-scoped callers may read any organization. Everyone else may read
/// only the organization named by their token's `orgId` claim.
#[derive(Clone)]
pub struct OrganizationAccessPolicy {
    token_codec: Arc<dyn TokenCodec>,
}

impl OrganizationAccessPolicy {
    /// Creates the policy from the process-wide token codec.
    #[must_use]
    pub fn new(token_codec: Arc<dyn TokenCodec>) -> Self {
        Self { token_codec }
    }
}

impl InstanceAccessPolicy for OrganizationAccessPolicy {
    fn authorize_instance(
        &self,
        resource_id: &str,
        authorization_header: Option<&str>,
    ) -> ValidationResult {
        if resource_id.trim().is_empty() {
            return ValidationResult::bad_request("Bad Request: Organization id cannot be blank.");
        }

        let Some(token) = authorization_header.and_then(bearer_token) else {
            return ValidationResult::bad_request("Invalid Authorization header.");
        };

        let claims = match self.token_codec.read_claims(token) {
            Ok(claims) => Some(claims),
            Err(error) => {
                debug!(error = %error, "could not read claims for instance access check");
                None
            }
        };

        let grant = ScopeSet::parse(claims.as_ref().and_then(|claims| claims.scope()))
            .effective_grant();
        if grant == ScopeGrant::Manage {
            return ValidationResult::Valid;
        }

        let caller_org_id = claims.as_ref().and_then(|claims| claims.org_id());
        if caller_org_id == Some(resource_id) {
            ValidationResult::Valid
        } else {
            ValidationResult::access_denied(ORGANIZATION_ACCESS_DENIED_MESSAGE)
        }
    }
}
