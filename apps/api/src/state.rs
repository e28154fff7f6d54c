use std::sync::Arc;

use orgreg_application::{
    AuditRecorder, AuthenticationService, InstanceAccessPolicy, OrganizationService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authentication_service: AuthenticationService,
    pub audit_recorder: AuditRecorder,
    pub organization_access_policy: Arc<dyn InstanceAccessPolicy>,
    pub organization_service: OrganizationService,
    pub postgres_pool: PgPool,
}
