use std::sync::Arc;

use orgreg_application::{
    AuditRecorder, AuthenticationService, OrganizationAccessPolicy, OrganizationService,
};
use orgreg_core::AppError;
use orgreg_infrastructure::{AuditDeliveryWorker, PostgresOrganizationRepository};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

use super::audit::build_audit_sink;
use super::security::{build_identity_lookup, build_token_codec};

pub async fn build_app_state(
    pool: PgPool,
    config: &ApiConfig,
) -> Result<(AppState, AuditDeliveryWorker), AppError> {
    let token_codec = build_token_codec(config)?;
    let identity_lookup = build_identity_lookup(config)?;
    let (audit_sink, audit_worker) = build_audit_sink(&config.audit).await;

    let app_state = AppState {
        authentication_service: AuthenticationService::new(
            token_codec.clone(),
            identity_lookup,
        ),
        audit_recorder: AuditRecorder::new(
            Arc::new(audit_sink),
            token_codec.clone(),
            config.audit.activity_type_prefix.clone(),
        ),
        organization_access_policy: Arc::new(OrganizationAccessPolicy::new(token_codec)),
        organization_service: OrganizationService::new(Arc::new(
            PostgresOrganizationRepository::new(pool.clone()),
        )),
        postgres_pool: pool,
    };

    Ok((app_state, audit_worker))
}
