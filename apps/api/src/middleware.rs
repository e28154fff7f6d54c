use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use orgreg_core::{AppError, Principal};
use tracing::debug;

use crate::audit_trail::{AuditActivity, AuditNote, PendingAudit};
use crate::error::ApiResult;
use crate::state::AppState;

/// Scopes admitted by organization routes.
pub const ORGANIZATION_SCOPES: [&str; 2] = ["org.manage", "org.view"];

/// Message returned when the caller lacks every admitted scope.
pub const INSUFFICIENT_SCOPE_MESSAGE: &str = "Access Denied. Insufficient scope.";

pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Records exactly one audit entry per request, including rejected ones.
pub async fn audit_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let record = state.audit_recorder.begin(
        "",
        request.uri().path(),
        request.method().as_str(),
    );
    let pending = PendingAudit::new(
        state.audit_recorder.clone(),
        record,
        authorization_header(request.headers()).map(ToOwned::to_owned),
    );

    let response = next.run(request).await;

    let status = response.status();
    let activity = response.extensions().get::<AuditActivity>().copied();
    let message = response
        .extensions()
        .get::<AuditNote>()
        .map(|note| note.0.clone())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_owned());

    pending.complete(activity, status.as_u16(), &message).await;
    response
}

/// Authentication gate: admits the request only with a confirmed principal.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let header = authorization_header(request.headers()).map(ToOwned::to_owned);
    let principal = state
        .authentication_service
        .authenticate(header.as_deref())
        .await
        .map_err(|failure| {
            debug!(reason = %failure, "request not authenticated");
            AppError::from(failure)
        })?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

pub async fn require_org_scope(request: Request, next: Next) -> ApiResult<Response> {
    let principal = request
        .extensions()
        .get::<Principal>()
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    if !ORGANIZATION_SCOPES
        .iter()
        .any(|scope| principal.has_scope(scope))
    {
        return Err(AppError::Forbidden(INSUFFICIENT_SCOPE_MESSAGE.to_owned()).into());
    }

    Ok(next.run(request).await)
}
