use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state, map_response};
use axum::routing::{any, get};
use orgreg_core::AppError;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::audit_trail::label_activity;
use crate::error::panic_response;
use crate::handlers::organizations::RETRIEVE_ORGANIZATION_ACTIVITY;
use crate::handlers::profile::RETRIEVE_PRINCIPAL_ACTIVITY;
use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let api_routes = Router::new()
        .route(
            "/api/orgs/my-organization",
            get(handlers::organizations::my_organization_handler)
                .layer(from_fn(middleware::require_org_scope))
                .layer(map_response(label_activity(RETRIEVE_ORGANIZATION_ACTIVITY))),
        )
        .route(
            "/api/me",
            get(handlers::profile::me_handler)
                .layer(map_response(label_activity(RETRIEVE_PRINCIPAL_ACTIVITY))),
        )
        .route(
            "/api/{*path}",
            any(handlers::fallback::unknown_api_route_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(audited(api_routes, &app_state))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}

/// Wraps routes in the authentication gate, panic recovery and the audit trail.
///
/// Layer order, outermost first: audit, panic recovery, authentication.
pub fn audited(routes: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    routes
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_bearer_auth,
        ))
        .route_layer(CatchPanicLayer::custom(panic_response))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::audit_requests,
        ))
}
