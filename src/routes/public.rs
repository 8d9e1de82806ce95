use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints that accept anonymous callers. Handlers here use `CurrentSession`,
/// never `AuthUser`, so a missing or invalid token is an input rather than a 401.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(handlers::health))
        // GET /config
        // App name, API base URL and asset host for the front-end bundle.
        .route("/config", get(handlers::get_public_config))
        // GET /dashboard
        // Role-based redirect: login, admin area or user dashboard.
        .route("/dashboard", get(handlers::dashboard))
        // GET /dashboard/target
        // The same decision as JSON, for clients that navigate themselves.
        .route("/dashboard/target", get(handlers::dashboard_target))
}
