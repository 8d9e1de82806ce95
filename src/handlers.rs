use crate::{
    config::AppConfig,
    models::{NavigationDecision, PublicConfig, Session},
    navigation, navigator,
    session::{AuthUser, CurrentSession},
};
use axum::{Json, extract::State, response::Redirect};

// --- Handlers ---

/// dashboard
///
/// [Public Route] The dashboard router itself. Signed-out callers are sent to the
/// login page, admins to the admin area, everyone else to the user dashboard.
///
/// *Replace semantics*: answered with `303 See Other`, so the browser never keeps
/// `/dashboard` in its history and "back" does not bounce through the router.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses((status = 303, description = "Redirect to the caller's landing page"))
)]
pub async fn dashboard(
    CurrentSession(session): CurrentSession,
    State(config): State<AppConfig>,
) -> Redirect {
    let target = navigation::decide(session.as_ref());
    tracing::info!(
        destination = ?target,
        authenticated = session.is_some(),
        "dashboard redirect"
    );
    navigator::redirect_for(target, &config.routes)
}

/// dashboard_target
///
/// [Public Route] Same decision as [`dashboard`], returned as JSON for single-page
/// clients that navigate on their own.
#[utoipa::path(
    get,
    path = "/dashboard/target",
    responses((status = 200, description = "Navigation decision", body = NavigationDecision))
)]
pub async fn dashboard_target(
    CurrentSession(session): CurrentSession,
    State(config): State<AppConfig>,
) -> Json<NavigationDecision> {
    Json(navigation::decision(session.as_ref(), &config.routes))
}

/// get_me
///
/// [Authenticated Route] The caller's resolved session.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn get_me(AuthUser(session): AuthUser) -> Json<Session> {
    Json(session)
}

/// get_public_config
///
/// [Public Route] Application name, API base URL and asset host for the front-end.
#[utoipa::path(
    get,
    path = "/config",
    responses((status = 200, description = "Public configuration", body = PublicConfig))
)]
pub async fn get_public_config(State(config): State<AppConfig>) -> Json<PublicConfig> {
    Json(config.public())
}

/// health
///
/// [Public Route] Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    "ok"
}
