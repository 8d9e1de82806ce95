use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Routes that only make sense for a signed-in caller. The `auth_middleware` layer
/// applied in `create_router` rejects anonymous requests before they reach a handler.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /me
        // The caller's session as the router sees it (id, email, role).
        .route("/me", get(handlers::get_me))
}
