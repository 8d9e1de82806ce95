use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// The router core: decision function and navigation collaborator.
pub mod navigation;
pub mod navigator;
pub mod watcher;

// Session resolution and the user records behind it.
pub mod directory;
pub mod session;

pub mod config;
pub mod handlers;
pub mod models;

pub mod routes;
use routes::{authenticated, public};
use session::AuthUser;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use directory::{DirectoryState, InMemoryUserDirectory, PostgresUserDirectory};
pub use navigation::{NavigationMode, NavigationTarget, RoutePaths, decide};

/// ApiDoc
///
/// OpenAPI document for every HTTP route, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::dashboard, handlers::dashboard_target, handlers::get_me,
        handlers::get_public_config, handlers::health
    ),
    components(
        schemas(
            models::Session, models::NavigationDecision, models::PublicConfig,
            navigation::NavigationTarget,
        )
    ),
    tags(
        (name = "dashboard-router", description = "Role-based landing page dispatch")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state handed to every request: the user directory behind the
/// session provider and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pub directory: DirectoryState,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for DirectoryState {
    fn from_ref(app_state: &AppState) -> DirectoryState {
        app_state.directory.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Runs the `AuthUser` extractor ahead of the handler; an unresolved session is
/// rejected with 401 before any handler code executes.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles every route, the authentication layer, request tracing and CORS.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                // Every request gets a UUID before the trace span is opened.
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: method, URI and the `x-request-id` so every log
/// line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
