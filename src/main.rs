use dashboard_router::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    directory::{DirectoryState, InMemoryUserDirectory, PostgresUserDirectory},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, initialises logging, connects the user directory and
/// serves HTTP until the process is stopped.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing production values)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dashboard_router=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON lines for the log aggregator.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);
    tracing::info!(
        app_name = %config.app_name,
        api_base_url = %config.api_base_url,
        asset_host = %config.asset_host,
        "Ambient configuration loaded"
    );

    // 3. User directory
    let directory = match &config.db_url {
        Some(db_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(db_url)
                .await
                .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");
            Arc::new(PostgresUserDirectory::new(pool)) as DirectoryState
        }
        None => {
            // Only reachable in Env::Local; production requires DATABASE_URL.
            tracing::warn!("DATABASE_URL not set, using an empty in-memory user directory");
            Arc::new(InMemoryUserDirectory::new()) as DirectoryState
        }
    };

    // 4. Router and server
    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState { directory, config });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener. Check BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
