use std::env;

use crate::{models::PublicConfig, navigation::RoutePaths};

/// AppConfig
///
/// Holds the service's entire configuration. Immutable once loaded and pulled
/// into handlers and extractors via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the dev bypass and log format.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Postgres connection string. Optional in local, where an in-memory directory stands in.
    pub db_url: Option<String>,
    // HS256 secret used to verify incoming session tokens.
    pub jwt_secret: String,
    // Name of the cookie carrying the session token for browser navigations.
    pub session_cookie: String,
    // Ambient values exposed to the front-end.
    pub app_name: String,
    pub api_base_url: String,
    pub asset_host: String,
    // Where each navigation target lives.
    pub routes: RoutePaths,
}

/// Env
///
/// Runtime context. `Local` enables development conveniences (x-user-id bypass,
/// in-memory directory, pretty logs); `Production` demands every secret explicitly.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const LOCAL_JWT_SECRET: &str = "super-secure-test-secret-value-local";

impl Default for AppConfig {
    /// Safe, non-panicking values for test setup.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "0.0.0.0:3000".to_string(),
            db_url: None,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            session_cookie: "session_token".to_string(),
            app_name: "Dashboard".to_string(),
            api_base_url: "http://localhost:3000".to_string(),
            asset_host: "localhost".to_string(),
            routes: RoutePaths::default(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads every parameter from the environment.
    ///
    /// # Panics
    /// Panics if a variable required for the current environment is missing. In
    /// production that is `DATABASE_URL`, `JWT_SECRET`, `APP_NAME`, `API_BASE_URL`
    /// and `ASSET_HOST`.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let defaults = Self::default();

        // Route paths and transport settings have the same defaults everywhere.
        let routes = RoutePaths {
            login: env::var("LOGIN_PATH").unwrap_or(defaults.routes.login),
            admin: env::var("ADMIN_PATH").unwrap_or(defaults.routes.admin),
            user_dashboard: env::var("DASHBOARD_PATH").unwrap_or(defaults.routes.user_dashboard),
        };
        let bind_addr = env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let session_cookie = env::var("SESSION_COOKIE").unwrap_or(defaults.session_cookie);

        match env {
            Env::Local => Self {
                env: Env::Local,
                bind_addr,
                db_url: env::var("DATABASE_URL").ok(),
                jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
                session_cookie,
                app_name: env::var("APP_NAME").unwrap_or(defaults.app_name),
                api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
                asset_host: env::var("ASSET_HOST").unwrap_or(defaults.asset_host),
                routes,
            },
            Env::Production => Self {
                env: Env::Production,
                bind_addr,
                db_url: Some(
                    env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod"),
                ),
                jwt_secret: env::var("JWT_SECRET")
                    .expect("FATAL: JWT_SECRET must be set in production."),
                session_cookie,
                app_name: env::var("APP_NAME").expect("FATAL: APP_NAME required in prod"),
                api_base_url: env::var("API_BASE_URL")
                    .expect("FATAL: API_BASE_URL required in prod"),
                asset_host: env::var("ASSET_HOST").expect("FATAL: ASSET_HOST required in prod"),
                routes,
            },
        }
    }

    /// The subset of configuration that may be shown to the browser.
    pub fn public(&self) -> PublicConfig {
        PublicConfig {
            app_name: self.app_name.clone(),
            api_base_url: self.api_base_url.clone(),
            asset_host: self.asset_host.clone(),
        }
    }
}
