use dashboard_router::{
    AppConfig, AppState, create_router,
    directory::{DirectoryState, InMemoryUserDirectory},
    models::{PublicConfig, User},
    session::Claims,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::{sync::Arc, time::SystemTime};
use tokio::net::TcpListener;
use uuid::Uuid;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
    pub config: AppConfig,
}

const ADMIN_ID: Uuid = Uuid::from_u128(0xA);
const MEMBER_ID: Uuid = Uuid::from_u128(0xB);

async fn spawn_app() -> TestApp {
    let directory = Arc::new(InMemoryUserDirectory::with_users([
        User {
            id: ADMIN_ID,
            email: "admin@example.com".to_string(),
            role: Some("admin".to_string()),
        },
        User {
            id: MEMBER_ID,
            email: "member@example.com".to_string(),
            role: Some("member".to_string()),
        },
    ])) as DirectoryState;

    let config = AppConfig {
        app_name: "Test Portal".to_string(),
        api_base_url: "http://api.test".to_string(),
        asset_host: "assets.test".to_string(),
        ..AppConfig::default()
    };

    let router = create_router(AppState {
        directory,
        config: config.clone(),
    });

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address, config }
}

/// Client that reports redirects instead of following them.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn token_for(user_id: Uuid, secret: &str) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let claims = Claims {
        sub: user_id,
        iat: now as usize,
        exp: (now + 600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let response = client()
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_dashboard_redirect_over_http() {
    let app = spawn_app().await;
    let client = client();

    // Anonymous
    let response = client
        .get(format!("{}/dashboard", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/login");

    // Admin via bearer token
    let response = client
        .get(format!("{}/dashboard", app.address))
        .bearer_auth(token_for(ADMIN_ID, &app.config.jwt_secret))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/admin");

    // Member via session cookie
    let response = client
        .get(format!("{}/dashboard", app.address))
        .header(
            "cookie",
            format!(
                "{}={}",
                app.config.session_cookie,
                token_for(MEMBER_ID, &app.config.jwt_secret)
            ),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/dashboard/user");
}

#[tokio::test]
async fn test_dashboard_target_json_over_http() {
    let app = spawn_app().await;
    let response = client()
        .get(format!("{}/dashboard/target", app.address))
        .bearer_auth(token_for(ADMIN_ID, &app.config.jwt_secret))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["target"], "admin");
    assert_eq!(body["path"], "/admin");
    assert_eq!(body["replace"], true);
}

#[tokio::test]
async fn test_public_config_over_http() {
    let app = spawn_app().await;
    let response = client()
        .get(format!("{}/config", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let public: PublicConfig = response.json().await.unwrap();
    assert_eq!(public, app.config.public());
    assert_eq!(public.app_name, "Test Portal");
}
