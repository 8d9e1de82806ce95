use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    directory::DirectoryState,
    models::Session,
};

/// Claims
///
/// Payload expected inside a session JWT. Tokens are issued by the external
/// authentication service; this crate only verifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id, used to look up the current role in the directory.
    pub sub: Uuid,
    /// Expiration time, always validated.
    pub exp: usize,
    /// Issued at.
    pub iat: usize,
}

/// AuthUser
///
/// Extractor for routes that require a signed-in caller. Rejects with
/// `401 Unauthorized` when no session can be resolved.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Session);

/// CurrentSession
///
/// Extractor for routes where being signed out is a normal input. Never rejects:
/// every failure to resolve a session is reported as `None`.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

/// resolve_session
///
/// Works out who is calling, in order:
/// 1. `Env::Local` only: an `x-user-id` header naming a user in the directory.
/// 2. An `Authorization: Bearer` token.
/// 3. The session cookie named by `config.session_cookie`.
///
/// A token is only accepted if it verifies against `config.jwt_secret`, has not
/// expired, and its subject still exists in the directory.
pub async fn resolve_session(
    parts: &Parts,
    directory: &DirectoryState,
    config: &AppConfig,
) -> Option<Session> {
    if config.env == Env::Local {
        if let Some(user_id) = bypass_user_id(parts) {
            if let Some(user) = directory.get_user(user_id).await {
                return Some(user.into());
            }
        }
        // A bad or unknown bypass id falls through to the token flow.
    }

    let token = bearer_token(parts).or_else(|| cookie_token(parts, &config.session_cookie))?;
    let claims = verify_token(&token, &config.jwt_secret)?;

    match directory.get_user(claims.sub).await {
        Some(user) => Some(user.into()),
        None => {
            tracing::debug!(user_id = %claims.sub, "token subject not found in directory");
            None
        }
    }
}

fn bypass_user_id(parts: &Parts) -> Option<Uuid> {
    let raw = parts.headers.get("x-user-id")?.to_str().ok()?;
    Uuid::parse_str(raw).ok()
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn cookie_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Decodes and validates a session token. Expired, forged and malformed tokens
/// all yield `None`.
pub fn verify_token(token: &str, secret: &str) -> Option<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("session token expired"),
                other => tracing::debug!(reason = ?other, "session token rejected"),
            }
            None
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    DirectoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let directory = DirectoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        resolve_session(parts, &directory, &config)
            .await
            .map(AuthUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    DirectoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let directory = DirectoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        Ok(CurrentSession(
            resolve_session(parts, &directory, &config).await,
        ))
    }
}
