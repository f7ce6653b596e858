// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication routes: register, login, logout, refresh, me.
//!
//! Sessions are a pair of HTTP-only cookies. The access cookie covers
//! every path; the refresh cookie is scoped to this auth subtree so it
//! only travels when a new pair is being minted.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::auth::{ACCESS_COOKIE, REFRESH_COOKIE};
use crate::services::tokens::{ACCESS_TTL_MINUTES, REFRESH_TTL_DAYS};
use crate::services::{hash_password, verify_password};
use crate::AppState;

/// The refresh cookie only travels to the auth subtree.
const REFRESH_COOKIE_PATH: &str = "/api/auth";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/me", get(me))
}

/// Register/login payload (one schema for both, as the fields agree).
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthOkResponse {
    pub ok: bool,
    pub user: AuthUserInfo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthUserInfo {
    pub email: String,
}

// ─── Cookie helpers ──────────────────────────────────────────

fn session_cookie(
    name: &'static str,
    value: String,
    path: &'static str,
    max_age: time::Duration,
    config: &Config,
) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path(path);
    cookie.set_http_only(true);
    cookie.set_max_age(max_age);
    // Cross-site frontends need SameSite=None, which browsers only accept
    // together with Secure.
    if config.cookie_secure {
        cookie.set_secure(true);
        cookie.set_same_site(SameSite::None);
    } else {
        cookie.set_same_site(SameSite::Lax);
    }
    cookie
}

/// Sign a fresh token pair and add both cookies to the jar.
fn issue_session_cookies(
    jar: CookieJar,
    state: &AppState,
    sub: &str,
    email: &str,
) -> Result<CookieJar> {
    let access = state.tokens.issue_access(sub, email)?;
    let refresh = state.tokens.issue_refresh(sub, email)?;

    Ok(jar
        .add(session_cookie(
            ACCESS_COOKIE,
            access,
            "/",
            time::Duration::minutes(ACCESS_TTL_MINUTES),
            &state.config,
        ))
        .add(session_cookie(
            REFRESH_COOKIE,
            refresh,
            REFRESH_COOKIE_PATH,
            time::Duration::days(REFRESH_TTL_DAYS),
            &state.config,
        )))
}

/// Expire both cookies with the same attributes they were created with.
fn clear_session_cookies(jar: CookieJar, config: &Config) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_COOKIE,
        String::new(),
        "/",
        time::Duration::ZERO,
        config,
    ))
    .add(session_cookie(
        REFRESH_COOKIE,
        String::new(),
        REFRESH_COOKIE_PATH,
        time::Duration::ZERO,
        config,
    ))
}

// ─── Handlers ────────────────────────────────────────────────

/// Parse the credentials body by hand so schema violations surface as
/// our 400 payload error instead of axum's 422 rejection.
fn parse_credentials(value: serde_json::Value) -> Result<CredentialsRequest> {
    let mut payload: CredentialsRequest = serde_json::from_value(value)
        .map_err(|_| AppError::BadRequest("Invalid payload".to_string()))?;
    payload.email = payload.email.trim().to_lowercase();
    payload
        .validate()
        .map_err(|_| AppError::BadRequest("Invalid payload".to_string()))?;
    Ok(payload)
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<serde_json::Value>,
) -> Result<(CookieJar, Json<AuthOkResponse>)> {
    let payload = parse_credentials(body)?;

    if state
        .db
        .find_user_by_email(&payload.email)
        .await?
        .is_some()
    {
        tracing::warn!(email = %payload.email, "Registration with taken email");
        return Err(AppError::Conflict("Email already used".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = state.db.insert_user(&payload.email, &password_hash).await?;
    let sub = user
        .id
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Inserted user has no id")))?
        .to_hex();

    let jar = issue_session_cookies(jar, &state, &sub, &user.email)?;

    tracing::info!(email = %user.email, "User registered");
    Ok((
        jar,
        Json(AuthOkResponse {
            ok: true,
            user: AuthUserInfo { email: user.email },
        }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<serde_json::Value>,
) -> Result<(CookieJar, Json<AuthOkResponse>)> {
    let payload = parse_credentials(body)?;

    // Unknown email and wrong password are deliberately the same failure.
    let user = state
        .db
        .find_user_by_email(&payload.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        tracing::warn!(email = %user.email, "Login with invalid password");
        return Err(AppError::Unauthorized);
    }

    let sub = user
        .id
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Stored user has no id")))?
        .to_hex();

    let jar = issue_session_cookies(jar, &state, &sub, &user.email)?;

    tracing::info!(email = %user.email, "User logged in");
    Ok((
        jar,
        Json(AuthOkResponse {
            ok: true,
            user: AuthUserInfo { email: user.email },
        }),
    ))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<OkResponse>) {
    let jar = clear_session_cookies(jar, &state.config);
    (jar, Json(OkResponse { ok: true }))
}

/// Mint a new token pair from a valid refresh cookie.
///
/// The claims already carry the subject and email, so rotation is a pure
/// token operation with no database read.
async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<OkResponse>)> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    let claims = state.tokens.verify_refresh(&token)?;
    let jar = issue_session_cookies(jar, &state, &claims.sub, &claims.email)?;

    Ok((jar, Json(OkResponse { ok: true })))
}

/// Report the current session. The token is verified, not merely
/// checked for presence.
async fn me(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<AuthOkResponse>> {
    let token = jar
        .get(ACCESS_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    let claims = state.tokens.verify_access(&token)?;

    Ok(Json(AuthOkResponse {
        ok: true,
        user: AuthUserInfo {
            email: claims.email,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_dev_attributes() {
        let config = Config::default();
        let cookie = session_cookie(
            ACCESS_COOKIE,
            "token".to_string(),
            "/",
            time::Duration::minutes(ACCESS_TTL_MINUTES),
            &config,
        );

        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_session_cookie_secure_attributes() {
        let config = Config {
            cookie_secure: true,
            ..Config::default()
        };
        let cookie = session_cookie(
            REFRESH_COOKIE,
            "token".to_string(),
            REFRESH_COOKIE_PATH,
            time::Duration::days(REFRESH_TTL_DAYS),
            &config,
        );

        assert_eq!(cookie.path(), Some("/api/auth"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }
}
