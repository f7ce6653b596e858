// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session middleware: the sole authorization gate.
//!
//! Extracts the access token from its cookie, verifies it, and attaches
//! the verified identity to the request for downstream owner scoping.
//! There is no role or permission model beyond "valid, unexpired session".

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

/// Cookie carrying the short-lived access token (scoped to all paths).
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie carrying the long-lived refresh token (scoped to the auth subtree).
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Authenticated user extracted from a verified access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: ObjectId,
    pub email: String,
}

/// Middleware that requires a valid access-token cookie.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = jar
        .get(ACCESS_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    let claims = state.tokens.verify_access(&token)?;

    let id = ObjectId::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

    request.extensions_mut().insert(AuthUser {
        id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
