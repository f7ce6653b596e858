// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analytics routes.

use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::services::{summarize, Summary};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/analytics/summary", get(summary))
}

/// Summary counts and rates over the caller's applications, recomputed
/// from a status-only projection on every call.
async fn summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Summary>> {
    let statuses = state.db.application_statuses(user.id).await?;
    Ok(Json(summarize(statuses)))
}
