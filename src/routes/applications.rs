// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application CRUD routes.
//!
//! The auth middleware is applied in routes/mod.rs; every handler gets
//! the verified owner from request extensions and every store call is
//! filtered by it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::application::parse_rfc3339;
use crate::models::{Application, ApplicationPatch, ApplicationStatus};
use crate::routes::auth::OkResponse;
use crate::time_utils::format_bson_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/applications",
            get(list_applications).post(create_application),
        )
        .route(
            "/api/applications/{id}",
            put(update_application).delete(delete_application),
        )
}

/// Creation payload. Company and role are required; everything else
/// falls back to the documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    /// RFC3339 instant, or null/absent for none
    #[serde(default)]
    pub next_action_at: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Application as returned over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: String,
    pub company: String,
    pub role: String,
    pub location: String,
    pub link: String,
    pub salary_range: String,
    pub status: ApplicationStatus,
    pub next_action_at: Option<String>,
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Application> for ApplicationResponse {
    fn from(app: Application) -> Self {
        Self {
            id: app.id.map(|id| id.to_hex()).unwrap_or_default(),
            company: app.company,
            role: app.role,
            location: app.location,
            link: app.link,
            salary_range: app.salary_range,
            status: app.status,
            next_action_at: app.next_action_at.map(format_bson_rfc3339),
            notes: app.notes,
            created_at: format_bson_rfc3339(app.created_at),
            updated_at: format_bson_rfc3339(app.updated_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationList {
    pub items: Vec<ApplicationResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationItem {
    pub item: ApplicationResponse,
}

/// An unparseable id cannot name an existing application, and a missing
/// application is indistinguishable from one owned by someone else.
fn parse_application_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::NotFound("Application not found".to_string()))
}

async fn list_applications(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApplicationList>> {
    let items = state
        .db
        .list_applications(user.id)
        .await?
        .into_iter()
        .map(ApplicationResponse::from)
        .collect();

    Ok(Json(ApplicationList { items }))
}

async fn create_application(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<ApplicationItem>)> {
    // Parsed by hand so schema violations surface as our 400 payload
    // error instead of axum's 422 rejection.
    let payload: CreateApplicationRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Invalid payload".to_string()))?;
    payload
        .validate()
        .map_err(|_| AppError::BadRequest("Invalid payload".to_string()))?;

    let next_action_at = payload
        .next_action_at
        .as_deref()
        .map(parse_rfc3339)
        .transpose()?;

    let now = DateTime::now();
    let application = Application {
        id: None,
        user_id: user.id,
        company: payload.company,
        role: payload.role,
        location: payload.location,
        link: payload.link,
        salary_range: payload.salary_range,
        status: payload.status,
        next_action_at,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    };

    let created = state.db.insert_application(application).await?;
    tracing::debug!(owner = %user.id, id = ?created.id, "Application created");

    Ok((
        StatusCode::CREATED,
        Json(ApplicationItem {
            item: created.into(),
        }),
    ))
}

async fn update_application(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ApplicationItem>> {
    let id = parse_application_id(&id)?;
    let patch: ApplicationPatch = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Invalid payload".to_string()))?;
    let set = patch.into_update_document()?;

    let updated = state
        .db
        .update_application(user.id, id, set)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    Ok(Json(ApplicationItem {
        item: updated.into(),
    }))
}

async fn delete_application(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>> {
    let id = parse_application_id(&id)?;

    if !state.db.delete_application(user.id, id).await? {
        return Err(AppError::NotFound("Application not found".to_string()));
    }

    Ok(Json(OkResponse { ok: true }))
}
