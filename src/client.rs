// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed API client.
//!
//! Wraps every call with JSON bodies, an enabled cookie store (so the
//! session cookies set by the auth routes travel on later requests), and
//! uniform error surfacing: any non-2xx response collapses into a single
//! error carrying the server's message, or "HTTP <status>" when the body
//! has none. No retry, no caching, no deduplication.

use serde::{de::DeserializeOwned, Deserialize};

use crate::models::ApplicationPatch;
use crate::routes::applications::{
    ApplicationItem, ApplicationList, ApplicationResponse, CreateApplicationRequest,
};
use crate::routes::auth::{AuthOkResponse, OkResponse};
use crate::routes::HealthResponse;
use crate::services::Summary;

/// Client-side error for API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Error body shape produced by the server.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    details: Option<String>,
}

/// API client for the jobhunt backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    // ─── Auth ────────────────────────────────────────────────

    pub async fn register(&self, email: &str, password: &str) -> Result<AuthOkResponse, ApiError> {
        self.execute(
            self.http
                .post(self.url("/api/auth/register"))
                .json(&serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOkResponse, ApiError> {
        self.execute(
            self.http
                .post(self.url("/api/auth/login"))
                .json(&serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn logout(&self) -> Result<OkResponse, ApiError> {
        self.execute(self.http.post(self.url("/api/auth/logout")))
            .await
    }

    pub async fn refresh(&self) -> Result<OkResponse, ApiError> {
        self.execute(self.http.post(self.url("/api/auth/refresh")))
            .await
    }

    pub async fn me(&self) -> Result<AuthOkResponse, ApiError> {
        self.execute(self.http.get(self.url("/api/auth/me"))).await
    }

    // ─── Applications ────────────────────────────────────────

    pub async fn list_applications(&self) -> Result<Vec<ApplicationResponse>, ApiError> {
        let list: ApplicationList = self
            .execute(self.http.get(self.url("/api/applications")))
            .await?;
        Ok(list.items)
    }

    pub async fn create_application(
        &self,
        payload: &CreateApplicationRequest,
    ) -> Result<ApplicationResponse, ApiError> {
        let item: ApplicationItem = self
            .execute(self.http.post(self.url("/api/applications")).json(payload))
            .await?;
        Ok(item.item)
    }

    pub async fn update_application(
        &self,
        id: &str,
        patch: &ApplicationPatch,
    ) -> Result<ApplicationResponse, ApiError> {
        let item: ApplicationItem = self
            .execute(
                self.http
                    .put(self.url(&format!("/api/applications/{}", id)))
                    .json(patch),
            )
            .await?;
        Ok(item.item)
    }

    pub async fn delete_application(&self, id: &str) -> Result<OkResponse, ApiError> {
        self.execute(
            self.http
                .delete(self.url(&format!("/api/applications/{}", id))),
        )
        .await
    }

    // ─── Analytics / misc ────────────────────────────────────

    pub async fn summary(&self) -> Result<Summary, ApiError> {
        self.execute(self.http.get(self.url("/api/analytics/summary")))
            .await
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.execute(self.http.get(self.url("/health"))).await
    }

    // ─── Plumbing ────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and either deserialize the success body or fold the
    /// failure into an `ApiError::Api`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.details.unwrap_or(body.error))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
