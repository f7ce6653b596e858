// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Job application model: stored document, status enum, and the
//! merge-patch type used by partial updates.

use mongodb::bson::{oid::ObjectId, Bson, DateTime, Document};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, Result};

/// Where an application sits in the hiring pipeline.
///
/// The pipeline is advisory: any status may move to any other. No
/// transition table exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interview,
    Offer,
    Rejected,
}

/// Application record stored in the `applications` collection.
///
/// Owned by exactly one user; every read and write is filtered by
/// `user_id` equality against the session subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub next_action_at: Option<DateTime>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Partial update for an application. Only fields present in the JSON
/// body are applied; `nextActionAt` additionally distinguishes an absent
/// field (unchanged) from an explicit `null` (cleared).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub next_action_at: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Deserialize a field so that an explicit `null` becomes `Some(None)`
/// while an absent field stays `None` (via the `default`).
fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ApplicationPatch {
    /// Build the `$set` document for this patch.
    ///
    /// Validates that company/role, when present, stay non-empty and that
    /// `nextActionAt`, when set, is a well-formed RFC3339 instant.
    pub fn into_update_document(self) -> Result<Document> {
        let mut set = Document::new();

        if let Some(company) = self.company {
            if company.is_empty() {
                return Err(AppError::BadRequest("Invalid payload".to_string()));
            }
            set.insert("company", company);
        }
        if let Some(role) = self.role {
            if role.is_empty() {
                return Err(AppError::BadRequest("Invalid payload".to_string()));
            }
            set.insert("role", role);
        }
        if let Some(location) = self.location {
            set.insert("location", location);
        }
        if let Some(link) = self.link {
            set.insert("link", link);
        }
        if let Some(salary_range) = self.salary_range {
            set.insert("salary_range", salary_range);
        }
        if let Some(status) = self.status {
            set.insert(
                "status",
                mongodb::bson::to_bson(&status)
                    .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?,
            );
        }
        if let Some(next_action_at) = self.next_action_at {
            match next_action_at {
                Some(raw) => set.insert("next_action_at", parse_rfc3339(&raw)?),
                None => set.insert("next_action_at", Bson::Null),
            };
        }
        if let Some(notes) = self.notes {
            set.insert("notes", notes);
        }

        Ok(set)
    }
}

/// Parse an RFC3339 instant from a request payload into a BSON timestamp.
pub fn parse_rfc3339(raw: &str) -> Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| DateTime::from_millis(dt.timestamp_millis()))
        .map_err(|_| AppError::BadRequest("Invalid payload".to_string()))
}
