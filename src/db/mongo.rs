// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MongoDB client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (credential store, unique email)
//! - Applications (owner-scoped CRUD and status projection)
//!
//! Every application operation takes the owner id and folds it into the
//! query filter, so ownership scoping cannot be skipped at a call site.

use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Database, IndexModel};
use std::time::Duration;

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Application, ApplicationStatus, User};

/// MongoDB database client.
#[derive(Clone)]
pub struct MongoDb {
    db: Option<Database>,
}

impl MongoDb {
    /// Connect, verify the connection, and create the indexes the
    /// queries below rely on.
    pub async fn connect(uri: &str) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| AppError::Database(format!("Invalid MongoDB URI: {}", e)))?;

        // Fail fast on an unreachable server instead of the 30s default.
        options.connect_timeout = Some(Duration::from_secs(5));
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(options)
            .map_err(|e| AppError::Database(format!("Failed to build MongoDB client: {}", e)))?;

        let name = database_name_from_uri(uri);
        let db = client.database(&name);

        // Test the connection before serving traffic.
        db.list_collection_names()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        tracing::info!(database = %name, "Connected to MongoDB");

        let mongo = Self { db: Some(db) };
        mongo.ensure_indexes().await?;
        Ok(mongo)
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { db: None }
    }

    /// Helper to get the database or return an error if offline.
    fn database(&self) -> Result<&Database, AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Indexes backing email uniqueness and owner-scoped queries.
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        let users = self.database()?.collection::<User>(collections::USERS);
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        users
            .create_index(email_index)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create email index: {}", e)))?;

        let applications = self
            .database()?
            .collection::<Application>(collections::APPLICATIONS);
        let owner_index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        applications
            .create_index(owner_index)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create owner index: {}", e)))?;

        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Look up a user by normalized email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.database()?
            .collection::<User>(collections::USERS)
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a user. A duplicate email maps to Conflict, whether caught
    /// by the caller's pre-check or by the unique index under a race.
    pub async fn insert_user(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut user = User {
            id: None,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: DateTime::now(),
        };

        let result = self
            .database()?
            .collection::<User>(collections::USERS)
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::Conflict("Email already used".to_string())
                } else {
                    AppError::Database(e.to_string())
                }
            })?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    // ─── Application Operations (owner-scoped) ───────────────────

    /// List the owner's applications, most recently updated first.
    pub async fn list_applications(&self, owner: ObjectId) -> Result<Vec<Application>, AppError> {
        self.database()?
            .collection::<Application>(collections::APPLICATIONS)
            .find(doc! { "user_id": owner })
            .sort(doc! { "updated_at": -1 })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert an application and return it with its generated id.
    pub async fn insert_application(
        &self,
        mut application: Application,
    ) -> Result<Application, AppError> {
        let result = self
            .database()?
            .collection::<Application>(collections::APPLICATIONS)
            .insert_one(&application)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        application.id = result.inserted_id.as_object_id();
        Ok(application)
    }

    /// Apply a `$set` patch to one of the owner's applications and return
    /// the updated document. `None` when the id does not exist or belongs
    /// to another owner; the two cases are indistinguishable by design.
    pub async fn update_application(
        &self,
        owner: ObjectId,
        id: ObjectId,
        mut set: Document,
    ) -> Result<Option<Application>, AppError> {
        set.insert("updated_at", DateTime::now());

        self.database()?
            .collection::<Application>(collections::APPLICATIONS)
            .find_one_and_update(doc! { "_id": id, "user_id": owner }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete one of the owner's applications. `false` when nothing
    /// matched (missing or not owned).
    pub async fn delete_application(&self, owner: ObjectId, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .database()?
            .collection::<Application>(collections::APPLICATIONS)
            .delete_one(doc! { "_id": id, "user_id": owner })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    /// Status-only projection over the owner's applications, for the
    /// analytics summary.
    pub async fn application_statuses(
        &self,
        owner: ObjectId,
    ) -> Result<Vec<ApplicationStatus>, AppError> {
        #[derive(serde::Deserialize)]
        struct StatusOnly {
            status: ApplicationStatus,
        }

        let rows: Vec<StatusOnly> = self
            .database()?
            .collection::<StatusOnly>(collections::APPLICATIONS)
            .find(doc! { "user_id": owner })
            .projection(doc! { "status": 1, "_id": 0 })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.status).collect())
    }

    /// Count the owner's applications (used by the seeder).
    pub async fn count_applications(&self, owner: ObjectId) -> Result<u64, AppError> {
        self.database()?
            .collection::<Application>(collections::APPLICATIONS)
            .count_documents(doc! { "user_id": owner })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Extract the database name from the connection string, defaulting to
/// `jobhunt` when the URI carries no path.
fn database_name_from_uri(uri: &str) -> String {
    uri.splitn(2, "://")
        .nth(1)
        .and_then(|rest| rest.split_once('/'))
        .and_then(|(_, path)| path.split('?').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("jobhunt")
        .to_string()
}

/// True for the E11000 duplicate-key write error.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_err)) if write_err.code == 11000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_name_from_uri() {
        assert_eq!(
            database_name_from_uri("mongodb://localhost:27017/jobhunt"),
            "jobhunt"
        );
        assert_eq!(
            database_name_from_uri("mongodb://user:pw@db.example.com:27017/prod?retryWrites=true"),
            "prod"
        );
        assert_eq!(
            database_name_from_uri("mongodb://localhost:27017"),
            "jobhunt"
        );
        assert_eq!(
            database_name_from_uri("mongodb://localhost:27017/"),
            "jobhunt"
        );
    }

    #[tokio::test]
    async fn test_mock_database_is_offline() {
        let db = MongoDb::new_mock();
        let err = db.find_user_by_email("a@b.c").await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
