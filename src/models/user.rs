//! User model for storage.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// User account stored in the `users` collection.
///
/// The email is the identity key: it is trimmed and lowercased before any
/// lookup or insert, and a unique index keeps it one-per-account. Only the
/// bcrypt hash of the password is ever stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime,
}
