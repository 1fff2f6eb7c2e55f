//! User model
//!
//! This module defines the User entity for the fitcoach backend.
//!
//! Users are created at registration and mutated only by admin package
//! assignment or deletion. Deleting a user cascades to their progress
//! entries, consultations and sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered account.
///
/// The `is_admin` flag gates the admin user-management endpoints. Package
/// fields describe the coaching tier currently assigned to the user, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Email address
    pub email: String,
    /// Administrator flag
    pub is_admin: bool,
    /// Optional phone number
    pub phone: Option<String>,
    /// Identifier of the assigned coaching package, if any
    pub current_package: Option<String>,
    /// Start of the assigned package period
    pub package_start_date: Option<DateTime<Utc>>,
    /// End of the assigned package period
    pub package_end_date: Option<DateTime<Utc>>,
}

/// Input for creating a new user.
///
/// The password must already be hashed before this reaches the store.
/// Use `services::password::hash_password()` to hash it.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub is_admin: bool,
    pub phone: Option<String>,
}

impl User {
    /// Build a user from its creation input and an assigned id.
    pub fn from_new(id: i64, input: NewUser) -> Self {
        Self {
            id,
            username: input.username,
            password_hash: input.password_hash,
            email: input.email,
            is_admin: input.is_admin,
            phone: input.phone,
            current_package: None,
            package_start_date: None,
            package_end_date: None,
        }
    }
}
