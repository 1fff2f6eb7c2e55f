//! Progress entry model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single weight-progress measurement recorded by a user.
///
/// Entries are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Owning user ID
    pub user_id: i64,
    /// Measurement date
    pub date: DateTime<Utc>,
    /// Body weight, if recorded
    pub weight: Option<i32>,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Input for creating a progress entry. The owner id comes from the
/// authenticated session, never from the request body.
#[derive(Debug, Clone)]
pub struct NewProgressEntry {
    pub user_id: i64,
    pub date: DateTime<Utc>,
    pub weight: Option<i32>,
    pub notes: Option<String>,
}
