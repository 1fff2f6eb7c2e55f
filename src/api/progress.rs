//! Progress API endpoints
//!
//! - POST /api/progress - Record a weight-progress entry
//! - GET /api/progress - List the caller's entries
//!
//! Both endpoints require authentication. The owner id on a created row is
//! always the authenticated user; an owner id in the body is ignored.

use axum::{extract::State, Json};
use serde_json::Value;

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::api::validate::{as_object, optional_i32, optional_string, required_timestamp};
use crate::models::{NewProgressEntry, ProgressEntry};

/// Validate a progress body: `date` (timestamp) is required, `weight`
/// (integer) and `notes` default to null. Unknown fields are ignored.
fn parse_new_progress(user_id: i64, body: &Value) -> Result<NewProgressEntry, String> {
    let body = as_object(body)?;

    let date = required_timestamp(body, "date")?;
    let weight = optional_i32(body, "weight")?;
    let notes = optional_string(body, "notes")?;

    Ok(NewProgressEntry {
        user_id,
        date,
        weight,
        notes,
    })
}

/// POST /api/progress - Record a progress entry
pub async fn create_progress(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<Value>,
) -> Result<Json<ProgressEntry>, ApiError> {
    let input = parse_new_progress(user.0.id, &body)
        .map_err(|_| ApiError::validation_error("Invalid progress data"))?;

    let entry = state
        .progress_service
        .record(input)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(entry))
}

/// GET /api/progress - List the caller's progress entries
pub async fn list_progress(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<ProgressEntry>>, ApiError> {
    let entries = state
        .progress_service
        .list_for_user(user.0.id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(entries))
}
