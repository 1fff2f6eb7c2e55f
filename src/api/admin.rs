//! Admin API endpoints
//!
//! Handles HTTP requests for the admin user-management panel:
//! - GET /api/admin/users - List every user
//! - DELETE /api/admin/users/{id} - Delete a user and all their data
//!
//! Both routes sit behind the auth and admin middleware; an authenticated
//! non-admin receives the same 401 as an anonymous caller.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::User;

/// GET /api/admin/users - List all users
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .user_service
        .list_users()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(users))
}

/// DELETE /api/admin/users/{id} - Delete a user account
///
/// Destroys the target's sessions first, then the user row together with
/// their progress and consultation rows. Deleting an id that does not exist
/// is still a 200; any internal failure surfaces as a generic 500.
pub async fn delete_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .delete_account(id)
        .await
        .map_err(|_| ApiError::internal_error("Failed to delete user"))?;

    Ok(StatusCode::OK)
}
