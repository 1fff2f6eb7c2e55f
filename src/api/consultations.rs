//! Consultation API endpoints
//!
//! - POST /api/consultations - Schedule a consultation
//! - GET /api/consultations - List the caller's consultations
//!
//! Both endpoints require authentication. The owner id on a created row is
//! always the authenticated user; an owner id in the body is ignored.

use axum::{extract::State, Json};
use serde_json::Value;
use std::str::FromStr;

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::api::validate::{as_object, optional_string, required_string, required_timestamp};
use crate::models::{Consultation, ConsultationStatus, NewConsultation};

/// Validate a consultation body: `scheduledDate` (timestamp) and `status`
/// are required, `notes` defaults to null. Unknown fields are ignored.
fn parse_new_consultation(user_id: i64, body: &Value) -> Result<NewConsultation, String> {
    let body = as_object(body)?;

    let scheduled_date = required_timestamp(body, "scheduledDate")?;
    let status = ConsultationStatus::from_str(&required_string(body, "status")?)
        .map_err(|e| e.to_string())?;
    let notes = optional_string(body, "notes")?;

    Ok(NewConsultation {
        user_id,
        scheduled_date,
        status,
        notes,
    })
}

/// POST /api/consultations - Schedule a consultation
pub async fn create_consultation(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<Value>,
) -> Result<Json<Consultation>, ApiError> {
    let input = parse_new_consultation(user.0.id, &body)
        .map_err(|_| ApiError::validation_error("Invalid consultation data"))?;

    let consultation = state
        .consultation_service
        .schedule(input)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(consultation))
}

/// GET /api/consultations - List the caller's consultations
pub async fn list_consultations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Consultation>>, ApiError> {
    let consultations = state
        .consultation_service
        .list_for_user(user.0.id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(consultations))
}
