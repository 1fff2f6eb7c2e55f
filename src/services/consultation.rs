//! Consultation service
//!
//! Scheduling and listing of coaching consultations. The owner id on every
//! row comes from the authenticated session; there is no update or cancel
//! operation.

use crate::models::{Consultation, NewConsultation};
use crate::store::ConsultationRepository;
use anyhow::Context;
use std::sync::Arc;

/// Error types for consultation service operations
#[derive(Debug, thiserror::Error)]
pub enum ConsultationServiceError {
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Consultation service
pub struct ConsultationService {
    repo: Arc<dyn ConsultationRepository>,
}

impl ConsultationService {
    /// Create a new consultation service
    pub fn new(repo: Arc<dyn ConsultationRepository>) -> Self {
        Self { repo }
    }

    /// Persist a new consultation for its owner
    pub async fn schedule(
        &self,
        input: NewConsultation,
    ) -> Result<Consultation, ConsultationServiceError> {
        let created = self
            .repo
            .create(input)
            .await
            .context("Failed to create consultation")?;

        tracing::debug!(
            consultation_id = created.id,
            user_id = created.user_id,
            "consultation scheduled"
        );

        Ok(created)
    }

    /// List the caller's consultations in insertion order
    pub async fn list_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Consultation>, ConsultationServiceError> {
        let consultations = self
            .repo
            .list_by_user(user_id)
            .await
            .context("Failed to list consultations")?;

        Ok(consultations)
    }
}
