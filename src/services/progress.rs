//! Progress service
//!
//! Recording and listing of weight-progress entries. Entries are immutable
//! once stored.

use crate::models::{NewProgressEntry, ProgressEntry};
use crate::store::ProgressRepository;
use anyhow::Context;
use std::sync::Arc;

/// Error types for progress service operations
#[derive(Debug, thiserror::Error)]
pub enum ProgressServiceError {
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Progress service
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    /// Create a new progress service
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    /// Persist a new progress entry for its owner
    pub async fn record(
        &self,
        input: NewProgressEntry,
    ) -> Result<ProgressEntry, ProgressServiceError> {
        let created = self
            .repo
            .create(input)
            .await
            .context("Failed to create progress entry")?;

        tracing::debug!(
            entry_id = created.id,
            user_id = created.user_id,
            "progress entry recorded"
        );

        Ok(created)
    }

    /// List the caller's progress entries in insertion order
    pub async fn list_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ProgressEntry>, ProgressServiceError> {
        let entries = self
            .repo
            .list_by_user(user_id)
            .await
            .context("Failed to list progress entries")?;

        Ok(entries)
    }
}
