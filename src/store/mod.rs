//! Entity store
//!
//! Repository traits and the in-memory implementations backing them.
//! Each trait defines the data-access interface for one entity kind; the
//! store object is constructed once at process start and injected into the
//! services, so a persistent backend can replace the in-memory one without
//! touching business logic.
//!
//! Identifiers are assigned by the store: a per-kind counter starting at 1,
//! incremented on every create, never reused within a running process.

pub mod memory;
pub mod session;

use crate::models::{
    Consultation, NewConsultation, NewProgressEntry, NewUser, ProgressEntry, User,
};
use anyhow::Result;
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use session::{MemorySessionRepository, SessionRepository};

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user, assigning the next user id
    async fn create(&self, user: NewUser) -> Result<User>;

    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Get user by username (first match by equality)
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Update a user in place (package assignment)
    async fn update(&self, user: &User) -> Result<User>;

    /// List all users in id order
    async fn list_all(&self) -> Result<Vec<User>>;

    /// Count total users
    async fn count(&self) -> Result<i64>;

    /// Delete a user and every progress and consultation row owned by them.
    ///
    /// The cascade runs under a single write lock: no row owned by the user
    /// can be created or observed between the user removal and the cascade.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Consultation repository trait
#[async_trait]
pub trait ConsultationRepository: Send + Sync {
    /// Create a new consultation, assigning the next consultation id
    async fn create(&self, consultation: NewConsultation) -> Result<Consultation>;

    /// List a user's consultations in insertion order
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Consultation>>;
}

/// Progress repository trait
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Create a new progress entry, assigning the next progress id
    async fn create(&self, entry: NewProgressEntry) -> Result<ProgressEntry>;

    /// List a user's progress entries in insertion order
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<ProgressEntry>>;
}
