//! User service
//!
//! Implements business logic for accounts and authentication:
//! - Registration (username conflicts rejected before anything is stored)
//! - Login/logout with server-side sessions
//! - Session validation and expired-session cleanup
//! - Admin operations: listing every user and deleting an account with its
//!   dependent data

use crate::models::{NewUser, Session, User};
use crate::store::{SessionRepository, UserRepository};
use crate::services::password::{hash_password, verify_password};
use anyhow::Context;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Default session expiration time in days
const DEFAULT_SESSION_EXPIRATION_DAYS: i64 = 7;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// User already exists
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// User service for managing accounts and sessions
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    session_expiration_days: i64,
}

impl UserService {
    /// Create a new user service with the given repositories
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_expiration_days: DEFAULT_SESSION_EXPIRATION_DAYS,
        }
    }

    /// Create a new user service with custom session expiration
    pub fn with_session_expiration(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        session_expiration_days: i64,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_expiration_days,
        }
    }

    /// Register a new user.
    ///
    /// A username that already exists is rejected as a conflict before
    /// anything is written, so a failed registration never mutates the
    /// store. New accounts are never admins.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if username, email or password is unusable
    /// - `UserExists` if the username is already taken
    pub async fn register(&self, input: RegisterInput) -> Result<User, UserServiceError> {
        self.validate_register_input(&input)?;

        if self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to check username")?
            .is_some()
        {
            return Err(UserServiceError::UserExists(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        let password_hash = hash_password(&input.password).context("Failed to hash password")?;

        let created = self
            .user_repo
            .create(NewUser {
                username: input.username,
                password_hash,
                email: input.email,
                is_admin: false,
                phone: input.phone,
            })
            .await
            .context("Failed to create user")?;

        tracing::info!(user_id = created.id, username = %created.username, "user registered");

        Ok(created)
    }

    /// Login with credentials.
    ///
    /// Verifies username and password; on success creates a new session.
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` if the username is unknown or the password
    ///   does not match (indistinguishable to the caller)
    pub async fn login(&self, input: LoginInput) -> Result<Session, UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to get user by username")?
            .ok_or_else(|| {
                UserServiceError::AuthenticationError("Invalid username or password".to_string())
            })?;

        let password_valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;

        if !password_valid {
            return Err(UserServiceError::AuthenticationError(
                "Invalid username or password".to_string(),
            ));
        }

        let session = self.create_session(user.id).await?;
        tracing::info!(user_id = user.id, "user logged in");

        Ok(session)
    }

    /// Logout (invalidate the session)
    pub async fn logout(&self, session_id: &str) -> Result<(), UserServiceError> {
        self.session_repo
            .delete(session_id)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    /// Validate a session token and return the associated user.
    ///
    /// An expired session counts as absent and is deleted on the way out.
    pub async fn validate_session(&self, token: &str) -> Result<Option<User>, UserServiceError> {
        let session = match self
            .session_repo
            .get_by_id(token)
            .await
            .context("Failed to get session")?
        {
            Some(s) => s,
            None => return Ok(None),
        };

        if session.is_expired() {
            let _ = self.session_repo.delete(token).await;
            return Ok(None);
        }

        let user = self
            .user_repo
            .get_by_id(session.user_id)
            .await
            .context("Failed to get user")?;

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>, UserServiceError> {
        let user = self
            .user_repo
            .get_by_id(id)
            .await
            .context("Failed to get user by ID")?;

        Ok(user)
    }

    /// List every user (admin surface)
    pub async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
        let users = self
            .user_repo
            .list_all()
            .await
            .context("Failed to list users")?;

        Ok(users)
    }

    /// Delete a user account and everything attached to it.
    ///
    /// Sessions go first so the account cannot act while its rows are being
    /// removed; the user row then disappears together with its progress and
    /// consultation rows in one store-level cascade.
    pub async fn delete_account(&self, user_id: i64) -> Result<(), UserServiceError> {
        self.session_repo
            .delete_by_user(user_id)
            .await
            .context("Failed to delete user sessions")?;

        self.user_repo
            .delete(user_id)
            .await
            .context("Failed to delete user")?;

        tracing::info!(user_id, "user account deleted");

        Ok(())
    }

    /// Delete all expired sessions.
    ///
    /// Called periodically by the pruning task in `main`.
    pub async fn cleanup_expired_sessions(&self) -> Result<i64, UserServiceError> {
        let count = self
            .session_repo
            .delete_expired()
            .await
            .context("Failed to delete expired sessions")?;

        Ok(count)
    }

    // ========================================================================
    // Private helper methods
    // ========================================================================

    /// Validate registration input
    fn validate_register_input(&self, input: &RegisterInput) -> Result<(), UserServiceError> {
        if input.username.trim().is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }

        if input.email.trim().is_empty() {
            return Err(UserServiceError::ValidationError(
                "Email cannot be empty".to_string(),
            ));
        }

        if input.password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Password cannot be empty".to_string(),
            ));
        }

        // Basic email format validation
        if !input.email.contains('@') {
            return Err(UserServiceError::ValidationError(
                "Invalid email format".to_string(),
            ));
        }

        Ok(())
    }

    /// Create a new session for a user
    async fn create_session(&self, user_id: i64) -> Result<Session, UserServiceError> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id,
            expires_at: now + Duration::days(self.session_expiration_days),
            created_at: now,
        };

        let created = self
            .session_repo
            .create(&session)
            .await
            .context("Failed to create session")?;

        Ok(created)
    }
}

/// Input for user registration
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: Option<String>,
}

impl RegisterInput {
    /// Create a new registration input
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            phone: None,
        }
    }
}

/// Input for user login
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    /// Create a new login input
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewConsultation, NewProgressEntry};
    use crate::store::{
        ConsultationRepository, MemorySessionRepository, MemoryStore, ProgressRepository,
        UserRepository,
    };

    fn setup_service() -> (Arc<MemoryStore>, Arc<MemorySessionRepository>, UserService) {
        let store = Arc::new(MemoryStore::new());
        let sessions = Arc::new(MemorySessionRepository::new());
        let service = UserService::new(store.clone(), sessions.clone());
        (store, sessions, service)
    }

    fn register_input(username: &str) -> RegisterInput {
        RegisterInput::new(username, "hunter2hunter2", format!("{}@example.com", username))
    }

    #[tokio::test]
    async fn test_register_creates_non_admin_user() {
        let (_, _, service) = setup_service();

        let user = service.register(register_input("alice")).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
        assert!(!user.is_admin);
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_duplicate_username_is_conflict() {
        let (store, _, service) = setup_service();

        service.register(register_input("alice")).await.unwrap();
        let result = service.register(register_input("alice")).await;

        assert!(matches!(result, Err(UserServiceError::UserExists(_))));
        // The failed registration wrote nothing.
        assert_eq!(UserRepository::count(store.as_ref()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let (_, _, service) = setup_service();

        let empty_username = RegisterInput::new("", "password", "a@example.com");
        assert!(matches!(
            service.register(empty_username).await,
            Err(UserServiceError::ValidationError(_))
        ));

        let empty_password = RegisterInput::new("bob", "", "bob@example.com");
        assert!(matches!(
            service.register(empty_password).await,
            Err(UserServiceError::ValidationError(_))
        ));

        let bad_email = RegisterInput::new("bob", "password", "not-an-email");
        assert!(matches!(
            service.register(bad_email).await,
            Err(UserServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let (_, _, service) = setup_service();
        let user = service.register(register_input("alice")).await.unwrap();

        let session = service
            .login(LoginInput::new("alice", "hunter2hunter2"))
            .await
            .unwrap();

        assert_eq!(session.user_id, user.id);
        assert!(!session.is_expired());

        let resolved = service.validate_session(&session.id).await.unwrap().unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (_, _, service) = setup_service();
        service.register(register_input("alice")).await.unwrap();

        let wrong_password = service.login(LoginInput::new("alice", "wrong")).await;
        assert!(matches!(
            wrong_password,
            Err(UserServiceError::AuthenticationError(_))
        ));

        let unknown_user = service
            .login(LoginInput::new("nobody", "hunter2hunter2"))
            .await;
        assert!(matches!(
            unknown_user,
            Err(UserServiceError::AuthenticationError(_))
        ));
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let (_, _, service) = setup_service();
        service.register(register_input("alice")).await.unwrap();
        let session = service
            .login(LoginInput::new("alice", "hunter2hunter2"))
            .await
            .unwrap();

        service.logout(&session.id).await.unwrap();

        assert!(service.validate_session(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_counts_as_absent() {
        let (_, sessions, service) = setup_service();
        let user = service.register(register_input("alice")).await.unwrap();

        let now = Utc::now();
        let expired = Session {
            id: "stale-token".to_string(),
            user_id: user.id,
            expires_at: now - Duration::hours(1),
            created_at: now - Duration::days(8),
        };
        sessions.create(&expired).await.unwrap();

        assert!(service.validate_session("stale-token").await.unwrap().is_none());
        // Lazy cleanup removed the stale record.
        assert!(sessions.get_by_id("stale-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_account_removes_everything() {
        let (store, sessions, service) = setup_service();
        let alice = service.register(register_input("alice")).await.unwrap();
        let bob = service.register(register_input("bob")).await.unwrap();

        let alice_session = service
            .login(LoginInput::new("alice", "hunter2hunter2"))
            .await
            .unwrap();
        let bob_session = service
            .login(LoginInput::new("bob", "hunter2hunter2"))
            .await
            .unwrap();

        ProgressRepository::create(
            store.as_ref(),
            NewProgressEntry {
                user_id: alice.id,
                date: Utc::now(),
                weight: Some(82),
                notes: None,
            },
        )
        .await
        .unwrap();
        ConsultationRepository::create(
            store.as_ref(),
            NewConsultation {
                user_id: alice.id,
                scheduled_date: Utc::now(),
                status: crate::models::ConsultationStatus::Scheduled,
                notes: None,
            },
        )
        .await
        .unwrap();

        service.delete_account(alice.id).await.unwrap();

        assert!(service.get_by_id(alice.id).await.unwrap().is_none());
        assert!(sessions.get_by_id(&alice_session.id).await.unwrap().is_none());
        assert!(ProgressRepository::list_by_user(store.as_ref(), alice.id)
            .await
            .unwrap()
            .is_empty());
        assert!(ConsultationRepository::list_by_user(store.as_ref(), alice.id)
            .await
            .unwrap()
            .is_empty());

        // The other account is untouched.
        assert!(service.get_by_id(bob.id).await.unwrap().is_some());
        assert!(sessions.get_by_id(&bob_session.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cleanup_expired_sessions() {
        let (_, sessions, service) = setup_service();
        let user = service.register(register_input("alice")).await.unwrap();

        let live = service
            .login(LoginInput::new("alice", "hunter2hunter2"))
            .await
            .unwrap();

        let now = Utc::now();
        sessions
            .create(&Session {
                id: "stale-token".to_string(),
                user_id: user.id,
                expires_at: now - Duration::days(1),
                created_at: now - Duration::days(8),
            })
            .await
            .unwrap();

        let removed = service.cleanup_expired_sessions().await.unwrap();

        assert_eq!(removed, 1);
        assert!(sessions.get_by_id(&live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_users_returns_all() {
        let (_, _, service) = setup_service();
        service.register(register_input("alice")).await.unwrap();
        service.register(register_input("bob")).await.unwrap();

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }
}
