//! In-memory entity store
//!
//! Keyed collections for users, consultations and progress entries behind a
//! single `RwLock`. One lock for all three tables keeps the user-deletion
//! cascade atomic: the user row and every dependent row disappear in one
//! critical section, so a concurrent create cannot observe a half-deleted
//! account.

use crate::models::{
    Consultation, NewConsultation, NewProgressEntry, NewUser, ProgressEntry, User,
};
use crate::store::{ConsultationRepository, ProgressRepository, UserRepository};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// All entity tables plus their id counters.
///
/// Ids start at 1 and only ever grow, so iterating a `BTreeMap` by key is
/// also insertion order.
#[derive(Debug)]
struct Tables {
    users: BTreeMap<i64, User>,
    consultations: BTreeMap<i64, Consultation>,
    progress: BTreeMap<i64, ProgressEntry>,
    next_user_id: i64,
    next_consultation_id: i64,
    next_progress_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            consultations: BTreeMap::new(),
            progress: BTreeMap::new(),
            next_user_id: 1,
            next_consultation_id: 1,
            next_progress_id: 1,
        }
    }
}

/// In-memory store implementing the user, consultation and progress
/// repositories.
///
/// Constructed once at startup and shared via `Arc`; all request handlers
/// see the same tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        let id = tables.next_user_id;
        tables.next_user_id += 1;

        let user = User::from_new(id, user);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<User> {
        let mut tables = self.tables.write().await;
        anyhow::ensure!(
            tables.users.contains_key(&user.id),
            "User not found: {}",
            user.id
        );
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn count(&self) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables.users.len() as i64)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;

        tables.users.remove(&id);

        // Full scan, no owner index at this scale.
        tables.progress.retain(|_, entry| entry.user_id != id);
        tables
            .consultations
            .retain(|_, consultation| consultation.user_id != id);

        Ok(())
    }
}

#[async_trait]
impl ConsultationRepository for MemoryStore {
    async fn create(&self, consultation: NewConsultation) -> Result<Consultation> {
        let mut tables = self.tables.write().await;
        let id = tables.next_consultation_id;
        tables.next_consultation_id += 1;

        let consultation = Consultation {
            id,
            user_id: consultation.user_id,
            scheduled_date: consultation.scheduled_date,
            status: consultation.status,
            notes: consultation.notes,
        };
        tables.consultations.insert(id, consultation.clone());
        Ok(consultation)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Consultation>> {
        let tables = self.tables.read().await;
        Ok(tables
            .consultations
            .values()
            .filter(|consultation| consultation.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProgressRepository for MemoryStore {
    async fn create(&self, entry: NewProgressEntry) -> Result<ProgressEntry> {
        let mut tables = self.tables.write().await;
        let id = tables.next_progress_id;
        tables.next_progress_id += 1;

        let entry = ProgressEntry {
            id,
            user_id: entry.user_id,
            date: entry.date,
            weight: entry.weight,
            notes: entry.notes,
        };
        tables.progress.insert(id, entry.clone());
        Ok(entry)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<ProgressEntry>> {
        let tables = self.tables.read().await;
        Ok(tables
            .progress
            .values()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConsultationStatus;
    use chrono::Utc;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            email: format!("{}@example.com", username),
            is_admin: false,
            phone: None,
        }
    }

    fn new_progress(user_id: i64, weight: i32) -> NewProgressEntry {
        NewProgressEntry {
            user_id,
            date: Utc::now(),
            weight: Some(weight),
            notes: None,
        }
    }

    fn new_consultation(user_id: i64) -> NewConsultation {
        NewConsultation {
            user_id,
            scheduled_date: Utc::now(),
            status: ConsultationStatus::Scheduled,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_user_ids_start_at_one_and_increase() {
        let store = MemoryStore::new();

        let first = UserRepository::create(&store, new_user("a")).await.unwrap();
        let second = UserRepository::create(&store, new_user("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();

        let first = UserRepository::create(&store, new_user("a")).await.unwrap();
        UserRepository::delete(&store, first.id).await.unwrap();
        let second = UserRepository::create(&store, new_user("b")).await.unwrap();

        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_get_by_username_first_match() {
        let store = MemoryStore::new();

        let created = UserRepository::create(&store, new_user("coach")).await.unwrap();
        // The store itself does not enforce uniqueness; the first match wins.
        UserRepository::create(&store, new_user("coach")).await.unwrap();

        let found = store.get_by_username("coach").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);

        assert!(store.get_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_assigns_package() {
        let store = MemoryStore::new();

        let mut user = UserRepository::create(&store, new_user("a")).await.unwrap();
        user.current_package = Some("quarterly".to_string());
        user.package_start_date = Some(Utc::now());

        let updated = store.update(&user).await.unwrap();
        assert_eq!(updated.current_package.as_deref(), Some("quarterly"));

        let fetched = store.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.current_package.as_deref(), Some("quarterly"));
    }

    #[tokio::test]
    async fn test_update_missing_user_errors() {
        let store = MemoryStore::new();
        let ghost = User::from_new(42, new_user("ghost"));

        assert!(store.update(&ghost).await.is_err());
    }

    #[tokio::test]
    async fn test_list_by_user_filters_ownership() {
        let store = MemoryStore::new();
        let alice = UserRepository::create(&store, new_user("alice")).await.unwrap();
        let bob = UserRepository::create(&store, new_user("bob")).await.unwrap();

        ProgressRepository::create(&store, new_progress(alice.id, 80)).await.unwrap();
        ProgressRepository::create(&store, new_progress(bob.id, 90)).await.unwrap();
        ProgressRepository::create(&store, new_progress(alice.id, 79)).await.unwrap();

        let entries = ProgressRepository::list_by_user(&store, alice.id).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.user_id == alice.id));

        // Insertion order is preserved.
        assert_eq!(entries[0].weight, Some(80));
        assert_eq!(entries[1].weight, Some(79));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_owned_rows() {
        let store = MemoryStore::new();
        let alice = UserRepository::create(&store, new_user("alice")).await.unwrap();
        let bob = UserRepository::create(&store, new_user("bob")).await.unwrap();

        ProgressRepository::create(&store, new_progress(alice.id, 80)).await.unwrap();
        ConsultationRepository::create(&store, new_consultation(alice.id)).await.unwrap();
        ProgressRepository::create(&store, new_progress(bob.id, 90)).await.unwrap();
        ConsultationRepository::create(&store, new_consultation(bob.id)).await.unwrap();

        UserRepository::delete(&store, alice.id).await.unwrap();

        assert!(store.get_by_id(alice.id).await.unwrap().is_none());
        assert!(ProgressRepository::list_by_user(&store, alice.id)
            .await
            .unwrap()
            .is_empty());
        assert!(ConsultationRepository::list_by_user(&store, alice.id)
            .await
            .unwrap()
            .is_empty());

        // Bob's rows survive.
        assert_eq!(
            ProgressRepository::list_by_user(&store, bob.id).await.unwrap().len(),
            1
        );
        assert_eq!(
            ConsultationRepository::list_by_user(&store, bob.id).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_a_no_op() {
        let store = MemoryStore::new();
        UserRepository::create(&store, new_user("a")).await.unwrap();

        UserRepository::delete(&store, 99).await.unwrap();
        assert_eq!(UserRepository::count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_all_and_count() {
        let store = MemoryStore::new();
        assert_eq!(UserRepository::count(&store).await.unwrap(), 0);

        UserRepository::create(&store, new_user("a")).await.unwrap();
        UserRepository::create(&store, new_user("b")).await.unwrap();

        let users = store.list_all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(UserRepository::count(&store).await.unwrap(), 2);
        assert_eq!(users[0].username, "a");
        assert_eq!(users[1].username, "b");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// Creating N entries of a kind yields N rows with distinct,
        /// strictly increasing ids starting at 1.
        #[test]
        fn property_ids_strictly_increase(n in 1usize..25) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let store = MemoryStore::new();
                let mut ids = Vec::with_capacity(n);

                for i in 0..n {
                    let entry = ProgressRepository::create(
                        &store,
                        NewProgressEntry {
                            user_id: 1,
                            date: Utc::now(),
                            weight: Some(70 + i as i32),
                            notes: None,
                        },
                    )
                    .await
                    .unwrap();
                    ids.push(entry.id);
                }

                assert_eq!(ids.first(), Some(&1));
                assert!(ids.windows(2).all(|pair| pair[1] == pair[0] + 1));
            });
        }

        /// Consultation and progress counters are independent per kind.
        #[test]
        fn property_counters_are_per_kind(consultations in 1usize..10, entries in 1usize..10) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let store = MemoryStore::new();

                for _ in 0..consultations {
                    ConsultationRepository::create(
                        &store,
                        NewConsultation {
                            user_id: 1,
                            scheduled_date: Utc::now(),
                            status: crate::models::ConsultationStatus::Scheduled,
                            notes: None,
                        },
                    )
                    .await
                    .unwrap();
                }

                let mut last_id = 0;
                for _ in 0..entries {
                    let entry = ProgressRepository::create(
                        &store,
                        NewProgressEntry {
                            user_id: 1,
                            date: Utc::now(),
                            weight: None,
                            notes: None,
                        },
                    )
                    .await
                    .unwrap();
                    last_id = entry.id;
                }

                // The progress counter is untouched by consultation creates.
                assert_eq!(last_id, entries as i64);
            });
        }
    }
}
