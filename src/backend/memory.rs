//! In-memory backend
//!
//! Process-local implementation of the store traits, used by the test
//! suites. Can simulate an unreachable backend or a failing table.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::error::{BackendError, BackendResult};
use super::models::{ImageType, NewRole, NewUserProfile, PatientImage, Role, UserProfile};
use super::store::{DataStore, ImageStore, Table};

#[derive(Default)]
pub struct InMemoryStore {
    roles: RwLock<Vec<Role>>,
    profiles: RwLock<Vec<UserProfile>>,
    images: RwLock<Vec<PatientImage>>,
    unreachable: AtomicBool,
    failing: RwLock<HashMap<Table, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given roles
    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: RwLock::new(roles),
            ..Default::default()
        }
    }

    /// Every operation fails with a connection error while set
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Operations touching `table` fail with a query error carrying `message`
    pub async fn fail_table(&self, table: Table, message: impl Into<String>) {
        self.failing.write().await.insert(table, message.into());
    }

    pub async fn add_image(&self, image: PatientImage) {
        self.images.write().await.push(image);
    }

    pub async fn roles(&self) -> Vec<Role> {
        self.roles.read().await.clone()
    }

    pub async fn profiles(&self) -> Vec<UserProfile> {
        self.profiles.read().await.clone()
    }

    async fn check(&self, table: Table) -> BackendResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(BackendError::Connection(
                "in-memory backend marked unreachable".to_string(),
            ));
        }
        if let Some(message) = self.failing.read().await.get(&table) {
            return Err(BackendError::Query {
                status: 500,
                message: message.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn count_rows(&self, table: Table) -> BackendResult<u64> {
        self.check(table).await?;
        let count = match table {
            Table::Roles => self.roles.read().await.len(),
            Table::UserProfiles => self.profiles.read().await.len(),
            Table::PatientImages => self.images.read().await.len(),
        };
        Ok(count as u64)
    }

    async fn list_roles(&self) -> BackendResult<Vec<Role>> {
        self.check(Table::Roles).await?;
        Ok(self.roles.read().await.clone())
    }

    async fn find_role_by_name(&self, name: &str) -> BackendResult<Option<Role>> {
        self.check(Table::Roles).await?;
        Ok(self
            .roles
            .read()
            .await
            .iter()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn insert_roles(&self, roles: Vec<NewRole>) -> BackendResult<Vec<Role>> {
        self.check(Table::Roles).await?;
        let created: Vec<Role> = roles
            .into_iter()
            .map(|r| Role {
                id: uuid::Uuid::new_v4().to_string(),
                name: r.name,
                permissions: r.permissions,
            })
            .collect();

        self.roles.write().await.extend(created.iter().cloned());
        Ok(created)
    }

    async fn insert_user_profile(&self, profile: NewUserProfile) -> BackendResult<UserProfile> {
        self.check(Table::UserProfiles).await?;
        let mut profiles = self.profiles.write().await;
        if profiles.iter().any(|p| p.id == profile.id) {
            return Err(BackendError::Query {
                status: 409,
                message: format!(
                    "duplicate key value violates unique constraint \"user_profiles_pkey\" ({})",
                    profile.id
                ),
            });
        }

        let created = profile.into_profile(Some(Utc::now()));
        profiles.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl ImageStore for InMemoryStore {
    async fn list_patient_images(
        &self,
        patient_id: &str,
        image_type: ImageType,
    ) -> BackendResult<Vec<PatientImage>> {
        self.check(Table::PatientImages).await?;
        let mut images: Vec<PatientImage> = self
            .images
            .read()
            .await
            .iter()
            .filter(|i| i.patient_id == patient_id && i.image_type == image_type)
            .cloned()
            .collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Language;

    fn new_profile(id: &str) -> NewUserProfile {
        NewUserProfile {
            id: id.to_string(),
            email: "a@example.com".to_string(),
            role_id: "r1".to_string(),
            full_name: "a@example.com".to_string(),
            username: "a_at_example_com".to_string(),
            preferred_language: Language::En,
        }
    }

    #[tokio::test]
    async fn test_insert_and_count() {
        let store = InMemoryStore::new();
        assert_eq!(store.count_rows(Table::Roles).await.unwrap(), 0);

        let created = store
            .insert_roles(vec![NewRole::new("Nurse", &["view_patients"])])
            .await
            .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(store.count_rows(Table::Roles).await.unwrap(), 1);

        let found = store.find_role_by_name("Nurse").await.unwrap().unwrap();
        assert_eq!(found.id, created[0].id);
        assert!(store.find_role_by_name("Sales").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_profile_rejected() {
        let store = InMemoryStore::new();
        store.insert_user_profile(new_profile("u1")).await.unwrap();

        let err = store.insert_user_profile(new_profile("u1")).await.unwrap_err();
        assert!(matches!(err, BackendError::Query { status: 409, .. }));
        assert_eq!(store.profiles().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_and_failing_table() {
        let store = InMemoryStore::new();
        store.set_unreachable(true);
        assert!(store.list_roles().await.unwrap_err().is_connection());

        store.set_unreachable(false);
        store.fail_table(Table::UserProfiles, "permission denied").await;
        assert!(store.list_roles().await.is_ok());
        let err = store.count_rows(Table::UserProfiles).await.unwrap_err();
        assert_eq!(err.to_string(), "Query failed (500): permission denied");
    }
}
