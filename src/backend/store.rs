//! Data store traits
//!
//! The backend is treated as a black box that supports point lookups by
//! equality filter, batch inserts returning the inserted rows, and a
//! count-style existence probe.

use async_trait::async_trait;
use std::fmt;

use super::error::BackendResult;
use super::models::{ImageType, NewRole, NewUserProfile, PatientImage, Role, UserProfile};

/// Tables the deployment helpers read and repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Roles,
    UserProfiles,
    PatientImages,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Roles => "roles",
            Table::UserProfiles => "user_profiles",
            Table::PatientImages => "patient_images",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Relational-style access to `roles` and `user_profiles`
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Lightweight existence probe: number of rows in `table`
    async fn count_rows(&self, table: Table) -> BackendResult<u64>;

    /// All roles
    async fn list_roles(&self) -> BackendResult<Vec<Role>>;

    /// Point lookup of a role by exact name
    async fn find_role_by_name(&self, name: &str) -> BackendResult<Option<Role>>;

    /// Batch insert, returning the created rows
    async fn insert_roles(&self, roles: Vec<NewRole>) -> BackendResult<Vec<Role>>;

    async fn insert_user_profile(&self, profile: NewUserProfile) -> BackendResult<UserProfile>;
}

/// Image storage keyed by patient and image type
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn list_patient_images(
        &self,
        patient_id: &str,
        image_type: ImageType,
    ) -> BackendResult<Vec<PatientImage>>;
}
