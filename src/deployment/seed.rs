//! Seed roles

use serde_json::json;
use std::collections::HashSet;

use super::OperationReport;
use crate::backend::{DataStore, NewRole};

/// The five permission bundles every deployment needs
pub const SEED_ROLES: &[(&str, &[&str])] = &[
    (
        "Patient",
        &[
            "view_own_profile",
            "update_own_profile",
            "view_own_tasks",
            "complete_own_tasks",
            "upload_own_images",
            "view_own_progress",
        ],
    ),
    (
        "Recovery Coordinator",
        &[
            "view_patients",
            "manage_patient_tasks",
            "view_patient_images",
            "upload_patient_images",
            "send_messages",
            "view_reports",
        ],
    ),
    (
        "Nurse",
        &[
            "view_patients",
            "update_patient_vitals",
            "view_patient_images",
            "manage_patient_tasks",
        ],
    ),
    (
        "Clinic Administrator",
        &[
            "manage_users",
            "manage_roles",
            "view_patients",
            "view_reports",
            "manage_clinic_settings",
        ],
    ),
    (
        "Sales",
        &[
            "view_leads",
            "manage_quotations",
            "upload_quotation_images",
            "view_patients",
        ],
    ),
];

pub fn seed_roles() -> Vec<NewRole> {
    SEED_ROLES
        .iter()
        .map(|(name, permissions)| NewRole::new(*name, permissions))
        .collect()
}

/// Insert the seed roles that are not present yet, in one batch.
///
/// Existing role names are read first so repeated runs do not duplicate
/// rows.
pub async fn create_roles(store: &dyn DataStore) -> OperationReport {
    let existing: HashSet<String> = match store.list_roles().await {
        Ok(roles) => roles.into_iter().map(|r| r.name).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read existing roles");
            return OperationReport::failure(format!("Failed to read existing roles: {}", e));
        }
    };

    let missing: Vec<NewRole> = seed_roles()
        .into_iter()
        .filter(|role| !existing.contains(&role.name))
        .collect();

    if missing.is_empty() {
        tracing::info!("All seed roles already present");
        return OperationReport::success(format!(
            "All {} roles already exist",
            SEED_ROLES.len()
        ))
        .with_details(json!({ "created": 0 }));
    }

    match store.insert_roles(missing).await {
        Ok(created) => {
            tracing::info!(count = created.len(), "Seed roles created");
            let names: Vec<&str> = created.iter().map(|r| r.name.as_str()).collect();
            OperationReport::success(format!("Created {} roles", created.len()))
                .with_details(json!({ "created": created.len(), "roles": names }))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create seed roles");
            OperationReport::failure(format!("Failed to create roles: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{InMemoryStore, Role, Table};

    #[tokio::test]
    async fn test_seeds_empty_store() {
        let store = InMemoryStore::new();
        let report = create_roles(&store).await;

        assert!(report.success);
        assert_eq!(report.message, "Created 5 roles");

        let roles = store.roles().await;
        assert_eq!(roles.len(), 5);
        for (name, permissions) in SEED_ROLES {
            let role = roles.iter().find(|r| r.name == *name).unwrap();
            let expected: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
            assert_eq!(role.permissions, expected);
        }

        let patient = roles.iter().find(|r| r.name == "Patient").unwrap();
        assert_eq!(
            patient.permissions,
            vec![
                "view_own_profile",
                "update_own_profile",
                "view_own_tasks",
                "complete_own_tasks",
                "upload_own_images",
                "view_own_progress",
            ]
        );
    }

    #[tokio::test]
    async fn test_repeated_seeding_does_not_duplicate() {
        let store = InMemoryStore::new();
        create_roles(&store).await;
        let report = create_roles(&store).await;

        assert!(report.success);
        assert_eq!(report.details.unwrap()["created"], 0);
        assert_eq!(store.roles().await.len(), 5);
    }

    #[tokio::test]
    async fn test_only_missing_roles_inserted() {
        let store = InMemoryStore::with_roles(vec![Role {
            id: "R1".to_string(),
            name: "Patient".to_string(),
            permissions: vec![],
        }]);

        let report = create_roles(&store).await;
        assert_eq!(report.message, "Created 4 roles");
        assert_eq!(store.roles().await.len(), 5);
    }

    #[tokio::test]
    async fn test_backend_failure_reported() {
        let store = InMemoryStore::new();
        store.fail_table(Table::Roles, "permission denied for table roles").await;

        let report = create_roles(&store).await;
        assert!(!report.success);
        assert!(report.message.contains("permission denied"));
    }
}
