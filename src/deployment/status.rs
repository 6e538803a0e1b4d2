//! Deployment status probe

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::backend::{DataStore, Table};

/// Snapshot of deployment health, computed fresh on every check
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeploymentStatus {
    pub is_connected: bool,
    pub has_roles: bool,
    pub has_user_profiles: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DeploymentStatus {
    fn disconnected(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Connected with roles and at least one profile
    pub fn is_healthy(&self) -> bool {
        self.is_connected && self.has_roles && self.has_user_profiles
    }
}

/// Probe the deployment.
///
/// Never fails: backend errors are recorded in the returned status and a
/// panic inside the probe is reported as a disconnected deployment.
pub async fn check_deployment_status(store: Arc<dyn DataStore>) -> DeploymentStatus {
    match tokio::spawn(probe(store)).await {
        Ok(status) => status,
        Err(e) => {
            tracing::error!(error = %e, "Deployment status check aborted");
            DeploymentStatus::disconnected("Unexpected error while checking deployment status")
        }
    }
}

async fn probe(store: Arc<dyn DataStore>) -> DeploymentStatus {
    if let Err(e) = store.count_rows(Table::Roles).await {
        tracing::warn!(error = %e, "Backend connection check failed");
        return DeploymentStatus::disconnected(e.to_string());
    }

    let roles = match store.list_roles().await {
        Ok(roles) => roles,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch roles");
            return DeploymentStatus {
                is_connected: true,
                error: Some(e.to_string()),
                ..Default::default()
            };
        }
    };

    let role_names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();

    let (has_user_profiles, profile_count, error) =
        match store.count_rows(Table::UserProfiles).await {
            Ok(count) => (count > 0, Some(count), None),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to probe user profiles");
                (false, None, Some(e.to_string()))
            }
        };

    let status = DeploymentStatus {
        is_connected: true,
        has_roles: !roles.is_empty(),
        has_user_profiles,
        error,
        details: Some(json!({
            "role_count": roles.len(),
            "roles": role_names,
            "user_profile_count": profile_count,
        })),
    };

    tracing::info!(
        connected = status.is_connected,
        has_roles = status.has_roles,
        has_user_profiles = status.has_user_profiles,
        "Deployment status checked"
    );

    status
}
