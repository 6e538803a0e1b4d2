//! Deployment Bootstrap
//!
//! Checks and repairs a backend deployment that is missing seed rows.
//!
//! - [`check_deployment_status`]: probe `roles` and `user_profiles`
//! - [`create_roles`]: insert the five seed roles
//! - [`fix_missing_user_profile`]: materialize a Patient profile for a user
//!
//! None of these return `Err`: every failure is captured in the returned
//! [`DeploymentStatus`] or [`OperationReport`].

mod repair;
mod seed;
mod status;

pub use repair::{fix_missing_user_profile, username_from_email, PATIENT_ROLE};
pub use seed::{create_roles, seed_roles, SEED_ROLES};
pub use status::{check_deployment_status, DeploymentStatus};

use serde::{Deserialize, Serialize};

/// Outcome of a repair operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationReport {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl OperationReport {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            details: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
