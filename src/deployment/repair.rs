//! Missing-profile repair

use serde_json::json;

use super::OperationReport;
use crate::backend::{DataStore, NewUserProfile};
use crate::locale::Language;

/// Role assigned to repaired profiles
pub const PATIENT_ROLE: &str = "Patient";

/// `a.b@example.com` becomes `a_b_at_example_com`
pub fn username_from_email(email: &str) -> String {
    email.replace('@', "_at_").replace('.', "_")
}

/// Create the Patient profile row for a user that has none.
///
/// Requires the Patient seed role; nothing is inserted without it. The
/// profile's language is always English, whatever the user has chosen in
/// the UI.
pub async fn fix_missing_user_profile(
    store: &dyn DataStore,
    user_id: &str,
    email: &str,
) -> OperationReport {
    let role = match store.find_role_by_name(PATIENT_ROLE).await {
        Ok(Some(role)) => role,
        Ok(None) => {
            tracing::warn!("Patient role missing, cannot repair profile");
            return OperationReport::failure(
                "Patient role not found. Create the seed roles first.",
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up Patient role");
            return OperationReport::failure(format!("Failed to find Patient role: {}", e));
        }
    };

    let profile = NewUserProfile {
        id: user_id.to_string(),
        email: email.to_string(),
        role_id: role.id,
        full_name: email.to_string(),
        username: username_from_email(email),
        preferred_language: Language::En,
    };

    match store.insert_user_profile(profile).await {
        Ok(created) => {
            tracing::info!(user_id = %user_id, username = %created.username, "User profile created");
            OperationReport::success("User profile created successfully").with_details(json!({
                "profile": created,
            }))
        }
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Failed to create user profile");
            OperationReport::failure(format!("Failed to create user profile: {}", e))
        }
    }
}
