//! Top-level view state machine

use serde::{Deserialize, Serialize};

use crate::backend::AuthUser;

/// Inputs the root view is resolved from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// First-visit splash still showing
    #[serde(default)]
    pub splash_visible: bool,
    /// Auth service has not answered yet
    #[serde(default)]
    pub auth_loading: bool,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppView {
    Splash,
    Loading,
    Auth,
    AwaitingEmailConfirmation,
    /// Signed in and confirmed, but no profile row yet
    ProvisioningProfile,
    Dashboard,
}

impl AppView {
    /// Guards are checked in order: splash, loading, user, email
    /// confirmation, profile.
    pub fn resolve(snapshot: &SessionSnapshot) -> Self {
        if snapshot.splash_visible {
            return AppView::Splash;
        }
        if snapshot.auth_loading {
            return AppView::Loading;
        }

        match &snapshot.user {
            None => AppView::Auth,
            Some(user) if !user.email_confirmed() => AppView::AwaitingEmailConfirmation,
            Some(user) if !user.has_profile() => AppView::ProvisioningProfile,
            Some(_) => AppView::Dashboard,
        }
    }

    /// Translation key of the status line shown while waiting
    pub fn status_key(&self) -> Option<&'static str> {
        match self {
            AppView::Loading => Some("status.loading"),
            AppView::AwaitingEmailConfirmation => Some("status.awaiting_email"),
            AppView::ProvisioningProfile => Some("status.configuring_profile"),
            AppView::Splash | AppView::Auth | AppView::Dashboard => None,
        }
    }

    /// Views that only wait on the auth service or the backend
    pub fn is_waiting(&self) -> bool {
        self.status_key().is_some()
    }
}
