//! # CarePrep
//!
//! Core of a patient-facing surgery preparation and recovery dashboard.
//!
//! ## Features
//!
//! - **Deployment self-healing**: probe the hosted backend, seed the role
//!   catalogue and repair users that signed up without a profile row
//! - **Countdown**: days/hours/minutes/seconds until the surgery date, with a
//!   one-second ticker
//! - **Localization**: English and Thai catalogues with a persisted language
//!   preference
//! - **Session views**: which screen the dashboard shows for a session
//!
//! ## Modules
//!
//! - [`backend`]: PostgREST-style client and the store traits
//! - [`deployment`]: status probe, role seeding and profile repair
//! - [`countdown`]: time-remaining arithmetic and ticker
//! - [`locale`]: translations, language preference and provider scope
//! - [`session`]: view resolution and password-reset links
//! - [`progress`]: checklist progress and surgery phase
//! - [`images`]: patient image listing
//! - [`api`]: administrative REST API with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use careprep::backend::{BackendConfig, RestStore};
//! use careprep::deployment::{check_deployment_status, create_roles};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(RestStore::new(BackendConfig::default())?);
//!
//!     let status = check_deployment_status(store.clone()).await;
//!     if status.is_connected && !status.has_roles {
//!         let report = create_roles(store.as_ref()).await;
//!         println!("{}", report.message);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod countdown;
pub mod deployment;
pub mod images;
pub mod locale;
pub mod logging;
pub mod progress;
pub mod session;
pub mod utils;

// Re-export top-level types for convenience
pub use backend::{
    BackendConfig, BackendError, BackendResult, DataStore, ImageStore, InMemoryStore, RestStore,
};

pub use deployment::{
    check_deployment_status, create_roles, fix_missing_user_profile, DeploymentStatus,
    OperationReport,
};

pub use countdown::{time_remaining, CountdownTicker, TimeRemaining};

pub use locale::{use_locale, with_locale, Language, LocaleContext, LocaleError};

pub use session::{AppView, SessionSnapshot};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError};
