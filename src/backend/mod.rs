//! Hosted Backend Access
//!
//! Typed access to the backend-as-a-service that owns roles, user profiles
//! and patient images.
//!
//! ## Architecture
//!
//! - **DataStore / ImageStore**: trait seams used by the deployment helpers
//!   and the image loader
//! - **RestStore**: PostgREST-style HTTP client
//! - **InMemoryStore**: process-local store for tests and offline runs

mod client;
mod error;
mod memory;
mod models;
mod store;

pub use client::{BackendConfig, RestStore};
pub use error::{BackendError, BackendResult};
pub use memory::InMemoryStore;
pub use models::{
    AuthUser, ImageType, NewRole, NewUserProfile, PatientImage, Role, RoleRef, UserProfile,
};
pub use store::{DataStore, ImageStore, Table};
