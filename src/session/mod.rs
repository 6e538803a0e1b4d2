//! Session Flow
//!
//! Decides which top-level view a visitor sees, and reads the
//! password-reset link the auth service emails out.

mod reset;
mod view;

pub use reset::PasswordResetLink;
pub use view::{AppView, SessionSnapshot};
