//! API Routes
//!
//! Route handlers organized by functionality.

pub mod countdown;
pub mod deployment;
pub mod health;
pub mod images;
pub mod locale;
