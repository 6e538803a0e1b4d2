//! Common Utilities
//!
//! Pure helpers shared by the dashboard cards: formatting, string and
//! collection helpers, and input validation.

pub mod format;
pub mod text;
pub mod validation;

pub use format::{format_date, format_number, format_percentage, format_relative_days};
pub use text::{capitalize, chunk, dedupe, initials, truncate};
pub use validation::{
    is_valid_date, is_valid_email, is_valid_phone, validate_date, validate_email, validate_phone,
    ValidationError,
};
