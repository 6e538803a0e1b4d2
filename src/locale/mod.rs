//! Localization
//!
//! English/Thai translation lookup with a persisted language preference.
//!
//! A [`LocaleContext`] owns the current language. Changing it persists the
//! choice, refreshes the [`DocumentAttributes`] and notifies every
//! subscriber. Code running inside [`with_locale`] reaches the context via
//! [`use_locale`]; calling it anywhere else is a bug and panics.

mod catalog;
mod context;
mod language;
mod preference;

pub use catalog::{interpolate, lookup};
pub use context::{
    translate, try_use_locale, use_locale, with_locale, DocumentAttributes, LocaleContext,
};
pub use language::Language;
pub use preference::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, LANGUAGE_PREFERENCE_KEY,
};

use thiserror::Error;

/// Errors raised by the localization layer
#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Preference storage error: {0}")]
    Storage(String),

    #[error("Locale accessed outside of a provider scope")]
    OutsideProvider,
}

impl From<std::io::Error> for LocaleError {
    fn from(err: std::io::Error) -> Self {
        LocaleError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LocaleError {
    fn from(err: serde_json::Error) -> Self {
        LocaleError::Storage(err.to_string())
    }
}
