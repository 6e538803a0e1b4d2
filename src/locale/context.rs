//! Locale context and scoped access

use serde::Serialize;
use std::future::Future;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::watch;

use super::catalog::{interpolate, lookup};
use super::preference::{PreferenceStore, LANGUAGE_PREFERENCE_KEY};
use super::{Language, LocaleError};

tokio::task_local! {
    static CURRENT_LOCALE: Arc<LocaleContext>;
}

/// Document-level attributes that follow the active language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentAttributes {
    pub lang: &'static str,
    pub dir: &'static str,
    pub font_class: &'static str,
}

impl DocumentAttributes {
    pub fn for_language(language: Language) -> Self {
        Self {
            lang: language.code(),
            dir: language.direction(),
            font_class: language.font_class(),
        }
    }
}

/// Current language, its translations and change notifications
pub struct LocaleContext {
    store: Arc<dyn PreferenceStore>,
    language: watch::Sender<Language>,
    document: RwLock<DocumentAttributes>,
    /// Held for a whole language change so the stored value, the document
    /// and the watched language move together
    update: Mutex<()>,
}

impl LocaleContext {
    /// Restore the persisted language, falling back to the default when the
    /// stored value is absent, unreadable or unsupported
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        let language = match store.load(LANGUAGE_PREFERENCE_KEY) {
            Ok(Some(code)) => code.parse().unwrap_or_else(|e| {
                tracing::warn!(code = %code, error = %e, "Ignoring stored language preference");
                Language::default()
            }),
            Ok(None) => Language::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read language preference");
                Language::default()
            }
        };

        let (sender, _) = watch::channel(language);

        Self {
            store,
            language: sender,
            document: RwLock::new(DocumentAttributes::for_language(language)),
            update: Mutex::new(()),
        }
    }

    pub fn language(&self) -> Language {
        *self.language.borrow()
    }

    /// Persist `language`, then apply it and notify subscribers.
    ///
    /// Nothing changes when the preference cannot be written.
    pub fn set_language(&self, language: Language) -> Result<(), LocaleError> {
        let _update = self.update.lock().unwrap_or_else(|p| p.into_inner());

        self.store.save(LANGUAGE_PREFERENCE_KEY, language.code())?;

        let attributes = DocumentAttributes::for_language(language);
        match self.document.write() {
            Ok(mut doc) => *doc = attributes,
            Err(poisoned) => *poisoned.into_inner() = attributes,
        }

        let changed = self.language.send_if_modified(|current| {
            if *current == language {
                false
            } else {
                *current = language;
                true
            }
        });

        if changed {
            tracing::info!(language = %language, "Language changed");
        }
        Ok(())
    }

    /// Parse and apply a language code. Unsupported codes are rejected and
    /// the current language is kept.
    pub fn set_language_code(&self, code: &str) -> Result<Language, LocaleError> {
        let language: Language = code.parse()?;
        self.set_language(language)?;
        Ok(language)
    }

    /// Translate `key` in the current language.
    ///
    /// Falls back to the default language, then to the key itself.
    pub fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        translate(self.language(), key, params)
    }

    /// Receiver that observes every language change
    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.language.subscribe()
    }

    pub fn document(&self) -> DocumentAttributes {
        match self.document.read() {
            Ok(doc) => *doc,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Stateless translation for an explicit language
pub fn translate(language: Language, key: &str, params: &[(&str, &str)]) -> String {
    lookup(language, key)
        .map(|template| interpolate(template, params))
        .unwrap_or_else(|| key.to_string())
}

/// Run `fut` with `ctx` installed as the current locale
pub async fn with_locale<F: Future>(ctx: Arc<LocaleContext>, fut: F) -> F::Output {
    CURRENT_LOCALE.scope(ctx, fut).await
}

/// The locale installed by the enclosing [`with_locale`] scope
pub fn try_use_locale() -> Result<Arc<LocaleContext>, LocaleError> {
    CURRENT_LOCALE
        .try_with(Arc::clone)
        .map_err(|_| LocaleError::OutsideProvider)
}

/// Like [`try_use_locale`], but panics outside a provider scope
pub fn use_locale() -> Arc<LocaleContext> {
    match try_use_locale() {
        Ok(ctx) => ctx,
        Err(_) => panic!("use_locale() called outside of a with_locale() scope"),
    }
}
