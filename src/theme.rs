//! Light/dark theme preference and the storage seam it persists through.
//!
//! The preference is the only state that outlives a page view. Storage is
//! best-effort: a disabled or full store must never break the toggle, so the
//! core logs store failures and keeps going with the in-memory value.

use std::collections::HashMap;
use std::fmt;

use crate::error::FxError;

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin-scoped key/value storage for user preferences.
pub trait PreferenceStore {
    /// # Errors
    ///
    /// Returns [`FxError::Storage`] when the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, FxError>;

    /// # Errors
    ///
    /// Returns [`FxError::Storage`] when the backing store rejects the write.
    fn save(&mut self, key: &str, value: &str) -> Result<(), FxError>;
}

/// In-memory store, used where no browser storage exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, FxError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), FxError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store that fails every call, standing in for disabled storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn load(&self, _key: &str) -> Result<Option<String>, FxError> {
        Err(FxError::Storage("storage unavailable".to_owned()))
    }

    fn save(&mut self, _key: &str, _value: &str) -> Result<(), FxError> {
        Err(FxError::Storage("storage unavailable".to_owned()))
    }
}

/// Resolve the starting theme: root attribute, then stored value, then dark.
pub fn initial_theme<S: PreferenceStore>(root_attr: Option<&str>, store: &S, key: &str) -> Theme {
    if let Some(theme) = root_attr.and_then(Theme::parse) {
        return theme;
    }
    match store.load(key) {
        Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_default(),
        Ok(None) => Theme::default(),
        Err(err) => {
            log::debug!("theme preference unreadable: {err}");
            Theme::default()
        }
    }
}
