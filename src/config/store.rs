//! Read-only settings stores.

use std::collections::BTreeMap;

use super::builder::SettingsBuilder;

/// The key-value store a [`ConfigReader`](super::ConfigReader) reads from.
///
/// A store has a primary set of settings plus any number of named sections,
/// each acting as its own flat key-value store. Implementations are read-only
/// and may be queried concurrently.
pub trait SettingsStore: Send + Sync + std::fmt::Debug {
    /// Returns the raw value of a primary setting.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns whether the named section exists at all.
    fn has_section(&self, section: &str) -> bool;

    /// Returns the raw value of `key` inside the named section.
    fn get_in_section(&self, section: &str, key: &str) -> Option<String>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn has_section(&self, section: &str) -> bool {
        (**self).has_section(section)
    }

    fn get_in_section(&self, section: &str, key: &str) -> Option<String> {
        (**self).get_in_section(section, key)
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn has_section(&self, section: &str) -> bool {
        (**self).has_section(section)
    }

    fn get_in_section(&self, section: &str, key: &str) -> Option<String> {
        (**self).get_in_section(section, key)
    }
}

/// A flat map of settings with ASCII case-insensitive keys.
///
/// The casing of the most recently inserted key is kept for listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsMap {
    entries: BTreeMap<String, (String, String)>,
}

impl SettingsMap {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.entries
            .insert(key.to_ascii_lowercase(), (key, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs ordered by lowercased key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// In-memory settings store, usually produced by [`Settings::builder`].
///
/// Section names are matched case-insensitively, like keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    app_settings: SettingsMap,
    sections: BTreeMap<String, (String, SettingsMap)>,
}

impl Settings {
    /// Creates a new settings builder.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.app_settings.insert(key, value);
    }

    pub fn insert_in_section(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let section = section.into();
        let (name, map) = self
            .sections
            .entry(section.to_ascii_lowercase())
            .or_default();
        *name = section;
        map.insert(key, value);
    }

    /// Primary settings.
    pub fn app_settings(&self) -> &SettingsMap {
        &self.app_settings
    }

    pub fn section(&self, section: &str) -> Option<&SettingsMap> {
        self.sections
            .get(&section.to_ascii_lowercase())
            .map(|(_, map)| map)
    }

    /// Names of all sections, ordered case-insensitively.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.values().map(|(name, _)| name.as_str())
    }
}

impl SettingsStore for Settings {
    fn get(&self, key: &str) -> Option<String> {
        self.app_settings.get(key).map(str::to_string)
    }

    fn has_section(&self, section: &str) -> bool {
        self.section(section).is_some()
    }

    fn get_in_section(&self, section: &str, key: &str) -> Option<String> {
        self.section(section)?.get(key).map(str::to_string)
    }
}
