use std::path::Path;

use super::env::EnvSource;
use super::file::FileSource;
use super::source::{ConfigEntry, ConfigSource};
use super::store::Settings;
use super::ConfigError;

/// Builder for assembling a [`Settings`] store from several sources.
///
/// Sources are applied in registration order, so a later source overrides
/// the same key from an earlier one.
///
/// ## Example
///
/// ```no_run
/// use appsettings::{ConfigReader, Settings};
///
/// let settings = Settings::builder()
///     .with_file("app.toml", true)
///     .with_env("MYAPP", "__")
///     .build()?;
///
/// let reader = ConfigReader::new(settings);
/// let max = reader.get_int("Max", 1000)?;
/// # Ok::<(), appsettings::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct SettingsBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Loads settings from environment variables with the given prefix.
    ///
    /// See [`EnvSource`] for how variable names map to settings.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds a single primary setting.
    pub fn with_setting(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_source(StaticSource(ConfigEntry::primary(key, value)))
    }

    /// Adds a single setting to a named section, creating the section if needed.
    pub fn with_section_setting(
        self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.with_source(StaticSource(ConfigEntry::in_section(section, key, value)))
    }

    /// Adds any custom source.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads every source in order and collects the result into a store.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::default();

        for source in &self.sources {
            for entry in source.entries()? {
                match entry.section {
                    Some(section) => settings.insert_in_section(section, entry.key, entry.value),
                    None => settings.insert(entry.key, entry.value),
                }
            }
        }

        tracing::debug!(
            sources = self.sources.len(),
            settings = settings.app_settings().len(),
            "built settings store"
        );
        Ok(settings)
    }
}

#[derive(Debug)]
struct StaticSource(ConfigEntry);

impl ConfigSource for StaticSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        Ok(vec![self.0.clone()])
    }
}
