//! File-based settings source.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::{Table, Value};

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Name of the table holding the primary settings.
pub const APP_SETTINGS_TABLE: &str = "appSettings";

/// A settings source that loads from a TOML file.
///
/// Top-level scalars and the `[appSettings]` table feed the primary store.
/// Every other top-level table becomes a named section:
///
/// ```toml
/// Max = 999
///
/// [appSettings]
/// Operations = "Create|Read"
///
/// [secureAppSettings]
/// Secret2 = "hunter2"
/// ```
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist are silently skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsDocument {
    #[serde(rename = "appSettings", default)]
    app_settings: Table,
    #[serde(flatten)]
    rest: Table,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl ConfigSource for FileSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let Some(document) = load_settings_file(&self.path, self.required)? else {
            tracing::debug!(path = %self.path.display(), "optional settings file not found");
            return Ok(vec![]);
        };

        let mut entries = Vec::new();

        for (key, value) in document.rest {
            match value {
                Value::Table(table) => {
                    for (name, value) in table {
                        let path = format!("{key}.{name}");
                        let value = scalar_to_string(value, &path)?;
                        entries.push(ConfigEntry::in_section(key.as_str(), name, value));
                    }
                }
                value => {
                    let value = scalar_to_string(value, &key)?;
                    entries.push(ConfigEntry::primary(key, value));
                }
            }
        }

        for (key, value) in document.app_settings {
            let path = format!("{APP_SETTINGS_TABLE}.{key}");
            let value = scalar_to_string(value, &path)?;
            entries.push(ConfigEntry::primary(key, value));
        }

        tracing::debug!(path = %self.path.display(), count = entries.len(), "loaded settings file");
        Ok(entries)
    }
}

/// Loads and parses a TOML settings file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_settings_file(path: &Path, required: bool) -> Result<Option<SettingsDocument>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let document = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(document))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Converts a TOML scalar to the raw string a setting holds.
fn scalar_to_string(value: Value, path: &str) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) | Value::Table(_) => Err(ConfigError::NonScalarValue(path.to_string())),
    }
}
