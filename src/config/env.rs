use std::ffi::OsString;

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Reads settings from environment variables.
///
/// With prefix `MYAPP` and separator `__`, `MYAPP__Max` sets the primary
/// setting `Max` and `MYAPP__secureAppSettings__Secret1` sets `Secret1` in
/// the `secureAppSettings` section. Lookups are case-insensitive, so
/// `MYAPP__MAX` works too.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
        }
    }

    /// Variables whose name or value is not valid UTF-8 are skipped.
    fn entries_from(&self, vars: impl IntoIterator<Item = (OsString, OsString)>) -> Vec<ConfigEntry> {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let mut entries = Vec::new();

        for (name, value) in vars {
            let (name, value) = match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => (name, value),
                (Ok(name), Err(_)) => {
                    tracing::warn!(variable = %name, "ignoring environment variable with non UTF-8 value");
                    continue;
                }
                (Err(name), _) => {
                    tracing::warn!(variable = ?name, "ignoring environment variable with non UTF-8 name");
                    continue;
                }
            };

            let Some(path) = name.strip_prefix(&prefix_with_sep) else {
                continue;
            };

            let segments: Vec<&str> = path.split(&self.separator).collect();
            match segments.as_slice() {
                [key] if !key.is_empty() => entries.push(ConfigEntry::primary(*key, value)),
                [section, key] if !section.is_empty() && !key.is_empty() => {
                    entries.push(ConfigEntry::in_section(*section, *key, value));
                }
                _ => tracing::warn!(variable = %name, "ignoring environment variable with unsupported path"),
            }
        }

        entries
    }
}

impl ConfigSource for EnvSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        Ok(self.entries_from(std::env::vars_os()))
    }
}
