use std::path::PathBuf;
use thiserror::Error;

/// Boxed error produced by a failed string-to-type coercion.
pub type CoercionError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required settings file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("setting is not a scalar value: {0}")]
    NonScalarValue(String),

    // The raw value is left out on purpose: it may come from a secure section.
    #[error("cannot convert setting '{key}' to {target}: {source}")]
    Conversion {
        key: String,
        target: &'static str,
        source: CoercionError,
    },

    #[error("cannot read section '{0}' from the configuration")]
    SectionMissing(String),

    #[error("key '{key}' not found in section '{section}'")]
    KeyNotFound { section: String, key: String },
}
