use super::ConfigError;

/// A single raw setting produced by a source.
///
/// `section` is `None` for the primary settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub section: Option<String>,
    pub key: String,
    pub value: String,
}

impl ConfigEntry {
    pub fn primary(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            section: None,
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn in_section(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            section: Some(section.into()),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Something that yields raw settings for [`Settings`](super::Settings).
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError>;
}
