//! Settings stores and typed setting resolution.

mod builder;
mod env;
mod error;
mod file;
mod parse;
mod reader;
mod source;
mod store;
mod value;

pub use builder::SettingsBuilder;
pub use env::EnvSource;
pub use error::{CoercionError, ConfigError};
pub use file::{FileSource, APP_SETTINGS_TABLE};
pub use parse::{
    format_dictionary, parse_array, parse_dictionary, ArrayOptions, DictionaryOptions,
    DEFAULT_NAME_VALUE_SEPARATOR, DEFAULT_SEPARATOR,
};
pub use reader::{ConfigReader, DEFAULT_SECRET_SECTION};
pub use source::{ConfigEntry, ConfigSource};
pub use store::{Settings, SettingsMap, SettingsStore};
pub use value::FromSetting;
