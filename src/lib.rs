pub mod config;
pub mod context;
mod error;

pub use config::{
    ArrayOptions, ConfigError, ConfigReader, DictionaryOptions, FromSetting, Settings,
    SettingsStore,
};
pub use context::{AppContext, FromReader};
pub use error::Error;
