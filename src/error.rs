use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the appsettings library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to load {config_type} from settings: {source}")]
    Load {
        config_type: &'static str,
        source: ConfigError,
    },
}
