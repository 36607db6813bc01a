//! Application context for passing resolved settings to components.

use crate::config::{ConfigError, ConfigReader, SettingsStore};
use crate::Error;

/// A settings struct that can resolve itself from a [`ConfigReader`].
///
/// Implement this for the application's settings type, then build it once
/// at startup through [`AppContext`] and pass the context to whatever needs it.
pub trait FromReader: Sized {
    fn from_reader<S: SettingsStore>(reader: &ConfigReader<S>) -> Result<Self, ConfigError>;
}

/// Central application context holding resolved settings and the reader.
///
/// The settings type `C` is resolved once at build time. The reader stays
/// available for values that should be read on demand, such as secrets.
///
/// ## Example
///
/// ```no_run
/// use appsettings::{AppContext, ConfigError, ConfigReader, FromReader, Settings, SettingsStore};
///
/// struct MyConfig {
///     max: i64,
///     enabled: bool,
/// }
///
/// impl FromReader for MyConfig {
///     fn from_reader<S: SettingsStore>(reader: &ConfigReader<S>) -> Result<Self, ConfigError> {
///         Ok(Self {
///             max: reader.get_int("Max", 1000)?,
///             enabled: reader.get_bool("Enabled", true)?,
///         })
///     }
/// }
///
/// let settings = Settings::builder().with_file("app.toml", true).build()?;
/// let ctx = AppContext::builder()
///     .with_reader(ConfigReader::new(settings))
///     .build::<MyConfig>()?;
///
/// let config = ctx.config();
/// let password: String = ctx.reader().get_secret("DbPassword")?;
/// # Ok::<(), appsettings::Error>(())
/// ```
#[derive(Debug)]
pub struct AppContext<C, S = crate::Settings> {
    config: C,
    reader: ConfigReader<S>,
}

impl<C, S> AppContext<C, S> {
    /// Returns a reference to the resolved settings.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Returns the reader the settings were resolved from.
    pub fn reader(&self) -> &ConfigReader<S> {
        &self.reader
    }
}

impl AppContext<()> {
    /// Creates a new builder for constructing an `AppContext`.
    pub fn builder() -> AppContextBuilder<()> {
        AppContextBuilder { reader: () }
    }
}

/// Builder for constructing an [`AppContext`].
///
/// The builder starts without a reader (`AppContextBuilder<()>`) and
/// transitions to `AppContextBuilder<ConfigReader<S>>` when
/// [`with_reader`](Self::with_reader) is called.
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder<R> {
    reader: R,
}

impl AppContextBuilder<()> {
    /// Attaches the reader settings will be resolved from.
    pub fn with_reader<S: SettingsStore>(
        self,
        reader: ConfigReader<S>,
    ) -> AppContextBuilder<ConfigReader<S>> {
        AppContextBuilder { reader }
    }
}

impl<S: SettingsStore> AppContextBuilder<ConfigReader<S>> {
    /// Resolves `C` from the reader and builds the `AppContext`.
    pub fn build<C: FromReader>(self) -> Result<AppContext<C, S>, Error> {
        let config = C::from_reader(&self.reader).map_err(|source| Error::Load {
            config_type: std::any::type_name::<C>(),
            source,
        })?;

        Ok(AppContext {
            config,
            reader: self.reader,
        })
    }
}
