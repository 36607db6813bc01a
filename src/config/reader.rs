//! Typed access to settings with defaults, arrays, maps, and secrets.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::parse::{parse_array, parse_dictionary, ArrayOptions, DictionaryOptions};
use super::store::{Settings, SettingsStore};
use super::value::FromSetting;
use super::ConfigError;

/// Section consulted by [`ConfigReader::get_secret`].
pub const DEFAULT_SECRET_SECTION: &str = "secureAppSettings";

/// Resolves settings from a [`SettingsStore`] into typed values.
///
/// Ordinary settings fall back to a caller-supplied default when the key is
/// absent or empty. Conversion failures are always returned as errors.
#[derive(Debug, Clone, Default)]
pub struct ConfigReader<S = Settings> {
    store: S,
}

impl<S: SettingsStore> ConfigReader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Primary value of `key`, treating an empty value as absent.
    fn lookup(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|value| !value.is_empty())
    }

    /// Like `lookup`, noting when the caller's default will be used instead.
    fn lookup_or_default(&self, key: &str) -> Option<String> {
        let raw = self.lookup(key);
        if raw.is_none() {
            tracing::trace!(key, "setting absent, using default");
        }
        raw
    }

    /// Returns the setting coerced to `T`, or `default` if it is absent or empty.
    pub fn get_value<T: FromSetting>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.lookup_or_default(key) {
            Some(raw) => coerce(key, &raw),
            None => Ok(default),
        }
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.lookup_or_default(key)
            .unwrap_or_else(|| default.to_string())
    }

    pub fn get_char(&self, key: &str, default: char) -> Result<char, ConfigError> {
        self.get_value(key, default)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        self.get_value(key, default)
    }

    pub fn get_int(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        self.get_value(key, default)
    }

    pub fn get_float(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        self.get_value(key, default)
    }

    pub fn get_date_time(
        &self,
        key: &str,
        default: NaiveDateTime,
    ) -> Result<NaiveDateTime, ConfigError> {
        self.get_value(key, default)
    }

    /// Reads a secret from the `secureAppSettings` section.
    ///
    /// See [`get_secret_from`](Self::get_secret_from).
    pub fn get_secret<T: FromSetting>(&self, key: &str) -> Result<T, ConfigError> {
        self.get_secret_from(key, DEFAULT_SECRET_SECTION)
    }

    /// Reads a secret, preferring a non-empty primary setting with the same key.
    ///
    /// The primary store acts as an override for the secure section. Fails
    /// with [`ConfigError::SectionMissing`] if the section does not exist and
    /// [`ConfigError::KeyNotFound`] if the key is absent from both.
    pub fn get_secret_from<T: FromSetting>(
        &self,
        key: &str,
        section: &str,
    ) -> Result<T, ConfigError> {
        if let Some(raw) = self.lookup(key) {
            tracing::debug!(key, "secret overridden by primary setting");
            return coerce(key, &raw);
        }

        if !self.store.has_section(section) {
            return Err(ConfigError::SectionMissing(section.to_string()));
        }

        let raw = self
            .store
            .get_in_section(section, key)
            .ok_or_else(|| ConfigError::KeyNotFound {
                section: section.to_string(),
                key: key.to_string(),
            })?;

        tracing::debug!(key, section, "secret read from section");
        coerce(key, &raw)
    }

    /// Splits a setting into elements, parsing `default` if the key is absent or empty.
    pub fn get_array(&self, key: &str, default: &str, options: &ArrayOptions) -> Vec<String> {
        match self.lookup_or_default(key) {
            Some(raw) => parse_array(&raw, options),
            None => parse_array(default, options),
        }
    }

    /// Splits a setting into name-value pairs, parsing `default` if the key is absent or empty.
    pub fn get_dictionary(
        &self,
        key: &str,
        default: &str,
        options: &DictionaryOptions,
    ) -> HashMap<String, String> {
        match self.lookup_or_default(key) {
            Some(raw) => parse_dictionary(&raw, options),
            None => parse_dictionary(default, options),
        }
    }
}

fn coerce<T: FromSetting>(key: &str, raw: &str) -> Result<T, ConfigError> {
    T::from_setting(raw).map_err(|source| ConfigError::Conversion {
        key: key.to_string(),
        target: T::TYPE_NAME,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn reader() -> ConfigReader {
        let settings = Settings::builder()
            .with_setting("Operations", "Create|Read|Update")
            .with_setting("Code", "A")
            .with_setting("Max", "999")
            .with_setting("Ratio", "0.25")
            .with_setting("Enabled", "False")
            .with_setting("FirstDate", "1988-08-08T12:34:00")
            .with_setting("Empty", "")
            .with_setting("Bad", "not a number")
            .with_setting("List", "a;b; c ;;d")
            .with_setting("Map", "a=1;b=2;bad;c=3=4")
            .with_setting("Secret1", "from primary")
            .with_section_setting(DEFAULT_SECRET_SECTION, "Secret1", "from secure")
            .with_section_setting(DEFAULT_SECRET_SECTION, "Secret2", "from secure")
            .with_section_setting(DEFAULT_SECRET_SECTION, "Port", "5432")
            .with_section_setting(DEFAULT_SECRET_SECTION, "Blank", "")
            .build()
            .unwrap();
        ConfigReader::new(settings)
    }

    #[test]
    fn test_missing_key_returns_default_unchanged() {
        let reader = reader();
        assert_eq!(reader.get_int("Min", 5).unwrap(), 5);
        assert_eq!(reader.get_char("Index", 'X').unwrap(), 'X');
        assert!(reader.get_bool("Enforce", true).unwrap());
        assert_eq!(reader.get_string("Objects", "User|Group"), "User|Group");
    }

    #[test]
    fn test_empty_value_returns_default() {
        let reader = reader();
        assert_eq!(reader.get_int("Empty", 7).unwrap(), 7);
        assert_eq!(reader.get_string("Empty", "fallback"), "fallback");
    }

    #[test]
    fn test_present_values_are_coerced() {
        let reader = reader();
        assert_eq!(reader.get_string("Operations", ""), "Create|Read|Update");
        assert_eq!(reader.get_char("Code", 'C').unwrap(), 'A');
        assert_eq!(reader.get_int("Max", 1000).unwrap(), 999);
        assert_eq!(reader.get_value::<u16>("Max", 0).unwrap(), 999);
        assert_eq!(reader.get_float("Ratio", 1.0).unwrap(), 0.25);
        assert!(!reader.get_bool("Enabled", true).unwrap());

        let expected = NaiveDate::from_ymd_opt(1988, 8, 8)
            .unwrap()
            .and_hms_opt(12, 34, 0)
            .unwrap();
        assert_eq!(
            reader.get_date_time("FirstDate", NaiveDateTime::MIN).unwrap(),
            expected
        );
    }

    #[test]
    fn test_conversion_failure_propagates() {
        let reader = reader();
        let err = reader.get_int("Bad", 0).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Conversion { ref key, target: "i64", .. } if key == "Bad"
        ));
        assert!(!err.to_string().contains("not a number"));

        assert!(reader.get_char("Operations", 'C').is_err());
    }

    #[test]
    fn test_get_array() {
        let reader = reader();
        let options = ArrayOptions::default();
        assert_eq!(reader.get_array("List", "", &options), vec!["a", "b", "c", "d"]);
        assert_eq!(reader.get_array("Missing", "x; y", &options), vec!["x", "y"]);
        assert!(reader.get_array("Missing", "", &options).is_empty());

        let pipes = ArrayOptions::default().with_separator("|");
        assert_eq!(
            reader.get_array("Operations", "", &pipes),
            vec!["Create", "Read", "Update"]
        );
    }

    #[test]
    fn test_get_dictionary() {
        let reader = reader();
        let options = DictionaryOptions::default();

        let map = reader.get_dictionary("Map", "", &options);
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "1");
        assert_eq!(map["b"], "2");

        let fallback = reader.get_dictionary("Missing", "k=v", &options);
        assert_eq!(fallback.get("k").map(String::as_str), Some("v"));
        assert!(reader.get_dictionary("Missing", "", &options).is_empty());
    }

    #[test]
    fn test_secret_primary_takes_precedence() {
        let reader = reader();
        assert_eq!(reader.get_secret::<String>("Secret1").unwrap(), "from primary");
    }

    #[test]
    fn test_secret_falls_back_to_section() {
        let reader = reader();
        assert_eq!(reader.get_secret::<String>("Secret2").unwrap(), "from secure");
        assert_eq!(reader.get_secret::<u16>("Port").unwrap(), 5432);
    }

    #[test]
    fn test_secret_missing_section() {
        let reader = reader();
        let result = reader.get_secret_from::<String>("Secret2", "vault");
        assert!(matches!(result, Err(ConfigError::SectionMissing(s)) if s == "vault"));

        // A primary override never touches the section.
        assert!(reader.get_secret_from::<String>("Secret1", "vault").is_ok());
    }

    #[test]
    fn test_secret_missing_key() {
        let reader = reader();
        let result = reader.get_secret::<String>("Secret3");
        assert!(matches!(
            result,
            Err(ConfigError::KeyNotFound { ref section, ref key })
                if section == DEFAULT_SECRET_SECTION && key == "Secret3"
        ));
    }

    #[test]
    fn test_secret_empty_in_section_is_coerced() {
        let reader = reader();
        assert_eq!(reader.get_secret::<String>("Blank").unwrap(), "");
        assert!(matches!(
            reader.get_secret::<i32>("Blank"),
            Err(ConfigError::Conversion { .. })
        ));
    }

    #[test]
    fn test_reader_over_borrowed_store() {
        let settings = Settings::builder().with_setting("Max", "3").build().unwrap();
        let reader = ConfigReader::new(&settings);
        assert_eq!(reader.get_int("Max", 0).unwrap(), 3);
    }

    #[test]
    fn test_shared_reader_across_threads() {
        let reader = Arc::new(ConfigReader::new(Arc::new(
            Settings::builder()
                .with_setting("Max", "999")
                .with_section_setting(DEFAULT_SECRET_SECTION, "Secret2", "s2")
                .build()
                .unwrap(),
        )));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let reader = Arc::clone(&reader);
                thread::spawn(move || {
                    let max = reader.get_int("Max", 0).unwrap();
                    let secret: String = reader.get_secret("Secret2").unwrap();
                    (max, secret)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), (999, "s2".to_string()));
        }
        assert_eq!(reader.store().get("max").as_deref(), Some("999"));
    }

    #[test]
    fn test_into_store_returns_the_store() {
        let settings = Settings::builder().with_setting("Code", "A").build().unwrap();
        let reader = ConfigReader::new(settings.clone());
        assert_eq!(reader.into_store(), settings);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_default_fallback_is_traced() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let reader = reader();
        tracing::subscriber::with_default(subscriber, || {
            reader.get_string("MissingString", "x");
            reader.get_int("MissingInt", 1).unwrap();
            reader.get_array("MissingArray", "", &ArrayOptions::default());
            reader.get_dictionary("MissingMap", "", &DictionaryOptions::default());
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        for key in ["MissingString", "MissingInt", "MissingArray", "MissingMap"] {
            assert!(
                output.contains(key) && output.contains("setting absent, using default"),
                "no fallback event for {key} in {output}"
            );
        }
    }
}
