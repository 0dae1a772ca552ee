//! Flat SDK configuration.
//!
//! The SDK reads everything it needs from a flat map of dotted keys to string
//! values:
//!
//! ```text
//! mode                       = sandbox
//! endpoint                   = https://api-3t.sandbox.paypal.com/2.0
//! account1.apiUsername       = jb-us-seller_api1.paypal.com
//! account1.apiPassword       = WX4WTU3S8MY44S7F
//! account1.apiSignature      = AFcWxV21C7fd0v3bYYYRCpSSRl31A7yDhhsPUU2XhtMoZXsWHFxu-RWy
//! ```
//!
//! A [`ConfigMap`] keeps insertion order, which matters for account
//! selection: when no username is requested the first configured account
//! wins.
//!
//! Configuration files are TOML. Nested tables flatten into dotted keys, so
//! `[account1]` followed by `apiUsername = "..."` yields `account1.apiUsername`.

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key selecting the application mode (`live` or `sandbox`).
pub const MODE_KEY: &str = "mode";

/// Key holding an explicit endpoint URL.
pub const ENDPOINT_KEY: &str = "endpoint";

/// Value of [`MODE_KEY`] selecting the production service.
pub const LIVE_MODE: &str = "live";

/// Value of [`MODE_KEY`] selecting the sandbox service.
pub const SANDBOX_MODE: &str = "sandbox";

/// File name looked up in the platform configuration directory.
pub const DEFAULT_CONFIG_FILE: &str = "sdk_config.toml";

/// Error type for configuration handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither a mode nor an explicit endpoint is configured.
    #[error("You must specify one of mode(live/sandbox) OR endpoint in the configuration")]
    MissingEndpoint,

    /// A configuration value has an unsupported shape.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// I/O error reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration directory not available.
    #[error("configuration directory not available")]
    ConfigDirUnavailable,
}

/// Application mode selected by the `mode` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Sandbox,
}

impl Mode {
    /// Parse a mode value, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything other than `live` or `sandbox`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case(LIVE_MODE) {
            Some(Self::Live)
        } else if value.eq_ignore_ascii_case(SANDBOX_MODE) {
            Some(Self::Sandbox)
        } else {
            None
        }
    }
}

/// Insertion-ordered map of configuration keys to values.
///
/// The map is read-only to the rest of the crate; callers build it once and
/// hand out shared references.
#[derive(Debug, Clone, Default)]
pub struct ConfigMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ConfigMap {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from key/value pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut config = Self::new();
        for (key, value) in pairs {
            config.insert(key, value);
        }
        config
    }

    /// Insert a value.
    ///
    /// Re-inserting an existing key replaces its value but keeps its
    /// original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Look up a value, treating empty strings as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the configuration has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured application mode, if it is one of `live`/`sandbox`.
    pub fn mode(&self) -> Option<Mode> {
        self.get(MODE_KEY).and_then(Mode::parse)
    }

    /// Parse a TOML document into a flat configuration.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(contents)?;
        let mut config = Self::new();
        flatten_table(&mut config, None, &table)?;
        Ok(config)
    }

    /// Get the default configuration file path.
    ///
    /// Returns the platform-specific configuration directory path for
    /// `sdk_config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("com", "paypal", "merchant-sdk")
            .ok_or(ConfigError::ConfigDirUnavailable)?;
        Ok(dirs.config_dir().join(DEFAULT_CONFIG_FILE))
    }

    /// Load the configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        Self::load_from_path(&path)
    }

    /// Load the configuration from a specific TOML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), entries = config.len(), "loaded SDK configuration");
        Ok(config)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

fn flatten_table(
    config: &mut ConfigMap,
    prefix: Option<&str>,
    table: &toml::Table,
) -> Result<(), ConfigError> {
    for (key, value) in table {
        let full_key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };

        match value {
            toml::Value::Table(nested) => flatten_table(config, Some(&full_key), nested)?,
            toml::Value::String(s) => config.insert(full_key, s.clone()),
            toml::Value::Integer(i) => config.insert(full_key, i.to_string()),
            toml::Value::Float(f) => config.insert(full_key, f.to_string()),
            toml::Value::Boolean(b) => config.insert(full_key, b.to_string()),
            toml::Value::Datetime(d) => config.insert(full_key, d.to_string()),
            toml::Value::Array(_) => {
                return Err(ConfigError::InvalidValue {
                    key: full_key,
                    message: "arrays are not supported".to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut config = ConfigMap::new();
        config.insert("b", "1");
        config.insert("a", "2");
        config.insert("b", "3");

        let keys: Vec<&str> = config.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(config.get("b"), Some("3"));
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_get_non_empty() {
        let config = ConfigMap::from_pairs([("endpoint", ""), ("mode", "live")]);
        assert_eq!(config.get("endpoint"), Some(""));
        assert_eq!(config.get_non_empty("endpoint"), None);
        assert_eq!(config.get_non_empty("mode"), Some("live"));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("live"), Some(Mode::Live));
        assert_eq!(Mode::parse(" SandBox "), Some(Mode::Sandbox));
        assert_eq!(Mode::parse("staging"), None);
    }

    #[test]
    fn test_from_toml_flattens_tables_in_document_order() {
        let config = ConfigMap::from_toml_str(
            r#"
            mode = "sandbox"

            [account2]
            apiUsername = "second"

            [account1]
            apiUsername = "first"
            apiPassword = "secret"
            "#,
        )
        .unwrap();

        let keys: Vec<&str> = config.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "mode",
                "account2.apiUsername",
                "account1.apiUsername",
                "account1.apiPassword"
            ]
        );
        assert_eq!(config.mode(), Some(Mode::Sandbox));
    }

    #[test]
    fn test_from_toml_stringifies_scalars() {
        let config = ConfigMap::from_toml_str("timeout = 30\nverbose = true\n").unwrap();
        assert_eq!(config.get("timeout"), Some("30"));
        assert_eq!(config.get("verbose"), Some("true"));
    }

    #[test]
    fn test_from_toml_rejects_arrays() {
        let result = ConfigMap::from_toml_str("hosts = [\"a\", \"b\"]\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sdk_config.toml");
        std::fs::write(&path, "[account1]\napiUsername = \"merchant\"\n").unwrap();

        let config = ConfigMap::load_from_path(&path).unwrap();
        assert_eq!(config.get("account1.apiUsername"), Some("merchant"));
    }

    #[test]
    fn test_load_from_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigMap::load_from_path(temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
