//! Settings of the function cache, read from a TOML document like
//!
//! ```toml
//! [cache]
//! use_op_cache = true
//! loglevel = "info"
//! log_to_file = false
//! ```
//!
//! Missing keys keep their default values.
use std::fmt;
use std::fs;
use std::path::Path;
use toml::{Table, Value};

/// Error types of configuration and logging setup
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidValue { key: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "Failed to read configuration: {}", err),
            ConfigError::Parse(err) => write!(f, "Failed to parse configuration: {}", err),
            ConfigError::InvalidValue { key, message } => {
                write!(f, "Invalid value for {}: {}", key, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// memoize add, multiply and star
    pub use_op_cache: bool,
    /// debug, info, warn, error, off or none; None means no logger is installed
    pub loglevel: Option<String>,
    /// also write the log into a timestamped file
    pub log_to_file: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            use_op_cache: true,
            loglevel: None,
            log_to_file: false,
        }
    }
}

impl CacheConfig {
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let table: Table = document.parse()?;
        let mut config = CacheConfig::default();
        let Some(section) = table.get("cache") else {
            return Ok(config);
        };
        let section = section.as_table().ok_or_else(|| ConfigError::InvalidValue {
            key: "cache".to_string(),
            message: "expected a table".to_string(),
        })?;
        if let Some(value) = section.get("use_op_cache") {
            config.use_op_cache = expect_bool("use_op_cache", value)?;
        }
        if let Some(value) = section.get("log_to_file") {
            config.log_to_file = expect_bool("log_to_file", value)?;
        }
        if let Some(value) = section.get("loglevel") {
            let level = value.as_str().ok_or_else(|| ConfigError::InvalidValue {
                key: "loglevel".to_string(),
                message: format!("expected a string, found {}", value.type_str()),
            })?;
            config.loglevel = Some(level.to_string());
        }
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let document = fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }
}

fn expect_bool(key: &str, value: &Value) -> Result<bool, ConfigError> {
    value.as_bool().ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("expected a boolean, found {}", value.type_str()),
    })
}
