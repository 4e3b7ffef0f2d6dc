// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Settings of the like-term collector and of the logger, read from a TOML document like
//! ```text
//! [collector]
//! exponent_in_key = false
//! [logging]
//! level = "debug"         # off | error | warn | info | debug | trace
//! file = "collector.log"  # optional
//! ```
//! Unknown sections and keys are ignored.
use log::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// Error types for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    /// key present but with a value of the wrong type
    InvalidValue { key: String, expected: &'static str },
    UnknownLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Cannot read config file: {}", e),
            ConfigError::Toml(e) => write!(f, "Cannot parse config: {}", e),
            ConfigError::InvalidValue { key, expected } => {
                write!(f, "Invalid value for '{}': expected {}", key, expected)
            }
            ConfigError::UnknownLogLevel(level) => {
                write!(
                    f,
                    "loglevel must be off, error, warn, info, debug or trace, got '{}'",
                    level
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectorConfig {
    /// key addition terms by `symbol^exponent` instead of the bare symbol name
    pub exponent_in_key: bool,
    pub log_level: LevelFilter,
    /// when set, log records are also written to this file
    pub log_file: Option<PathBuf>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig {
            exponent_in_key: false,
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl CollectorConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let table: Table = input.parse()?;
        let mut config = CollectorConfig::default();

        if let Some(collector) = section(&table, "collector")? {
            if let Some(value) = collector.get("exponent_in_key") {
                config.exponent_in_key = value.as_bool().ok_or(ConfigError::InvalidValue {
                    key: "collector.exponent_in_key".to_string(),
                    expected: "a boolean",
                })?;
            }
        }

        if let Some(logging) = section(&table, "logging")? {
            if let Some(value) = logging.get("level") {
                let level = value.as_str().ok_or(ConfigError::InvalidValue {
                    key: "logging.level".to_string(),
                    expected: "a string",
                })?;
                config.log_level = parse_level(level)?;
            }
            if let Some(value) = logging.get("file") {
                let file = value.as_str().ok_or(ConfigError::InvalidValue {
                    key: "logging.file".to_string(),
                    expected: "a string",
                })?;
                config.log_file = Some(PathBuf::from(file));
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn section<'a>(table: &'a Table, name: &str) -> Result<Option<&'a Table>, ConfigError> {
    match table.get(name) {
        None => Ok(None),
        Some(Value::Table(inner)) => Ok(Some(inner)),
        Some(_) => Err(ConfigError::InvalidValue {
            key: name.to_string(),
            expected: "a table",
        }),
    }
}

pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    match level.trim().to_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        _ => Err(ConfigError::UnknownLogLevel(level.to_string())),
    }
}
