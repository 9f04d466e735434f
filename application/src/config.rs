//! [`Config`]-related definitions.

use std::path::PathBuf;

use common::Date;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ledger storage configuration.
    pub store: Store,

    /// Service configuration.
    pub service: Service,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Ledger storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Store {
    /// Path to the JSON snapshot of the ledger.
    ///
    /// Created on the first mutation if it doesn't exist.
    #[default(PathBuf::from("data/ledger.json"))]
    pub path: PathBuf,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// [`Date`] to evaluate decisions on, in `YYYY-MM-DD` format.
    ///
    /// Today's UTC [`Date`] is used if not specified.
    pub evaluation_date: Option<Date>,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service { evaluation_date } = value;
        Self { evaluation_date }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{fs, path::PathBuf};

    use common::Date;

    use super::{Config, LogLevel};

    #[test]
    fn defaults_without_file() {
        let conf = Config::new("definitely/absent/config").unwrap();

        assert_eq!(conf.store.path, PathBuf::from("data/ledger.json"));
        assert_eq!(conf.service.evaluation_date, None);
        assert!(matches!(conf.log.level, LogLevel::Info));
    }

    #[test]
    fn loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[store]\n\
             path = \"ledger.json\"\n\
             [service]\n\
             evaluation_date = \"2025-06-15\"\n\
             [log]\n\
             level = \"DEBUG\"\n",
        )
        .unwrap();

        let conf = Config::new(path.to_str().unwrap()).unwrap();

        assert_eq!(conf.store.path, PathBuf::from("ledger.json"));
        assert_eq!(
            conf.service.evaluation_date,
            Some(Date::parse("2025-06-15").unwrap()),
        );
        assert!(matches!(conf.log.level, LogLevel::Debug));
    }

    #[test]
    fn fills_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[log]\nlevel = \"WARN\"\n").unwrap();

        let conf = Config::new(path.to_str().unwrap()).unwrap();

        assert_eq!(conf.store.path, PathBuf::from("data/ledger.json"));
        assert_eq!(conf.service.evaluation_date, None);
        assert!(matches!(conf.log.level, LogLevel::Warn));
    }
}
