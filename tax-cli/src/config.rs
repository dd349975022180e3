//! Configuration file for `tax-calc`.
//!
//! Every field is optional; anything missing falls back to [`Config::default`].
//!
//! ```toml
//! supported_years = [2019, 2020, 2021, 2022]
//!
//! [source]
//! backend = "http"
//! location = "http://localhost:5001"
//! timeout_secs = 30
//!
//! [logging]
//! level = "info"
//! file = "tax-calc.log"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tax_core::SUPPORTED_YEARS;
use tax_core::source::SourceConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Years accepted by input validation.
    pub supported_years: Vec<i32>,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or full `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Append log records to this file as well as stderr.
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supported_years: SUPPORTED_YEARS.to_vec(),
            source: SourceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// The year offered when the user does not name one.
    pub fn default_year(&self) -> i32 {
        self.supported_years
            .iter()
            .copied()
            .max()
            .unwrap_or(SUPPORTED_YEARS[SUPPORTED_YEARS.len() - 1])
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.supported_years.is_empty() {
            return Err(ConfigError::Invalid(
                "supported_years must list at least one year".to_string(),
            ));
        }
        if self.source.backend.trim().is_empty() {
            return Err(ConfigError::Invalid("source.backend must not be empty".to_string()));
        }
        Ok(())
    }
}
