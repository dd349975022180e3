//! Startup wiring for bracket sources.
//!
//! The binary knows backends only by name. Each backend crate contributes a
//! [`BracketSourceFactory`]; the [`SourceRegistry`] picks one from the
//! `[source]` section of the configuration and builds the source once.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::{BracketSource, SourceError};

/// The `[source]` configuration section.
///
/// `location` means whatever the chosen backend needs: the service root
/// for `http`, a file path for `csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub backend: String,
    pub location: String,
    /// Request timeout; ignored by backends that do no network I/O.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            location: "http://localhost:5001".to_string(),
            timeout_secs: 30,
        }
    }
}

#[async_trait]
pub trait BracketSourceFactory: Send + Sync {
    /// Lowercase name matched against `SourceConfig::backend`.
    fn backend_name(&self) -> &'static str;

    /// Builds the source. File-backed sources load and check their whole
    /// schedule here, so a bad file fails at startup rather than mid-query.
    async fn create(&self, config: &SourceConfig) -> Result<Box<dyn BracketSource>, SourceError>;
}

/// Bracket backends known to the binary, by name.
#[derive(Default)]
pub struct SourceRegistry {
    factories: BTreeMap<&'static str, Box<dyn BracketSourceFactory>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`; a later factory with the same name wins.
    pub fn register(&mut self, factory: Box<dyn BracketSourceFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Builds the source named by `config.backend`.
    ///
    /// The name is matched ignoring case and surrounding whitespace. An
    /// unregistered name is a [`SourceError::Configuration`] that lists the
    /// registered ones; factory errors pass through unchanged.
    pub async fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn BracketSource>, SourceError> {
        let wanted = config.backend.trim().to_ascii_lowercase();
        let Some(factory) = self.factories.get(wanted.as_str()) else {
            return Err(SourceError::Configuration(format!(
                "unknown bracket backend '{}' (registered: {})",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        tracing::debug!(backend = %wanted, location = %config.location, "creating bracket source");
        factory.create(config).await
    }
}
