//! Choosing and building the recommendation source a session runs on.
//!
//! Backends register a [`SourceFactory`]. A [`SourceConfig`] either names
//! one outright or leaves the choice to [`SourceRegistry::resolve`]: a
//! configured `location` picks the backend that reads one, and an empty
//! config falls back to [`DEFAULT_BACKEND`].

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::recommender::{RecommendationSource, SourceError};

/// Backend used when neither a backend nor a location is configured.
pub const DEFAULT_BACKEND: &str = "mock";

/// The `[source]` table of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Registered backend name. `None` lets the registry choose.
    pub backend: Option<String>,
    /// Where the backend finds its data, e.g. a catalog directory for `csv`.
    pub location: String,
}

impl SourceConfig {
    pub fn named(backend: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            backend: Some(backend.into()),
            location: location.into(),
        }
    }

    fn location(&self) -> Option<&str> {
        Some(self.location.trim()).filter(|location| !location.is_empty())
    }
}

/// Builds the source of one backend.
#[async_trait]
pub trait SourceFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    /// Whether this backend serves data from `SourceConfig::location`.
    fn reads_location(&self) -> bool {
        false
    }

    /// Missing or unusable data should fail here rather than on the first
    /// fetch.
    async fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Arc<dyn RecommendationSource>, SourceError>;
}

/// The backends a build knows about, by name.
#[derive(Default)]
pub struct SourceRegistry {
    factories: BTreeMap<&'static str, Box<dyn SourceFactory>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a backend. A later factory with the same name wins.
    pub fn register(&mut self, factory: Box<dyn SourceFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Picks the backend `config` asks for.
    ///
    /// # Errors
    /// [`SourceError::Configuration`] when the named backend is unknown, or
    /// when a location is set but no single registered backend reads one.
    pub fn resolve(&self, config: &SourceConfig) -> Result<&'static str, SourceError> {
        if let Some(name) = config.backend.as_deref() {
            return self.lookup(name).map(|factory| factory.backend_name());
        }
        let Some(location) = config.location() else {
            return self.lookup(DEFAULT_BACKEND).map(|factory| factory.backend_name());
        };

        let readers: Vec<_> = self
            .factories
            .values()
            .filter(|factory| factory.reads_location())
            .map(|factory| factory.backend_name())
            .collect();
        match readers.as_slice() {
            [name] => {
                debug!(backend = *name, location, "backend chosen by location");
                Ok(*name)
            }
            [] => Err(SourceError::Configuration(format!(
                "no backend reads location '{location}'"
            ))),
            several => Err(SourceError::Configuration(format!(
                "location '{location}' fits several backends {several:?}; set one explicitly"
            ))),
        }
    }

    /// Builds the source of `backend`, normally the name
    /// [`resolve`](Self::resolve) returned.
    pub async fn create(
        &self,
        backend: &str,
        config: &SourceConfig,
    ) -> Result<Arc<dyn RecommendationSource>, SourceError> {
        self.lookup(backend)?.create(config).await
    }

    fn lookup(&self, name: &str) -> Result<&dyn SourceFactory, SourceError> {
        self.factories
            .get(name)
            .map(|factory| &**factory)
            .ok_or_else(|| {
                SourceError::Configuration(format!(
                    "unknown backend '{name}'; available: {:?}",
                    self.available_backends()
                ))
            })
    }
}
