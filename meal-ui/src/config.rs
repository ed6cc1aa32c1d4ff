//! Application configuration.
//!
//! Read from a TOML file; every key is optional. Command-line flags are
//! applied on top through [`ConfigOverrides`].
//!
//! ```toml
//! fetch_delay_ms = 4000
//! strict_validation = false
//! default_center = [-6.2088, 106.8456]
//! default_radius = "2000"
//! log_file = "meali.log"
//! log_level = "debug"
//!
//! [source]
//! backend = "csv"
//! location = "catalog"
//! ```
//!
//! Without `backend`, a `location` selects the catalog backend and an empty
//! `[source]` table selects the mock.

use std::path::{Path, PathBuf};
use std::time::Duration;

use meal_core::wizard::{DEFAULT_FETCH_DELAY, WizardDefaults};
use meal_core::{GeoPoint, SourceConfig, ValidationPolicy, WizardSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "meali.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulated latency of the recommendation fetch.
    pub fetch_delay_ms: u64,
    pub strict_validation: bool,
    /// `[lat, lng]` the map starts at and returns to on restart.
    pub default_center: [f64; 2],
    pub default_radius: String,
    pub log_file: Option<PathBuf>,
    /// EnvFilter directive applied after startup, e.g. `"warn"`.
    pub log_level: Option<String>,
    pub source: SourceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let defaults = WizardDefaults::default();
        Self {
            fetch_delay_ms: DEFAULT_FETCH_DELAY.as_millis() as u64,
            strict_validation: false,
            default_center: [defaults.map_center.lat, defaults.map_center.lng],
            default_radius: defaults.radius,
            log_file: None,
            log_level: None,
            source: SourceConfig::default(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub fetch_delay_ms: Option<u64>,
    pub backend: Option<String>,
    pub catalog: Option<PathBuf>,
    /// Only ever turns strict validation on.
    pub strict: bool,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads `path`, which must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Reads an explicit path, else [`DEFAULT_CONFIG_FILE`] when present,
    /// else falls back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Applies command-line values. A catalog directory given without a
    /// backend clears the file's backend so the catalog decides.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(ms) = overrides.fetch_delay_ms {
            self.fetch_delay_ms = ms;
        }
        if let Some(catalog) = overrides.catalog {
            self.source.location = catalog.to_string_lossy().into_owned();
            self.source.backend = overrides.backend.clone();
        }
        if let Some(backend) = overrides.backend {
            self.source.backend = Some(backend);
        }
        if overrides.strict {
            self.strict_validation = true;
        }
    }

    pub fn wizard_settings(&self) -> WizardSettings {
        WizardSettings {
            fetch_delay: Duration::from_millis(self.fetch_delay_ms),
            validation: if self.strict_validation {
                ValidationPolicy::Strict
            } else {
                ValidationPolicy::Permissive
            },
            defaults: WizardDefaults {
                map_center: GeoPoint::from(self.default_center),
                radius: self.default_radius.clone(),
            },
        }
    }
}
