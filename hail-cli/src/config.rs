//! Settings file for `hail-estimator`.
//!
//! ```toml
//! [store]
//! backend = "file"        # file | sqlite | memory
//! location = "data"
//! slot = "invoices"
//!
//! [ledger]
//! history_limit = 50      # omit for unbounded history
//!
//! [invoice]
//! tax_rate = "0.0825"
//!
//! [logging]
//! level = "info"
//! file = "hail-estimator.log"
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use hail_core::calculations::DEFAULT_TAX_RATE;
use hail_core::db::{DEFAULT_SLOT, StoreConfig};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "hail-estimator.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub store: StoreSettings,
    pub ledger: LedgerSettings,
    pub invoice: InvoiceSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSettings {
    pub backend: String,
    pub location: String,
    pub slot: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            location: ".".to_string(),
            slot: DEFAULT_SLOT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerSettings {
    pub history_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvoiceSettings {
    pub tax_rate: Decimal,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let settings = Self::parse(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.clone(),
                source,
            },
            other => other,
        })?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Command-line values win over the file.
    pub fn apply_overrides(
        &mut self,
        backend: Option<&str>,
        store: Option<&str>,
        log_level: Option<&str>,
    ) {
        if let Some(backend) = backend {
            self.store.backend = backend.to_string();
        }
        if let Some(store) = store {
            self.store.location = store.to_string();
        }
        if let Some(level) = log_level {
            self.logging.level = level.to_string();
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.store.backend.trim().to_lowercase(),
            location: self.store.location.clone(),
            slot: self.store.slot.clone(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.invoice.tax_rate;
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(ConfigError::Invalid(format!(
                "invoice.tax_rate must be a fraction in [0, 1), got {rate}"
            )));
        }
        if self.ledger.history_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "ledger.history_limit must be at least 1".to_string(),
            ));
        }
        if self.store.slot.trim().is_empty() {
            return Err(ConfigError::Invalid("store.slot must not be empty".to_string()));
        }
        Ok(())
    }
}
