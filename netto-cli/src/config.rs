//! Optional `netto.toml` configuration.
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "netto.db"
//!
//! [logging]
//! level = "debug"
//! file = "netto.log"
//!
//! [report]
//! language = "de"
//!
//! [features]
//! private_premium = true
//!
//! [rates]
//! file = "rates-2026.toml"
//! ```
//!
//! Every section and key is optional. Unknown keys are rejected so typos
//! surface instead of silently falling back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use netto_core::{EstimatorFeatures, RateTable, RateTableError};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::i18n::Language;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "netto.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid rate table in {}: {source}", path.display())]
    Rates {
        path: PathBuf,
        #[source]
        source: RateTableError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub backend: Option<String>,
    pub connection_string: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    pub language: Option<Language>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeaturesSection {
    pub private_premium: bool,
}

impl Default for FeaturesSection {
    fn default() -> Self {
        Self {
            private_premium: EstimatorFeatures::default().private_premium,
        }
    }
}

impl From<&FeaturesSection> for EstimatorFeatures {
    fn from(section: &FeaturesSection) -> Self {
        EstimatorFeatures {
            private_premium: section.private_premium,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatesSection {
    /// TOML file holding a full [`RateTable`]; built-in 2026 figures when unset.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub store: StoreSection,
    pub logging: LoggingSection,
    pub report: ReportSection,
    pub features: FeaturesSection,
    pub rates: RatesSection,
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl AppConfig {
    /// Parses config text; `path` is only used in error messages.
    pub fn from_toml(
        contents: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// the working directory is used when present, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    debug!("no {DEFAULT_CONFIG_FILE} found, using default config");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let config = Self::from_toml(&read_file(&path)?, &path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The rate table named by `[rates] file`, or the built-in 2026 table.
    pub fn rate_table(&self) -> Result<RateTable, ConfigError> {
        match &self.rates.file {
            Some(path) => load_rate_table(path),
            None => Ok(RateTable::year_2026()),
        }
    }
}

/// Reads and validates a rate table from a TOML file.
pub fn load_rate_table(path: &Path) -> Result<RateTable, ConfigError> {
    let rates: RateTable = toml::from_str(&read_file(path)?).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    rates.validate().map_err(|source| ConfigError::Rates {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), year = rates.year, "loaded rate table");
    Ok(rates)
}
