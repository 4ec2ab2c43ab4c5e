//! Run configuration: built-in defaults, then an optional TOML file, then
//! command-line flags.
//!
//! ```toml
//! log_level = "info"
//!
//! [storage]
//! backend = "sqlite"
//! connection_string = "allocations.db"
//!
//! [limits]
//! tax_year = 2025
//! combined_401k = "23500"
//! ```

use std::path::{Path, PathBuf};

use alloc_core::IrsLimits;
use alloc_core::db::StoreConfig;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::logging::DEFAULT_LEVEL;

/// Database file used when neither the config file nor `--db` names one.
pub const DEFAULT_DATABASE: &str = "allocations.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no built-in IRS limits for tax year {0}; set every cap under [limits]")]
    UnknownTaxYear(i32),

    #[error("limit '{name}' must not be negative (got {value})")]
    NegativeLimit { name: &'static str, value: Decimal },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    pub backend: Option<String>,
    pub connection_string: Option<String>,
}

/// Tax year plus per-cap overrides, in dollars.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsSection {
    pub tax_year: Option<i32>,
    pub combined_401k: Option<Decimal>,
    pub hsa_individual: Option<Decimal>,
    pub hsa_family: Option<Decimal>,
    pub roth_ira: Option<Decimal>,
}

impl LimitsSection {
    fn has_every_cap(&self) -> bool {
        self.combined_401k.is_some()
            && self.hsa_individual.is_some()
            && self.hsa_family.is_some()
            && self.roth_ira.is_some()
    }
}

/// The config file as written; every key optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub storage: StorageSection,
    pub limits: LimitsSection,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line; `None` defers to the file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub backend: Option<String>,
    pub db: Option<String>,
    pub year: Option<i32>,
    pub log_level: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    pub store: StoreConfig,
    pub limits: IrsLimits,
}

impl AppConfig {
    pub fn resolve(
        file: FileConfig,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let defaults = StoreConfig::default();
        let store = StoreConfig {
            backend: overrides
                .backend
                .or(file.storage.backend)
                .unwrap_or(defaults.backend),
            connection_string: overrides
                .db
                .or(file.storage.connection_string)
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        };

        let tax_year = overrides
            .year
            .or(file.limits.tax_year)
            .unwrap_or(IrsLimits::default().tax_year);

        Ok(Self {
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
            store,
            limits: resolve_limits(tax_year, &file.limits)?,
        })
    }
}

/// Built-in limits for `tax_year` with any configured caps laid over them.
///
/// A year without built-in limits is accepted only when all four caps are
/// configured.
fn resolve_limits(
    tax_year: i32,
    section: &LimitsSection,
) -> Result<IrsLimits, ConfigError> {
    let base = match IrsLimits::for_year(tax_year) {
        Some(limits) => limits,
        None if section.has_every_cap() => IrsLimits {
            tax_year,
            ..IrsLimits::default()
        },
        None => return Err(ConfigError::UnknownTaxYear(tax_year)),
    };

    let limits = IrsLimits {
        tax_year,
        combined_401k: section.combined_401k.unwrap_or(base.combined_401k),
        hsa_individual: section.hsa_individual.unwrap_or(base.hsa_individual),
        hsa_family: section.hsa_family.unwrap_or(base.hsa_family),
        roth_ira: section.roth_ira.unwrap_or(base.roth_ira),
    };

    for (name, value) in [
        ("combined_401k", limits.combined_401k),
        ("hsa_individual", limits.hsa_individual),
        ("hsa_family", limits.hsa_family),
        ("roth_ira", limits.roth_ira),
    ] {
        if value < Decimal::ZERO {
            return Err(ConfigError::NegativeLimit { name, value });
        }
    }

    Ok(limits)
}
