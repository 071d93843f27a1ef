//! Configuration management for Biblio

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::models::DEFAULT_OVERDUE_THRESHOLD_DAYS;

#[derive(Debug, Deserialize, Clone)]
pub struct LibraryConfig {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the three record tables
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoansConfig {
    pub overdue_threshold_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub loans: LoansConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix BIBLIO_)
            .add_source(
                Environment::with_prefix("BIBLIO")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override data directory from BIBLIO_DATA_DIR env var if present
            .set_override_option("storage.data_dir", env::var("BIBLIO_DATA_DIR").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: "Biblio".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
        }
    }
}

impl Default for LoansConfig {
    fn default() -> Self {
        Self {
            overdue_threshold_days: DEFAULT_OVERDUE_THRESHOLD_DAYS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
