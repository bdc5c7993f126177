//! Configuration management for database and application settings.

/// Database configuration and connection management
pub mod database;

/// Company-name settings document persisted as flat JSON
pub mod settings;

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    core::product::NameCollation,
    errors::{Error, Result},
};

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Overrides the `DATABASE_URL` environment variable when set.
    #[serde(default)]
    pub database_url: Option<String>,
    /// How product-name uniqueness compares names. Defaults to exact match.
    #[serde(default)]
    pub name_collation: NameCollation,
}

/// Loads the application configuration from a TOML file.
///
/// A missing file is not an error; it yields the defaults, since every field
/// has one.
///
/// # Errors
/// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        tracing::debug!("No config file at {:?}, using defaults", path_ref);
        return Ok(AppConfig::default());
    }

    let contents = fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("failed to read config file {path_ref:?}: {e}"),
    })?;
    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}
