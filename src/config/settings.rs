//! Application settings loaded from an optional TOML file.
//!
//! ```toml
//! database_url = "sqlite://data/bbm_inventory.sqlite?mode=rwc"
//! log_filter = "info,sea_orm=warn"
//! ```

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "bbm.toml";

/// Settings read from the config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Store URL, overridden by `DATABASE_URL` and `--database-url`
    #[serde(default)]
    pub database_url: Option<String>,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default)]
    pub log_filter: Option<String>,
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}

/// Loads the explicitly requested file, or the default file if it exists.
///
/// A missing default file yields [`AppConfig::default`].
///
/// # Errors
/// Returns [`Error::Config`] if the explicit file is missing, or if whichever
/// file is loaded cannot be read or parsed.
pub fn load_app_configuration(explicit: Option<&Path>) -> Result<AppConfig> {
    match explicit {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => {
            debug!("No {DEFAULT_CONFIG_PATH} found, using defaults");
            Ok(AppConfig::default())
        }
    }
}
