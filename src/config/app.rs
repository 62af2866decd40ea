//! Application settings loading from config.toml
//!
//! Every key is optional. A missing file yields the defaults, so the
//! dashboard runs without any configuration beyond the store credentials.

use crate::core::settings::StoreProfile;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Structure of config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seconds a fetched list stays fresh
    pub stale_time_secs: u64,
    /// File holding the persisted theme
    pub preferences_path: PathBuf,
    /// Viewports narrower than this render tables as cards
    pub mobile_breakpoint: u16,
    /// Terminal width used for rendering
    pub viewport_width: u16,
    /// Directory receiving CSV exports
    pub export_dir: PathBuf,
    /// Store profile shown on the settings page
    pub store: StoreProfile,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stale_time_secs: 30,
            preferences_path: PathBuf::from("preferences.toml"),
            mobile_breakpoint: 768,
            viewport_width: 1024,
            export_dir: PathBuf::from("."),
            store: StoreProfile::default(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub const fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }
}

/// Loads settings from a TOML file, or the defaults when it does not exist.
///
/// # Errors
/// Returns `Error::Config` if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No settings file at {:?}, using defaults.", path);
        return Ok(AppConfig::default());
    }

    debug!("Loading settings from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads settings from the default location (./config.toml)
///
/// # Errors
/// Returns `Error::Config` if the file exists but is invalid.
pub fn load_default_config() -> Result<AppConfig> {
    load_config(DEFAULT_CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let toml_str = r#"
            stale_time_secs = 5
            mobile_breakpoint = 600

            [store]
            name = "Ótica Centro"
            phone = "(21) 3333-0000"
            email = "centro@otica.com"
            address = "Av. Brasil, 10"
            postal_code = "20000-000"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.stale_time(), Duration::from_secs(5));
        assert_eq!(config.mobile_breakpoint, 600);
        assert_eq!(config.preferences_path, PathBuf::from("preferences.toml"));
        assert_eq!(config.store.name, "Ótica Centro");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.stale_time(), Duration::from_secs(30));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "stale_time_secs = \"soon\"").unwrap();
        assert!(matches!(load_config(&path), Err(Error::Config { .. })));
    }
}
