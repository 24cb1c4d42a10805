//! Configuration file loading and parsing.
//!
//! This module handles loading the optional configuration file from disk and
//! parsing it into validated, type-safe structures.
//!
//! # Configuration File Locations
//!
//! The configuration file is searched in the following order:
//!
//! 1. Path specified via `--config` CLI flag (must exist)
//! 2. Default location, used only when present:
//!    - **Linux/macOS:** `~/.slimstack-footprint/config.json`
//!    - **Windows:** `%USERPROFILE%\.slimstack-footprint\config.json`
//!
//! Without a configuration file the built-in defaults apply.

mod settings;

pub use settings::{Config, LoggingConfig, OutputConfig, StyleConfig};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.slimstack-footprint/`
/// - **Windows:** `%USERPROFILE%\.slimstack-footprint\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".slimstack-footprint"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None`, the platform-specific default location is tried and
/// the built-in defaults are returned when no file exists there.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given configuration file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - A value is out of range
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound {
                    path: p.to_path_buf(),
                });
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => {
                tracing::debug!("No configuration file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: config_path.clone(),
        source: e,
    })?;

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_path_exists() {
        let path = default_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("config.json"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/slimstack/config.json")));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "logging": { "level": "info" } }"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = load_config(Some(&path));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "style": { "silkscreen_line_width": -1.0 } }"#).unwrap();

        let result = load_config(Some(&path));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
