//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::slimstack::{FamilyParams, DEFAULT_MODEL_PATH_PREFIX};

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
/// Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Line width settings.
    #[serde(default)]
    pub style: StyleConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let widths = [
            ("style.silkscreen_line_width", self.style.silkscreen_line_width),
            ("style.fab_line_width", self.style.fab_line_width),
            ("style.courtyard_line_width", self.style.courtyard_line_width),
        ];
        for (name, value) in widths {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError {
                    message: format!("{name} must be a positive number, got {value}"),
                });
            }
        }

        if self.output.model_path_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "output.model_path_prefix must not be empty".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ),
            });
        }

        Ok(())
    }

    /// Returns the Molex 52991 family parameters with configured line widths applied.
    #[must_use]
    pub fn family_params(&self) -> FamilyParams {
        FamilyParams {
            silk_line_width: self.style.silkscreen_line_width,
            fab_line_width: self.style.fab_line_width,
            courtyard_line_width: self.style.courtyard_line_width,
            ..FamilyParams::molex_52991()
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory the `.kicad_mod` file is written to. Default: working directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Prefix of the 3D model path, usually starting with an environment variable.
    #[serde(default = "default_model_path_prefix")]
    pub model_path_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            model_path_prefix: default_model_path_prefix(),
        }
    }
}

fn default_model_path_prefix() -> String {
    DEFAULT_MODEL_PATH_PREFIX.to_string()
}

/// Line widths for generated drawings, in mm.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Silkscreen line width in mm.
    #[serde(default = "default_silkscreen_width")]
    pub silkscreen_line_width: f64,

    /// Fabrication drawing line width in mm.
    #[serde(default = "default_fab_width")]
    pub fab_line_width: f64,

    /// Courtyard line width in mm.
    #[serde(default = "default_courtyard_width")]
    pub courtyard_line_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            silkscreen_line_width: default_silkscreen_width(),
            fab_line_width: default_fab_width(),
            courtyard_line_width: default_courtyard_width(),
        }
    }
}

const fn default_silkscreen_width() -> f64 {
    0.12
}

const fn default_fab_width() -> f64 {
    0.10
}

const fn default_courtyard_width() -> f64 {
    0.05
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
