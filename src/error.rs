//! Error types for slimstack-footprint.
//!
//! Export failures live in [`crate::kicad::error`]; this module covers
//! configuration loading and the layout preconditions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors raised when generator inputs violate the connector's preconditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The connector has two symmetric rows, so the pin count must be even.
    #[error("invalid pin count {pin_count}: must be an even number of at least 2")]
    InvalidPinCount {
        /// The rejected pin count.
        pin_count: u32,
    },

    /// The part number suffix ends up in a file name.
    #[error("invalid part number '{part_number}': use ASCII letters, digits, '-', '_' or '.'")]
    InvalidPartNumber {
        /// The rejected part number.
        part_number: String,
    },
}
