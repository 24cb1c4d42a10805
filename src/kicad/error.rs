//! Error types for KiCad footprint export.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for KiCad export operations.
pub type KicadResult<T> = Result<T, KicadError>;

/// Errors that can occur while exporting a footprint.
#[derive(Debug, Error)]
pub enum KicadError {
    /// Failed to write the output file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A primitive carries a value the file format cannot represent.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of what's wrong.
        message: String,
    },
}

impl KicadError {
    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display() {
        let err = KicadError::invalid_parameter("pad.at", "coordinate is not finite");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'pad.at': coordinate is not finite"
        );
    }

    #[test]
    fn file_write_display() {
        let err = KicadError::file_write(
            "/tmp/out.kicad_mod",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("out.kicad_mod"));
    }
}
