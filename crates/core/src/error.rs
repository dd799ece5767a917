//! Error types for the gl-experiment core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading inputs and validating configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A file could not be opened or read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was read but its contents are not valid UTF-8 text.
    #[error("'{}' is not valid UTF-8 text", .path.display())]
    InvalidUtf8 { path: PathBuf },

    /// Width or height was zero.
    #[error("invalid dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// A configuration file could not be parsed or holds an unusable value.
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
