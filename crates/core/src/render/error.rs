//! Errors raised while setting up GL state.

use thiserror::Error;

/// Errors from GL context checks and object creation.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The driver exposes an older OpenGL than the one required.
    #[error("OpenGL {required_major}.{required_minor} required, driver provides {found}")]
    UnsupportedVersion {
        required_major: u8,
        required_minor: u8,
        found: String,
    },

    /// The driver failed to create a GL object.
    #[error("failed to create {object}: {reason}")]
    Create { object: &'static str, reason: String },
}
