//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - -1: window, GL context, or GL loader initialization failed
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: the event loop failed while running
//! - 11: I/O error (shader or config file)
//! - 12: input error (bad config, bad flag value)
//! - 13: serialization error

use gl_experiment_core::render::RenderError;
use gl_experiment_core::CoreError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// Window, context, or loader setup failed.
    Init(String),
    /// The event loop stopped with an error, or presenting a frame failed.
    Runtime(String),
    /// A file could not be read.
    Io(String),
    /// A user input error (bad config file contents, bad flag value).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Init(_) => -1,
            CliError::Runtime(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Init(msg) => write!(f, "{msg}"),
            CliError::Runtime(msg) => write!(f, "{msg}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<CoreError> for CliError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Io { .. } | CoreError::InvalidUtf8 { .. } => CliError::Io(e.to_string()),
            CoreError::InvalidDimensions { .. } | CoreError::Config(_) => {
                CliError::Input(e.to_string())
            }
        }
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        CliError::Init(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
