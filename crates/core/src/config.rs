//! Application configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Command-line flags are applied on top of a loaded config by the CLI.

use crate::error::CoreError;
use crate::mesh::MeshKind;
use crate::window::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Requested OpenGL context version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl Default for GlVersion {
    fn default() -> Self {
        Self { major: 3, minor: 3 }
    }
}

/// RGBA color used to clear the framebuffer every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for ClearColor {
    fn default() -> Self {
        Self {
            r: 0.2,
            g: 0.3,
            b: 0.3,
            a: 1.0,
        }
    }
}

/// Top-level configuration for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_version: GlVersion,
    pub clear_color: ClearColor,
    pub shader_dir: PathBuf,
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub mesh: MeshKind,
    pub vsync: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL experiment".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            gl_version: GlVersion::default(),
            clear_color: ClearColor::default(),
            shader_dir: PathBuf::from("shaders"),
            vertex_shader: "vertex_shader.glsl".to_string(),
            fragment_shader: "fragment_shader.glsl".to_string(),
            mesh: MeshKind::default(),
            vsync: true,
        }
    }
}

impl AppConfig {
    /// Parses and validates a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Config` on malformed JSON or unknown fields, and
    /// any error from [`AppConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` if the file cannot be read, otherwise the
    /// errors of [`AppConfig::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Checks values that serde cannot express as types.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidDimensions` for a zero width or height.
    /// - `CoreError::Config` for an empty title or shader file name, a GL
    ///   version below 3.3, or a clear color component outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.title.trim().is_empty() {
            return Err(CoreError::Config("title must not be empty".into()));
        }
        if self.vertex_shader.is_empty() || self.fragment_shader.is_empty() {
            return Err(CoreError::Config(
                "shader file names must not be empty".into(),
            ));
        }
        let GlVersion { major, minor } = self.gl_version;
        if (major, minor) < (3, 3) {
            return Err(CoreError::Config(format!(
                "OpenGL {major}.{minor} requested, at least 3.3 is required"
            )));
        }
        let ClearColor { r, g, b, a } = self.clear_color;
        if [r, g, b, a].iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(CoreError::Config(format!(
                "clear color ({r}, {g}, {b}, {a}) must have components in [0, 1]"
            )));
        }
        Ok(())
    }

    /// Full path of the vertex shader source.
    pub fn vertex_shader_path(&self) -> PathBuf {
        self.shader_dir.join(&self.vertex_shader)
    }

    /// Full path of the fragment shader source.
    pub fn fragment_shader_path(&self) -> PathBuf {
        self.shader_dir.join(&self.fragment_shader)
    }
}
