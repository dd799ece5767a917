#![deny(unsafe_code)]
//! Core types for gl-experiment, a windowed OpenGL example that draws an
//! indexed rectangle until it is closed.
//!
//! Provides `AppConfig`, whole-file shader loading (`FileContents`,
//! `ShaderSources`), built-in mesh data (`MeshData`), the window-side
//! `WindowState`, and the shader program build with its diagnostics. The
//! `render` feature adds the `glow`-based renderer.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod file;
pub mod mesh;
pub mod program;
pub mod window;

#[cfg(feature = "render")]
pub mod render;

pub use config::{AppConfig, ClearColor, GlVersion};
pub use diagnostics::{BuildReport, ShaderError, ShaderStage, StageDiagnostic};
pub use error::CoreError;
pub use file::{FileContents, ShaderSources};
pub use mesh::{DrawCall, MeshData, MeshKind, VertexLayout};
pub use program::{assemble_program, ProgramBuild, ShaderBackend};
pub use window::{FrameSize, Key, Viewport, WindowState};
