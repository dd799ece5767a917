//! OpenGL rendering through `glow`.
//!
//! This module is only available when the `render` feature is enabled.
//! It provides shader compilation and linking, mesh upload, and the
//! renderer that owns every GL object for the lifetime of a window.
//!
//! # Module overview
//!
//! - [`context`] -- GL context wrapper with version detection.
//! - [`error`] -- Errors from context checks and GL object creation.
//! - [`shader`] -- GL calls behind the permissive program build.
//! - [`mesh`] -- Vertex array + buffer objects for one [`MeshData`](crate::mesh::MeshData).
//! - [`renderer`] -- Owns program and meshes; clears and draws each frame.

pub mod context;
pub mod error;
pub mod mesh;
pub mod renderer;
pub mod shader;

pub use context::GpuContext;
pub use error::RenderError;
pub use mesh::GpuMesh;
pub use renderer::Renderer;
pub use shader::build_program;
