//! GL context wrapper with version detection.
//!
//! `GpuContext` wraps a `glow::Context` and checks at initialization that
//! the driver provides at least the OpenGL version the renderer was written
//! for (3.3 core by default: vertex array objects and `#version 330`).

use super::error::RenderError;
use crate::config::GlVersion;

/// Wraps a `glow::Context` with the detected driver version.
///
/// Created once, right after the loader has resolved GL function pointers.
pub struct GpuContext {
    gl: glow::Context,
    version: GlVersion,
    renderer: String,
}

impl GpuContext {
    /// Creates a new `GpuContext` by wrapping the given GL context and
    /// checking its version against `required`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::UnsupportedVersion` if the driver reports a
    /// version older than `required`.
    #[allow(unsafe_code)]
    pub fn new(gl: glow::Context, required: GlVersion) -> Result<Self, RenderError> {
        use glow::HasContext;

        let found = gl.version();
        let found_text = format!("{}.{}", found.major, found.minor);
        if !version_satisfies(found.major, found.minor, required) {
            return Err(RenderError::UnsupportedVersion {
                required_major: required.major,
                required_minor: required.minor,
                found: found_text,
            });
        }
        let version = GlVersion {
            major: u8::try_from(found.major).unwrap_or(u8::MAX),
            minor: u8::try_from(found.minor).unwrap_or(u8::MAX),
        };

        // SAFETY: querying a string parameter on a current context.
        let renderer = unsafe { gl.get_parameter_string(glow::RENDERER) };
        log::info!("OpenGL {found_text} on {renderer}");

        Ok(Self {
            gl,
            version,
            renderer,
        })
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// The version reported by the driver.
    pub fn version(&self) -> GlVersion {
        self.version
    }

    /// The driver's `GL_RENDERER` string.
    pub fn renderer(&self) -> &str {
        &self.renderer
    }
}

fn version_satisfies(major: u32, minor: u32, required: GlVersion) -> bool {
    (major, minor) >= (u32::from(required.major), u32::from(required.minor))
}
