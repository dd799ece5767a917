//! The per-window renderer.
//!
//! `Renderer` owns the GL context wrapper, the shader program, and both
//! built-in meshes. Every GL object it owns is deleted when it is dropped,
//! so the context must still be current at that point.

use super::context::GpuContext;
use super::error::RenderError;
use super::mesh::GpuMesh;
use super::shader::build_program;
use crate::config::ClearColor;
use crate::diagnostics::BuildReport;
use crate::file::ShaderSources;
use crate::mesh::{DrawCall, MeshData, MeshKind};
use crate::program::ProgramBuild;
use crate::window::Viewport;

/// Draws one of the built-in meshes with the shader program each frame.
pub struct Renderer {
    gpu: GpuContext,
    program: Option<glow::Program>,
    report: BuildReport,
    triangle: GpuMesh,
    rectangle: GpuMesh,
}

impl Renderer {
    /// Builds the shader program and uploads both meshes.
    ///
    /// Shader compile and link failures do not fail construction; they are
    /// available from [`Renderer::report`].
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Create` if a mesh cannot be uploaded.
    #[allow(unsafe_code)]
    pub fn new(gpu: GpuContext, sources: &ShaderSources) -> Result<Self, RenderError> {
        use glow::HasContext;

        let gl = gpu.gl();
        let ProgramBuild { program, report } =
            build_program(gl, sources.vertex_text(), sources.fragment_text());

        let meshes = GpuMesh::upload(gl, &MeshData::triangle()).and_then(|triangle| {
            match GpuMesh::upload(gl, &MeshData::rectangle()) {
                Ok(rectangle) => Ok((triangle, rectangle)),
                Err(e) => {
                    triangle.destroy(gl);
                    Err(e)
                }
            }
        });
        let (triangle, rectangle) = match meshes {
            Ok(m) => m,
            Err(e) => {
                if let Some(program) = program {
                    // SAFETY: program is a valid handle from build_program.
                    unsafe { gl.delete_program(program) };
                }
                return Err(e);
            }
        };

        Ok(Self {
            gpu,
            program,
            report,
            triangle,
            rectangle,
        })
    }

    /// The wrapped GL context.
    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    /// Diagnostics from building the shader program.
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Draw call issued for the given mesh.
    pub fn draw_call(&self, mesh: MeshKind) -> DrawCall {
        self.mesh(mesh).draw_call()
    }

    fn mesh(&self, mesh: MeshKind) -> &GpuMesh {
        match mesh {
            MeshKind::Rectangle => &self.rectangle,
            MeshKind::Triangle => &self.triangle,
        }
    }

    /// Maps rendering output to the given viewport.
    #[allow(unsafe_code)]
    pub fn set_viewport(&self, viewport: Viewport) {
        use glow::HasContext;

        // SAFETY: plain state change on the current context.
        unsafe {
            self.gpu
                .gl()
                .viewport(viewport.x, viewport.y, viewport.width, viewport.height);
        }
    }

    /// Clears the color buffer and draws one mesh with the shader program.
    ///
    /// Presenting the frame is left to the caller.
    #[allow(unsafe_code)]
    pub fn render_frame(&self, clear: ClearColor, mesh: MeshKind) {
        use glow::HasContext;

        let gl = self.gpu.gl();
        // SAFETY: the program handle (possibly unlinked) comes from build_program;
        // using an unlinked program is a GL error, not undefined behavior.
        unsafe {
            gl.clear_color(clear.r, clear.g, clear.b, clear.a);
            gl.clear(glow::COLOR_BUFFER_BIT);
            gl.use_program(self.program);
        }
        self.mesh(mesh).draw(gl);
    }
}

impl Drop for Renderer {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        use glow::HasContext;

        let gl = self.gpu.gl();
        self.triangle.destroy(gl);
        self.rectangle.destroy(gl);
        // SAFETY: program is a valid handle from build_program and nothing
        // uses it after the renderer is gone.
        unsafe {
            gl.use_program(None);
            if let Some(program) = self.program {
                gl.delete_program(program);
            }
        }
        log::debug!("renderer resources released");
    }
}
