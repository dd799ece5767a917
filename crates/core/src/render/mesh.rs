//! GPU-side mesh: one vertex array object with its vertex and index buffers.

use super::error::RenderError;
use crate::mesh::{DrawCall, MeshData, VertexLayout};

/// A mesh uploaded to the GPU.
///
/// Buffers are filled once with `STATIC_DRAW` and never updated. Call
/// [`GpuMesh::destroy`] to release the GL objects; [`Renderer`](super::Renderer)
/// does this when it is dropped.
#[derive(Debug)]
pub struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    draw: DrawCall,
}

impl GpuMesh {
    /// Uploads `mesh` and configures the position attribute.
    ///
    /// The element buffer binding is recorded in the vertex array object,
    /// so only the VAO has to be bound at draw time.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Create` if a vertex array or buffer cannot be
    /// created. Objects created before the failure are deleted.
    #[allow(unsafe_code)]
    pub fn upload(gl: &glow::Context, mesh: &MeshData) -> Result<Self, RenderError> {
        use glow::HasContext;

        let layout = VertexLayout::POSITION;

        // SAFETY: glow wraps raw GL calls as unsafe. Every handle used below
        // was created here and is deleted on the error paths.
        unsafe {
            let vao = gl.create_vertex_array().map_err(|reason| RenderError::Create {
                object: "vertex array",
                reason,
            })?;
            let vbo = match gl.create_buffer() {
                Ok(b) => b,
                Err(reason) => {
                    gl.delete_vertex_array(vao);
                    return Err(RenderError::Create {
                        object: "vertex buffer",
                        reason,
                    });
                }
            };

            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, mesh.vertex_bytes(), glow::STATIC_DRAW);

            let ebo = match mesh.index_bytes() {
                Some(indices) => match gl.create_buffer() {
                    Ok(ebo) => {
                        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                        gl.buffer_data_u8_slice(
                            glow::ELEMENT_ARRAY_BUFFER,
                            indices,
                            glow::STATIC_DRAW,
                        );
                        Some(ebo)
                    }
                    Err(reason) => {
                        gl.bind_vertex_array(None);
                        gl.delete_buffer(vbo);
                        gl.delete_vertex_array(vao);
                        return Err(RenderError::Create {
                            object: "index buffer",
                            reason,
                        });
                    }
                },
                None => None,
            };

            gl.vertex_attrib_pointer_f32(
                layout.location,
                layout.components,
                glow::FLOAT,
                false,
                layout.stride,
                layout.offset,
            );
            gl.enable_vertex_attrib_array(layout.location);

            // Unbind the VAO first so it keeps its element buffer binding.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            log::debug!(
                "uploaded mesh: {} vertices, {:?}",
                mesh.positions().len(),
                mesh.draw_call()
            );

            Ok(Self {
                vao,
                vbo,
                ebo,
                draw: mesh.draw_call(),
            })
        }
    }

    /// The draw call issued by [`GpuMesh::draw`].
    pub fn draw_call(&self) -> DrawCall {
        self.draw
    }

    /// Binds the vertex array, issues the draw call, and unbinds it.
    ///
    /// The caller selects the shader program.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.vao is a valid vertex array from upload().
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            match self.draw {
                DrawCall::Arrays { count } => gl.draw_arrays(glow::TRIANGLES, 0, count),
                DrawCall::Elements { count } => {
                    gl.draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0)
                }
            }
            gl.bind_vertex_array(None);
        }
    }

    /// Deletes the vertex array and its buffers.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: handles are valid objects created in upload().
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                gl.delete_buffer(ebo);
            }
        }
    }
}
