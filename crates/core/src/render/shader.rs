//! Shader compilation and linking through `glow`.
//!
//! The build sequence itself lives in [`crate::program`]; this module only
//! maps its steps onto GL calls. Info logs come from `glow`, which queries
//! `INFO_LOG_LENGTH` before fetching the log, so driver messages are never
//! truncated.

use crate::diagnostics::ShaderStage;
use crate::program::{assemble_program, ProgramBuild, ShaderBackend};

fn gl_shader_type(stage: ShaderStage) -> Option<u32> {
    match stage {
        ShaderStage::Vertex => Some(glow::VERTEX_SHADER),
        ShaderStage::Fragment => Some(glow::FRAGMENT_SHADER),
        ShaderStage::Program => None,
    }
}

// SAFETY (all methods): glow wraps raw GL calls as unsafe. Every handle
// passed in was returned by this same context, and the context is current.
#[allow(unsafe_code)]
impl ShaderBackend for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;

    fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader, String> {
        use glow::HasContext;

        let shader_type =
            gl_shader_type(stage).ok_or_else(|| format!("{stage} is not a shader stage"))?;
        unsafe { HasContext::create_shader(self, shader_type) }
    }

    fn compile_shader(&self, shader: glow::Shader, source: &str) -> bool {
        use glow::HasContext;

        unsafe {
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);
            self.get_shader_compile_status(shader)
        }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        use glow::HasContext;

        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        use glow::HasContext;

        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<glow::Program, String> {
        use glow::HasContext;

        unsafe { HasContext::create_program(self) }
    }

    fn link_program(&self, program: glow::Program, shaders: &[glow::Shader]) -> bool {
        use glow::HasContext;

        unsafe {
            for &shader in shaders {
                self.attach_shader(program, shader);
            }
            HasContext::link_program(self, program);

            // Detach regardless of link success; the program keeps its binaries.
            for &shader in shaders {
                self.detach_shader(program, shader);
            }

            self.get_program_link_status(program)
        }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        use glow::HasContext;

        unsafe { self.get_program_info_log(program) }
    }
}

/// Builds a program on `gl` without ever failing.
///
/// Both stages are compiled and the program is linked even if a stage
/// failed, so the link step reports its own log. Each failure is recorded
/// in the returned report (and logged at error level).
pub fn build_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> ProgramBuild<glow::Program> {
    assemble_program(gl, vertex_src, fragment_src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_stages_map_to_gl_types() {
        assert_eq!(gl_shader_type(ShaderStage::Vertex), Some(glow::VERTEX_SHADER));
        assert_eq!(
            gl_shader_type(ShaderStage::Fragment),
            Some(glow::FRAGMENT_SHADER)
        );
        assert_eq!(gl_shader_type(ShaderStage::Program), None);
    }

    #[test]
    fn glow_context_is_a_shader_backend() {
        fn assert_backend<B: ShaderBackend<Shader = glow::Shader, Program = glow::Program>>() {}
        assert_backend::<glow::Context>();
    }
}
