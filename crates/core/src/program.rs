//! The permissive shader program build, independent of the GL binding.
//!
//! [`assemble_program`] drives a [`ShaderBackend`] through the fixed build
//! sequence: compile the vertex stage, compile the fragment stage, link,
//! delete the shader objects. A failing step is recorded in the
//! [`BuildReport`] and the sequence carries on, so a broken stage still
//! reaches the link step and a program handle is still handed back.

use crate::diagnostics::{format_shader_error, BuildReport, ShaderError, ShaderStage};

/// The GL operations a program build needs.
///
/// Implemented for `glow::Context` by the `render` feature.
pub trait ShaderBackend {
    type Shader: Copy;
    type Program: Copy;

    /// Creates an empty shader object for `stage`.
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Sets the source and compiles; returns the compile status.
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);
    fn create_program(&self) -> Result<Self::Program, String>;
    /// Attaches the shaders, links, detaches them; returns the link status.
    fn link_program(&self, program: Self::Program, shaders: &[Self::Shader]) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
}

/// Result of a permissive program build.
#[derive(Debug)]
pub struct ProgramBuild<P> {
    /// The program handle, or `None` if the driver could not even create one.
    /// May refer to a program that failed to link.
    pub program: Option<P>,
    /// Every compile or link failure, in order.
    pub report: BuildReport,
}

/// Builds a program from vertex and fragment sources without ever failing.
///
/// Compile failures are recorded with the driver log formatted against the
/// numbered source. Link status is checked on the program itself and a link
/// failure reports the program's own info log.
pub fn assemble_program<B: ShaderBackend>(
    backend: &B,
    vertex_src: &str,
    fragment_src: &str,
) -> ProgramBuild<B::Program> {
    let mut report = BuildReport::new();

    let mut shaders = Vec::with_capacity(2);
    for (stage, source) in [
        (ShaderStage::Vertex, vertex_src),
        (ShaderStage::Fragment, fragment_src),
    ] {
        match backend.create_shader(stage) {
            Ok(shader) => {
                if !backend.compile_shader(shader, source) {
                    let info_log = backend.shader_info_log(shader);
                    report.record(&ShaderError::Compile {
                        stage,
                        log: format_shader_error(source, &info_log),
                    });
                }
                shaders.push(shader);
            }
            Err(reason) => report.record(&ShaderError::Create { stage, reason }),
        }
    }

    let program = match backend.create_program() {
        Ok(program) => {
            if !backend.link_program(program, &shaders) {
                report.record(&ShaderError::Link(backend.program_info_log(program)));
            }
            Some(program)
        }
        Err(reason) => {
            report.record(&ShaderError::Create {
                stage: ShaderStage::Program,
                reason,
            });
            None
        }
    };

    for shader in shaders {
        backend.delete_shader(shader);
    }

    if report.is_clean() {
        log::debug!("shader program built");
    }

    ProgramBuild { program, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every call and fails compilation of any source containing
    /// `syntax error`; linking fails if any attached shader failed.
    #[derive(Default)]
    struct ScriptedBackend {
        calls: RefCell<Vec<String>>,
        failed: RefCell<Vec<u32>>,
        refuse_program: bool,
        next: RefCell<u32>,
    }

    impl ScriptedBackend {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn log(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl ShaderBackend for ScriptedBackend {
        type Shader = u32;
        type Program = u32;

        fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
            let mut next = self.next.borrow_mut();
            *next += 1;
            self.log(format!("create {stage} {}", *next));
            Ok(*next)
        }

        fn compile_shader(&self, shader: u32, source: &str) -> bool {
            self.log(format!("compile {shader}"));
            let ok = !source.contains("syntax error");
            if !ok {
                self.failed.borrow_mut().push(shader);
            }
            ok
        }

        fn shader_info_log(&self, shader: u32) -> String {
            format!("0:1({shader}): error: syntax error, unexpected end of file")
        }

        fn delete_shader(&self, shader: u32) {
            self.log(format!("delete {shader}"));
        }

        fn create_program(&self) -> Result<u32, String> {
            if self.refuse_program {
                return Err("out of memory".into());
            }
            self.log("create program".into());
            Ok(100)
        }

        fn link_program(&self, program: u32, shaders: &[u32]) -> bool {
            self.log(format!("link {program} {shaders:?}"));
            shaders.iter().all(|s| !self.failed.borrow().contains(s))
        }

        fn program_info_log(&self, _program: u32) -> String {
            "error: linking with uncompiled shader".into()
        }
    }

    const VALID_VS: &str = "#version 330 core\nvoid main() { gl_Position = vec4(0.0); }";
    const VALID_FS: &str = "#version 330 core\nout vec4 c;\nvoid main() { c = vec4(1.0); }";

    #[test]
    fn valid_sources_link_with_empty_report() {
        let backend = ScriptedBackend::default();
        let build = assemble_program(&backend, VALID_VS, VALID_FS);

        assert_eq!(build.program, Some(100));
        assert!(build.report.is_clean());
        assert!(build.report.text().is_empty());
    }

    #[test]
    fn vertex_syntax_error_is_reported_and_build_continues() {
        let backend = ScriptedBackend::default();
        let build = assemble_program(&backend, "void main() { syntax error", VALID_FS);

        assert!(build.report.failed(ShaderStage::Vertex));
        assert!(!build.report.failed(ShaderStage::Fragment));
        assert!(build.report.failed(ShaderStage::Program));
        assert_eq!(build.program, Some(100), "handle must still be returned");

        let vertex = &build.report.diagnostics()[0];
        assert!(vertex.log.contains("unexpected end of file"), "got: {}", vertex.log);
        assert!(vertex.log.starts_with("1: void main()"), "got: {}", vertex.log);

        let link = &build.report.diagnostics()[1];
        assert_eq!(link.log, "error: linking with uncompiled shader");
    }

    #[test]
    fn failed_stage_is_still_attached_and_linked() {
        let backend = ScriptedBackend::default();
        assemble_program(&backend, "syntax error", VALID_FS);

        assert_eq!(
            backend.calls(),
            vec![
                "create vertex 1",
                "compile 1",
                "create fragment 2",
                "compile 2",
                "create program",
                "link 100 [1, 2]",
                "delete 1",
                "delete 2",
            ]
        );
    }

    #[test]
    fn report_text_carries_stage_headers() {
        let backend = ScriptedBackend::default();
        let build = assemble_program(&backend, VALID_VS, "syntax error");
        let text = build.report.text();

        assert!(text.starts_with("ERROR::SHADER::FRAGMENT::COMPILATION_FAILED\n"));
        assert!(text.contains("ERROR::SHADER::PROGRAM::LINKING_FAILED\n"));
    }

    #[test]
    fn program_creation_failure_still_deletes_shaders() {
        let backend = ScriptedBackend {
            refuse_program: true,
            ..ScriptedBackend::default()
        };
        let build = assemble_program(&backend, VALID_VS, VALID_FS);

        assert!(build.program.is_none());
        assert_eq!(build.report.diagnostics().len(), 1);
        assert_eq!(build.report.diagnostics()[0].stage, ShaderStage::Program);
        assert_eq!(build.report.diagnostics()[0].log, "out of memory");
        assert!(backend.calls().ends_with(&["delete 1".into(), "delete 2".into()]));
    }
}
