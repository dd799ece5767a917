//! Shader build diagnostics.
//!
//! Compile and link failures are diagnostics, not fatal errors: the program
//! keeps running with whatever program handle the driver produced. This
//! module holds the pure parts of that policy (error types, log formatting,
//! and the per-build report) so they can be tested without a GL context.

use std::fmt;
use thiserror::Error;

/// A stage of the shader build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    /// The program link step.
    Program,
}

impl ShaderStage {
    /// Lowercase stage name.
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Program => "program",
        }
    }

    /// Header line printed before the driver log of a failed stage.
    pub fn failure_header(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "ERROR::SHADER::VERTEX::COMPILATION_FAILED",
            ShaderStage::Fragment => "ERROR::SHADER::FRAGMENT::COMPILATION_FAILED",
            ShaderStage::Program => "ERROR::SHADER::PROGRAM::LINKING_FAILED",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur during shader compilation or program linking.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    Compile {
        /// The shader stage that failed.
        stage: ShaderStage,
        /// The driver's info log, prefixed with the numbered source.
        log: String,
    },
    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    Link(String),
    /// The driver refused to create a shader or program object.
    #[error("failed to create {stage} object: {reason}")]
    Create { stage: ShaderStage, reason: String },
}

impl ShaderError {
    /// The stage this error belongs to.
    pub fn stage(&self) -> ShaderStage {
        match self {
            ShaderError::Compile { stage, .. } | ShaderError::Create { stage, .. } => *stage,
            ShaderError::Link(_) => ShaderStage::Program,
        }
    }

    /// The driver-supplied text of this error.
    pub fn log(&self) -> &str {
        match self {
            ShaderError::Compile { log, .. } => log,
            ShaderError::Link(log) => log,
            ShaderError::Create { reason, .. } => reason,
        }
    }
}

/// Formats a shader compilation error for human-readable debugging.
///
/// Prepends right-aligned line numbers to each line of `source`, then
/// appends the driver's error `log`. This makes it easy to correlate
/// error messages (which reference line numbers) with the actual GLSL.
///
/// Both `source` and `log` may be empty; the function handles all
/// combinations gracefully.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let source_lines: Vec<&str> = source.lines().collect();
    let width = source_lines.len().max(1).to_string().len();

    let numbered: String = source_lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// One failed stage of a shader build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDiagnostic {
    pub stage: ShaderStage,
    pub log: String,
}

impl fmt::Display for StageDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.stage.failure_header(), self.log)
    }
}

/// Everything that went wrong while building one program.
///
/// An empty report means every stage compiled and the program linked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    diagnostics: Vec<StageDiagnostic>,
}

impl BuildReport {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure and logs it at error level.
    pub fn record(&mut self, err: &ShaderError) {
        let diagnostic = StageDiagnostic {
            stage: err.stage(),
            log: err.log().to_string(),
        };
        log::error!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Returns true if nothing failed.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in the order they were recorded.
    pub fn diagnostics(&self) -> &[StageDiagnostic] {
        &self.diagnostics
    }

    /// Returns true if the given stage failed.
    pub fn failed(&self, stage: ShaderStage) -> bool {
        self.diagnostics.iter().any(|d| d.stage == stage)
    }

    /// All diagnostic text, one block per failed stage.
    ///
    /// Empty when the build was clean.
    pub fn text(&self) -> String {
        self.diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
