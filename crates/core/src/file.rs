//! Whole-file loading for shader sources.
//!
//! Files are read once at startup into an owned buffer and handed to the
//! shader compiler by reference. Failures are reported as [`CoreError`]
//! values rather than left to the caller to detect.

use crate::error::CoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// The full contents of a file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContents {
    path: PathBuf,
    data: Vec<u8>,
}

impl FileContents {
    /// Reads the entire file at `path` into memory.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` if the file cannot be opened or read.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} bytes from {}", data.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Path the contents were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes read.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the contents as text.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidUtf8` if the bytes are not valid UTF-8.
    pub fn text(&self) -> Result<&str, CoreError> {
        std::str::from_utf8(&self.data).map_err(|_| CoreError::InvalidUtf8 {
            path: self.path.clone(),
        })
    }
}

/// Vertex and fragment shader sources for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: FileContents,
    pub fragment: FileContents,
}

impl ShaderSources {
    /// Loads `dir/vertex` and `dir/fragment`.
    ///
    /// Both files are checked to be valid UTF-8 here so the render setup
    /// can rely on [`ShaderSources::vertex_text`] and
    /// [`ShaderSources::fragment_text`].
    ///
    /// # Errors
    ///
    /// Returns the first `CoreError::Io` or `CoreError::InvalidUtf8`
    /// encountered, vertex shader first.
    pub fn load(dir: &Path, vertex: &str, fragment: &str) -> Result<Self, CoreError> {
        let vertex = FileContents::read(dir.join(vertex))?;
        vertex.text()?;
        let fragment = FileContents::read(dir.join(fragment))?;
        fragment.text()?;
        Ok(Self { vertex, fragment })
    }

    /// Vertex shader text.
    pub fn vertex_text(&self) -> &str {
        self.vertex.text().unwrap_or_default()
    }

    /// Fragment shader text.
    pub fn fragment_text(&self) -> &str {
        self.fragment.text().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn read_returns_all_bytes_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let source = b"#version 330 core\nvoid main() {}\n";
        let path = write_file(dir.path(), "a.glsl", source);

        let contents = FileContents::read(&path).unwrap();
        assert_eq!(contents.size(), source.len());
        assert_eq!(contents.data(), source);
        assert_eq!(contents.path(), path.as_path());
    }

    #[test]
    fn read_empty_file_has_zero_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "empty.glsl", b"");

        let contents = FileContents::read(&path).unwrap();
        assert_eq!(contents.size(), 0);
        assert_eq!(contents.text().unwrap(), "");
    }

    #[test]
    fn read_missing_file_reports_io_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.glsl");

        let err = FileContents::read(&path).unwrap_err();
        match err {
            CoreError::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn text_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bin.glsl", &[0xff, 0xfe, 0x00]);

        let contents = FileContents::read(&path).unwrap();
        assert!(matches!(
            contents.text(),
            Err(CoreError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn shader_sources_load_reads_both_stages() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "v.glsl", b"vertex");
        write_file(dir.path(), "f.glsl", b"fragment");

        let sources = ShaderSources::load(dir.path(), "v.glsl", "f.glsl").unwrap();
        assert_eq!(sources.vertex_text(), "vertex");
        assert_eq!(sources.fragment_text(), "fragment");
    }

    #[test]
    fn shader_sources_load_fails_on_missing_fragment() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "v.glsl", b"vertex");

        let err = ShaderSources::load(dir.path(), "v.glsl", "f.glsl").unwrap_err();
        assert!(
            format!("{err}").contains("f.glsl"),
            "expected fragment path in: {err}"
        );
    }

    #[test]
    fn shader_sources_load_fails_on_non_utf8_vertex() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "v.glsl", &[0xc3, 0x28]);
        write_file(dir.path(), "f.glsl", b"fragment");

        let err = ShaderSources::load(dir.path(), "v.glsl", "f.glsl").unwrap_err();
        assert!(matches!(err, CoreError::InvalidUtf8 { .. }));
    }
}
