// source.rs - Combined shader file splitting

use crate::utils::error::ShaderError;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const VERTEX_MARKER: &str = "#shader vertex";
pub const FRAGMENT_MARKER: &str = "#shader fragment";

/// Shader stage a section of the combined file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    /// Classifies a marker line. Markers match anywhere in the line and the
    /// vertex marker wins when both are present.
    pub fn from_marker(line: &str) -> Option<Self> {
        if line.contains(VERTEX_MARKER) {
            Some(ShaderKind::Vertex)
        } else if line.contains(FRAGMENT_MARKER) {
            Some(ShaderKind::Fragment)
        } else {
            None
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Vertex and fragment sections of a combined shader file.
///
/// Each section holds its lines in file order, every line terminated by
/// `\n`. A section with no lines is empty rather than missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Reads and splits a combined shader file in a single pass.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ShaderError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let sources = Self::from_reader(BufReader::new(file))?;
        log::debug!(
            "Split {}: {} vertex bytes, {} fragment bytes",
            path.display(),
            sources.vertex.len(),
            sources.fragment.len()
        );
        Ok(sources)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ShaderError> {
        let mut splitter = Splitter::default();
        for line in reader.lines() {
            splitter.push(&line?);
        }
        Ok(splitter.finish())
    }

    pub fn parse(text: &str) -> Self {
        let mut splitter = Splitter::default();
        for line in text.lines() {
            splitter.push(line);
        }
        splitter.finish()
    }

    pub fn section(&self, kind: ShaderKind) -> &str {
        match kind {
            ShaderKind::Vertex => &self.vertex,
            ShaderKind::Fragment => &self.fragment,
        }
    }

    pub fn into_section(self, kind: ShaderKind) -> String {
        match kind {
            ShaderKind::Vertex => self.vertex,
            ShaderKind::Fragment => self.fragment,
        }
    }

    fn section_mut(&mut self, kind: ShaderKind) -> &mut String {
        match kind {
            ShaderKind::Vertex => &mut self.vertex,
            ShaderKind::Fragment => &mut self.fragment,
        }
    }
}

/// Returns one section of the combined shader file at `path`.
pub fn parse_shader(path: impl AsRef<Path>, kind: ShaderKind) -> Result<String, ShaderError> {
    Ok(ShaderSources::from_file(path)?.into_section(kind))
}

#[derive(Default)]
struct Splitter {
    sources: ShaderSources,
    active: Option<ShaderKind>,
    discarded: usize,
}

impl Splitter {
    fn push(&mut self, line: &str) {
        if let Some(kind) = ShaderKind::from_marker(line) {
            self.active = Some(kind);
            return;
        }

        match self.active {
            Some(kind) => {
                let section = self.sources.section_mut(kind);
                section.push_str(line);
                section.push('\n');
            }
            // Lines ahead of the first marker belong to no stage
            None => self.discarded += 1,
        }
    }

    fn finish(self) -> ShaderSources {
        if self.discarded > 0 {
            log::debug!("Discarded {} line(s) before the first shader marker", self.discarded);
        }
        self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn write_shader(contents: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Basic.shader");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_vertex_only() {
        let (_dir, path) = write_shader("#shader vertex\nA\nB\n");

        assert_eq!(parse_shader(&path, ShaderKind::Vertex).unwrap(), "A\nB\n");
        assert_eq!(parse_shader(&path, ShaderKind::Fragment).unwrap(), "");
    }

    #[test]
    fn test_both_sections() {
        let (_dir, path) = write_shader("#shader vertex\nA\n#shader fragment\nB\n");

        assert_eq!(parse_shader(&path, ShaderKind::Vertex).unwrap(), "A\n");
        assert_eq!(parse_shader(&path, ShaderKind::Fragment).unwrap(), "B\n");
    }

    #[test]
    fn test_reverse_marker_order() {
        let sources = ShaderSources::parse("#shader fragment\nF1\nF2\n#shader vertex\nV\n");

        assert_eq!(sources.vertex, "V\n");
        assert_eq!(sources.fragment, "F1\nF2\n");
    }

    #[test]
    fn test_repeated_markers_append() {
        let sources = ShaderSources::parse(
            "#shader vertex\nV1\n#shader fragment\nF1\n#shader vertex\nV2\n",
        );

        assert_eq!(sources.vertex, "V1\nV2\n");
        assert_eq!(sources.fragment, "F1\n");
    }

    #[test]
    fn test_empty_file() {
        let (_dir, path) = write_shader("");

        let sources = ShaderSources::from_file(&path).unwrap();
        assert_eq!(sources, ShaderSources::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.shader");

        match parse_shader(&path, ShaderKind::Vertex) {
            Err(ShaderError::FileNotFound { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_split_is_repeatable() {
        let (_dir, path) = write_shader("#shader vertex\nA\n#shader fragment\nB\n");

        let first = ShaderSources::from_file(&path).unwrap();
        let second = ShaderSources::from_file(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lines_before_first_marker_are_discarded() {
        let sources = ShaderSources::parse("// header\n\n#shader fragment\nB\n");

        assert_eq!(sources.vertex, "");
        assert_eq!(sources.fragment, "B\n");
    }

    #[test]
    fn test_marker_free_file_yields_empty_sections() {
        let sources = ShaderSources::parse("void main() {}\n");
        assert_eq!(sources, ShaderSources::default());
    }

    #[test]
    fn test_markers_match_as_substrings() {
        let sources = ShaderSources::parse("  #shader vertex // stage 1\nA\n// #shader fragment\nB\n");

        assert_eq!(sources.vertex, "A\n");
        assert_eq!(sources.fragment, "B\n");
        assert_eq!(ShaderKind::from_marker("#Shader vertex"), None);
        assert_eq!(
            ShaderKind::from_marker("#shader vertex #shader fragment"),
            Some(ShaderKind::Vertex)
        );
    }

    #[test]
    fn test_crlf_lines_are_normalized() {
        let (_dir, path) = write_shader("#shader vertex\r\nA\r\n#shader fragment\r\nB");

        let sources = ShaderSources::from_file(&path).unwrap();
        assert_eq!(sources.vertex, "A\n");
        assert_eq!(sources.fragment, "B\n");
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let sources = ShaderSources::parse("#shader vertex\nA\n\nB\n");
        assert_eq!(sources.section(ShaderKind::Vertex), "A\n\nB\n");
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.shader");
        std::fs::write(&path, [b'#', 0xff, 0xfe, b'\n']).unwrap();

        assert!(matches!(ShaderSources::from_file(&path), Err(ShaderError::Io(_))));
    }

    #[test]
    fn test_bundled_shader_has_both_stages() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/shaders/Basic.shader");
        let sources = ShaderSources::from_file(path).unwrap();

        assert!(sources.vertex.starts_with("#version"));
        assert!(sources.fragment.starts_with("#version"));
        assert!(sources.vertex.contains("gl_Position"));
    }
}
