//! Output artifact naming and atomic file writes.
//!
//! A run writes up to three files next to each other, named from one base:
//! `{base}_abc.{ext}` (legend), `{base}_decoded.{ext}` (solution) and
//! `{base}.{ext}` (encoded).

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{RenderError, RenderResult};
use crate::layout::PageKind;
use crate::render::OutputFormat;

/// Output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// `{base}_abc.{ext}`
    pub legend: PathBuf,
    /// `{base}_decoded.{ext}`
    pub solution: PathBuf,
    /// `{base}.{ext}`
    pub encoded: PathBuf,
}

impl ArtifactPaths {
    /// Resolve artifact paths for `base` (a path without extension).
    pub fn new(base: &Path, format: OutputFormat) -> Self {
        Self {
            legend: artifact_path(base, PageKind::Legend, format),
            solution: artifact_path(base, PageKind::Solution, format),
            encoded: artifact_path(base, PageKind::Encoded, format),
        }
    }

    pub fn for_kind(&self, kind: PageKind) -> &Path {
        match kind {
            PageKind::Legend => &self.legend,
            PageKind::Solution => &self.solution,
            PageKind::Encoded => &self.encoded,
        }
    }
}

/// `{base}{suffix}.{ext}` for one page kind.
pub fn artifact_path(base: &Path, kind: PageKind, format: OutputFormat) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(kind.file_suffix());
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Write `bytes` to a temporary file beside `path`, then rename it into place.
///
/// On any failure the previous contents of `path` (if any) are untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> RenderResult<()> {
    let write_err = |source: std::io::Error| RenderError::Write {
        path: path.display().to_string(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_convention() {
        let paths = ArtifactPaths::new(Path::new("out/secret"), OutputFormat::Pdf);
        assert_eq!(paths.legend, PathBuf::from("out/secret_abc.pdf"));
        assert_eq!(paths.solution, PathBuf::from("out/secret_decoded.pdf"));
        assert_eq!(paths.encoded, PathBuf::from("out/secret.pdf"));
        assert_eq!(paths.for_kind(PageKind::Solution), Path::new("out/secret_decoded.pdf"));
    }

    #[test]
    fn svg_extension() {
        let p = artifact_path(Path::new("msg"), PageKind::Legend, OutputFormat::Svg);
        assert_eq!(p, PathBuf::from("msg_abc.svg"));
    }

    #[test]
    fn atomic_write_replaces_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("page.svg");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        // Only the target remains; temp files were renamed away.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing-subdir").join("page.pdf");
        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, RenderError::Write { .. }));
        assert!(!path.exists());
    }
}
