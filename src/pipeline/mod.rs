//! Run pipeline: load inputs, then lay out and write each requested page.
//!
//! Stages run in a fixed order (legend, solution, encoded). Keymap and input
//! are loaded before any page is written, so a load failure produces no
//! output at all. A write failure stops the remaining stages but leaves pages
//! already written in place.

use std::path::PathBuf;

use crate::config::LayoutConfig;
use crate::error::CipherResult;
use crate::glyph::{GlyphVocabulary, Keymap};
use crate::layout::{LayoutDriver, PageKind, Skipped};
use crate::paths::ArtifactPaths;
use crate::render::{self, OutputFormat};
use crate::text;

/// Everything one invocation needs.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input: PathBuf,
    pub keymap: PathBuf,
    /// Output path without extension.
    pub output_base: PathBuf,
    pub format: OutputFormat,
    pub config: LayoutConfig,
    pub legend: bool,
    pub solution: bool,
}

impl RunRequest {
    /// Stages to run, in order. The encoded page is always produced.
    pub fn stages(&self) -> Vec<PageKind> {
        let mut stages = Vec::with_capacity(3);
        if self.legend {
            stages.push(PageKind::Legend);
        }
        if self.solution {
            stages.push(PageKind::Solution);
        }
        stages.push(PageKind::Encoded);
        stages
    }
}

/// One written page.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenPage {
    pub kind: PageKind,
    pub path: PathBuf,
    pub letters: usize,
    pub skipped: Vec<Skipped>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub pages: Vec<WrittenPage>,
}

impl RunReport {
    pub fn paths(&self) -> impl Iterator<Item = &std::path::Path> {
        self.pages.iter().map(|p| p.path.as_path())
    }
}

/// Execute `request`.
pub fn run(request: &RunRequest) -> CipherResult<RunReport> {
    request.config.validate()?;
    let keymap = Keymap::load(&request.keymap)?;
    let lines = text::read_lines(&request.input)?;

    let driver = LayoutDriver::new(GlyphVocabulary::standard(), &keymap, request.config.clone());
    let artifacts = ArtifactPaths::new(&request.output_base, request.format);

    let mut report = RunReport::default();
    for kind in request.stages() {
        tracing::info!(page = kind.label(), "rendering");
        let page = driver.render(kind, &lines);
        let path = artifacts.for_kind(kind);
        render::write_page(&page, request.format, path)?;
        report.pages.push(WrittenPage {
            kind,
            path: path.to_path_buf(),
            letters: page.placements.len(),
            skipped: page.skipped,
        });
    }
    Ok(report)
}
