//! Page backends: anything that can stroke a segment, place a centred label,
//! and persist the result.
//!
//! ## Components
//!
//! - [`svg`]: vector canvas (y axis flipped at the boundary)
//! - [`pdf`]: single-page PDF writer on `lopdf`
//! - [`png`]: raster image, the SVG page rasterised with `resvg`
//! - [`metrics`]: Helvetica advance widths for centring PDF labels
//!
//! The layout core never sees which backend is in use: it hands a
//! [`Page`](crate::layout::Page) to [`write_page`], which picks the surface
//! from the [`OutputFormat`].

pub mod metrics;
pub mod pdf;
pub mod png;
pub mod svg;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config::{PageConfig, StrokeConfig};
use crate::error::{RenderError, RenderResult};
use crate::glyph::{Caption, Segment};
use crate::layout::Page;
use crate::paths;

pub use pdf::PdfSurface;
pub use png::PngSurface;
pub use svg::SvgSurface;

/// Drawing capabilities a backend must provide. Coordinates are page units
/// with the origin at the bottom-left corner and y growing upward.
pub trait Surface {
    /// Stroke a straight line.
    fn draw_segment(&mut self, segment: &Segment, stroke: &StrokeConfig);

    /// Place `caption.text` horizontally centred on `caption.anchor`.
    fn draw_label(&mut self, caption: &Caption);

    /// Serialize everything drawn so far into the file format's bytes.
    fn encode(&mut self) -> RenderResult<Vec<u8>>;

    /// Encode and persist to `path`. The target is replaced only on success.
    fn finalize(&mut self, path: &Path) -> RenderResult<()> {
        let bytes = self.encode()?;
        paths::write_atomic(path, &bytes)
    }
}

/// Supported output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Pdf,
    Svg,
    Png,
}

impl OutputFormat {
    /// Parse a file extension (case-insensitive, leading dot allowed).
    pub fn from_extension(ext: &str) -> RenderResult<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(RenderError::UnsupportedFormat {
                extension: ext.to_string(),
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }

    /// Page preset this format was designed around.
    pub fn default_page(self) -> PageConfig {
        match self {
            OutputFormat::Pdf => PageConfig::letter(),
            OutputFormat::Svg | OutputFormat::Png => PageConfig::canvas(),
        }
    }

    /// Legend row length that fits the default page.
    pub fn default_legend_group(self) -> usize {
        match self {
            OutputFormat::Pdf => 5,
            OutputFormat::Svg | OutputFormat::Png => 0,
        }
    }

    /// A fresh, empty surface framing a `width × height` page.
    pub fn surface(self, width: f64, height: f64) -> Box<dyn Surface> {
        match self {
            OutputFormat::Pdf => Box::new(PdfSurface::new(width, height)),
            OutputFormat::Svg => Box::new(SvgSurface::new(width, height)),
            OutputFormat::Png => Box::new(PngSurface::new(width, height)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> RenderResult<Self> {
        Self::from_extension(s)
    }
}

/// Paint `page` onto a new surface of `format` and persist it at `path`.
pub fn write_page(page: &Page, format: OutputFormat, path: &Path) -> RenderResult<()> {
    let mut surface = format.surface(page.width, page.height);
    page.paint(surface.as_mut());
    surface.finalize(path)?;
    tracing::info!(page = page.kind.label(), path = %path.display(), "page written");
    Ok(())
}
