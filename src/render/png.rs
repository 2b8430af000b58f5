//! Raster surface: draws into an SVG document, then rasterises it with `resvg`.
//!
//! One pixel per page unit, so a canvas page becomes a 1200×800 image.
//! Labels need a system font matching the SVG font list; without one they
//! are left out of the raster.

use resvg::tiny_skia;

use crate::config::StrokeConfig;
use crate::error::{RenderError, RenderResult};
use crate::glyph::{Caption, Segment};
use crate::render::{Surface, SvgSurface};

#[derive(Debug, Clone)]
pub struct PngSurface {
    svg: SvgSurface,
}

impl PngSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            svg: SvgSurface::new(width, height),
        }
    }
}

impl Surface for PngSurface {
    fn draw_segment(&mut self, segment: &Segment, stroke: &StrokeConfig) {
        self.svg.draw_segment(segment, stroke);
    }

    fn draw_label(&mut self, caption: &Caption) {
        self.svg.draw_label(caption);
    }

    fn encode(&mut self) -> RenderResult<Vec<u8>> {
        rasterize(&self.svg.to_svg_string())
    }
}

fn encode_err(message: impl ToString) -> RenderError {
    RenderError::Encode {
        format: "png",
        message: message.to_string(),
    }
}

/// Render an SVG document to PNG bytes at its intrinsic size.
pub fn rasterize(svg: &str) -> RenderResult<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(encode_err)?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        encode_err(format!(
            "cannot allocate a {}x{} image",
            size.width(),
            size.height()
        ))
    })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(encode_err)
}
