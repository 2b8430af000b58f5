//! SVG canvas surface.
//!
//! SVG's y axis points down, so every page y becomes `height - y` here.
//! Anything drawn outside the viewBox is clipped by the viewer.

use crate::config::StrokeConfig;
use crate::error::RenderResult;
use crate::glyph::{Caption, Segment};
use crate::render::Surface;

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Accumulates SVG elements for one page.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    /// The complete document text.
    pub fn to_svg_string(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height),
        );
        svg.push('\n');
        svg.push_str(r#"  <rect x="0" y="0" width="100%" height="100%" fill="white"/>"#);
        svg.push('\n');
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn draw_segment(&mut self, segment: &Segment, stroke: &StrokeConfig) {
        let dash = if stroke.dash.is_empty() {
            String::new()
        } else {
            let pattern: Vec<String> = stroke.dash.iter().map(|d| fmt_num(*d)).collect();
            format!(r#" stroke-dasharray="{}""#, pattern.join(" "))
        };
        self.body.push_str(&format!(
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round"{}/>"#,
            fmt_num(segment.x1),
            fmt_num(self.flip(segment.y1)),
            fmt_num(segment.x2),
            fmt_num(self.flip(segment.y2)),
            stroke.hex(),
            fmt_num(stroke.width),
            dash,
        ));
        self.body.push('\n');
    }

    fn draw_label(&mut self, caption: &Caption) {
        self.body.push_str(&format!(
            r#"  <text x="{}" y="{}" font-family="{}" font-size="{}" text-anchor="middle">{}</text>"#,
            fmt_num(caption.anchor.x),
            fmt_num(self.flip(caption.anchor.baseline)),
            FONT_FAMILY,
            fmt_num(caption.font_size),
            escape_xml(&caption.text),
        ));
        self.body.push('\n');
    }

    fn encode(&mut self) -> RenderResult<Vec<u8>> {
        Ok(self.to_svg_string().into_bytes())
    }
}

/// Two decimals, trailing zeros trimmed: `20`, `12.5`, `0.33`.
fn fmt_num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
