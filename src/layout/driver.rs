//! Layout driver: one call renders one page into an ordered draw stream.

use crate::config::{LayoutConfig, StrokeConfig};
use crate::glyph::{Caption, CaptionStyle, GlyphPlotter, GlyphVocabulary, Keymap, Segment};
use crate::layout::Skipped;
use crate::layout::wrap::{LineWrapEngine, PlacementEvent, WrapParams};
use crate::render::Surface;
use crate::text;

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The three pages a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Alphabet legend with captions: the decoding key.
    Legend,
    /// Input text with captions: the answer sheet.
    Solution,
    /// Input text as glyphs only.
    Encoded,
}

impl PageKind {
    /// Suffix appended to the output base name.
    pub fn file_suffix(self) -> &'static str {
        match self {
            PageKind::Legend => "_abc",
            PageKind::Solution => "_decoded",
            PageKind::Encoded => "",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageKind::Legend => "legend",
            PageKind::Solution => "solution",
            PageKind::Encoded => "encoded",
        }
    }
}

/// One drawing instruction in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Segment(Segment),
    Label(Caption),
}

/// A fully laid-out page, ready to paint onto any [`Surface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub kind: PageKind,
    pub width: f64,
    pub height: f64,
    pub stroke: StrokeConfig,
    /// Draw stream in reading order; each letter's segments precede its caption.
    pub ops: Vec<DrawOp>,
    pub placements: Vec<PlacementEvent>,
    pub skipped: Vec<Skipped>,
}

impl Page {
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Segment(s) => Some(s),
            DrawOp::Label(_) => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Caption> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Label(c) => Some(c),
            DrawOp::Segment(_) => None,
        })
    }

    /// Replay the draw stream onto `surface`.
    pub fn paint(&self, surface: &mut dyn Surface) {
        for op in &self.ops {
            match op {
                DrawOp::Segment(s) => surface.draw_segment(s, &self.stroke),
                DrawOp::Label(c) => surface.draw_label(c),
            }
        }
    }
}

/// Split the legend alphabet into rows of `group` letters (0 = one row).
pub fn legend_lines(group: usize) -> Vec<String> {
    if group == 0 {
        return vec![ALPHABET.to_string()];
    }
    ALPHABET
        .as_bytes()
        .chunks(group)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}

/// Orchestrates normalize → wrap → plot with shared, read-only glyph data.
#[derive(Debug, Clone)]
pub struct LayoutDriver<'a> {
    vocabulary: &'a GlyphVocabulary,
    keymap: &'a Keymap,
    config: LayoutConfig,
}

impl<'a> LayoutDriver<'a> {
    pub fn new(vocabulary: &'a GlyphVocabulary, keymap: &'a Keymap, config: LayoutConfig) -> Self {
        Self {
            vocabulary,
            keymap,
            config,
        }
    }

    /// Render a page of `kind`. Text pages normalize `raw_lines`; the legend ignores them.
    pub fn render<S: AsRef<str>>(&self, kind: PageKind, raw_lines: &[S]) -> Page {
        match kind {
            PageKind::Legend => self.legend(),
            PageKind::Solution => self.solution(raw_lines),
            PageKind::Encoded => self.encoded(raw_lines),
        }
    }

    /// Glyphs only.
    pub fn encoded<S: AsRef<str>>(&self, raw_lines: &[S]) -> Page {
        let lines = text::normalize_lines(raw_lines);
        self.compose(PageKind::Encoded, &lines, CaptionStyle::None)
    }

    /// Glyphs with the configured caption style.
    pub fn solution<S: AsRef<str>>(&self, raw_lines: &[S]) -> Page {
        let lines = text::normalize_lines(raw_lines);
        self.compose(PageKind::Solution, &lines, self.config.caption_style)
    }

    /// The alphabet with captions below. Already ASCII, so no normalization.
    pub fn legend(&self) -> Page {
        let lines = legend_lines(self.config.legend_group);
        self.compose(PageKind::Legend, &lines, CaptionStyle::Below)
    }

    fn compose(&self, kind: PageKind, lines: &[String], caption: CaptionStyle) -> Page {
        let params = WrapParams::new(&self.config, caption);
        let wrapped = LineWrapEngine::new(self.keymap, params).layout(lines);
        let plotter = GlyphPlotter::new(self.vocabulary);

        let mut ops = Vec::new();
        let mut skipped = wrapped.skipped;
        for event in &wrapped.placements {
            // Placements only exist for mapped letters.
            let Some(primitives) = self.keymap.get(event.letter) else {
                continue;
            };
            let glyph = plotter.plot(
                event.letter,
                primitives,
                event.position,
                event.size,
                event.caption,
            );
            ops.extend(glyph.segments.into_iter().map(DrawOp::Segment));
            ops.extend(glyph.caption.map(DrawOp::Label));
            skipped.extend(glyph.unknown.into_iter().map(|primitive| Skipped::Primitive {
                letter: event.letter,
                primitive,
            }));
        }

        tracing::debug!(
            page = kind.label(),
            letters = wrapped.placements.len(),
            ops = ops.len(),
            skipped = skipped.len(),
            "page laid out"
        );

        Page {
            kind,
            width: self.config.page.width,
            height: self.config.page.height,
            stroke: self.config.stroke.clone(),
            ops,
            placements: wrapped.placements,
            skipped,
        }
    }
}
