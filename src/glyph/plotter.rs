//! Glyph plotter: primitive names + anchor + size → absolute page geometry.
//!
//! Page coordinates have `y` growing upward (PDF convention). A glyph hangs
//! below its baseline: each primitive's unscaled `y` is scaled by
//! `size / 50` and subtracted from the baseline. Backends with a downward
//! `y` axis flip at their own boundary.

use serde::{Deserialize, Serialize};

use crate::glyph::vocabulary::{GLYPH_UNITS, GlyphVocabulary, Segment};

// Caption placement constants, as fractions of the glyph size. These were
// fitted by eye to the proportions of the standard vocabulary (glyphs span
// roughly 0.2..0.6 of the box horizontally and 0.3..0.9 below the baseline),
// so they are kept verbatim rather than derived.

/// `below`: caption centre sits at the horizontal middle of the advance box...
const BELOW_ANCHOR_X: f64 = 0.4;
/// ...and under the lowest primitive, clear of the glyph.
const BELOW_DROP: f64 = 1.2;
/// Small caption so it does not collide with the next line.
const BELOW_FONT: f64 = 0.2;

/// `inside`: caption centre sits left of the arms' meeting point...
const INSIDE_ANCHOR_X: f64 = 0.2;
/// ...at the height of the horizontal bar.
const INSIDE_DROP: f64 = 0.5;
const INSIDE_FONT: f64 = 0.4;

/// Anchor for one letter: left edge of its advance box and the line baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub baseline: f64,
}

impl Position {
    pub fn new(x: f64, baseline: f64) -> Self {
        Self { x, baseline }
    }
}

/// Where (and whether) the plaintext letter is printed next to its glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionStyle {
    #[default]
    None,
    Below,
    Inside,
}

impl CaptionStyle {
    pub fn is_shown(self) -> bool {
        self != CaptionStyle::None
    }
}

/// A centred text label in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    /// Horizontal centre and baseline of the label.
    pub anchor: Position,
    pub font_size: f64,
}

/// Output of plotting one letter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlottedGlyph {
    pub segments: Vec<Segment>,
    pub caption: Option<Caption>,
    /// Primitive names that were not in the vocabulary and were skipped.
    pub unknown: Vec<String>,
}

/// Turns keymap entries into absolute segments using a fixed vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct GlyphPlotter<'v> {
    vocabulary: &'v GlyphVocabulary,
}

impl<'v> GlyphPlotter<'v> {
    pub fn new(vocabulary: &'v GlyphVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Plot `letter` drawn from `primitives` at `position` with glyph `size`.
    ///
    /// Unknown primitive names are logged and skipped; the rest of the
    /// letter is still drawn.
    pub fn plot(
        &self,
        letter: char,
        primitives: &[String],
        position: Position,
        size: f64,
        caption: CaptionStyle,
    ) -> PlottedGlyph {
        let scale = size / GLYPH_UNITS;
        let mut out = PlottedGlyph::default();

        for name in primitives {
            match self.vocabulary.lookup(name) {
                Some(primitive) => {
                    let s = primitive.segment;
                    out.segments.push(Segment {
                        x1: position.x + s.x1 * scale,
                        y1: position.baseline - s.y1 * scale,
                        x2: position.x + s.x2 * scale,
                        y2: position.baseline - s.y2 * scale,
                    });
                }
                None => {
                    tracing::warn!(%letter, primitive = %name, "primitive not in vocabulary, skipping segment");
                    out.unknown.push(name.clone());
                }
            }
        }

        out.caption = caption_for(letter, position, size, caption);
        out
    }
}

fn caption_for(letter: char, at: Position, size: f64, style: CaptionStyle) -> Option<Caption> {
    let (dx, drop, font) = match style {
        CaptionStyle::None => return None,
        CaptionStyle::Below => (BELOW_ANCHOR_X, BELOW_DROP, BELOW_FONT),
        CaptionStyle::Inside => (INSIDE_ANCHOR_X, INSIDE_DROP, INSIDE_FONT),
    };
    Some(Caption {
        text: letter.to_uppercase().collect(),
        anchor: Position::new(at.x + size * dx, at.baseline - size * drop),
        font_size: size * font,
    })
}
