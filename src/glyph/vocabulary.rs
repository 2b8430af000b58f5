//! Fixed primitive vocabulary: the named line segments every glyph is built from.
//!
//! Coordinates live in an unscaled 0–50 unit local glyph box. `x` grows to
//! the right and `y` grows *downward* from the baseline; the plotter
//! subtracts scaled `y` from the baseline to place a segment on the page.
//!
//! ```text
//!   y=15      bl \ / br          (bottom_left / bottom_right meet at x=20)
//!   y=30  ---------------        (center, x 10..30)
//!   y=45      tl / \ tr          (top_left / top_right meet at x=20)
//! ```

use std::sync::OnceLock;

/// Side of the local glyph box the vocabulary coordinates are expressed in.
pub const GLYPH_UNITS: f64 = 50.0;

/// A straight line segment `(x1, y1) → (x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// A named primitive in the vocabulary.
#[derive(Debug, Clone)]
pub struct Primitive {
    /// Identifier referenced by keymap entries.
    pub name: &'static str,
    /// Unscaled geometry in local glyph units.
    pub segment: Segment,
}

/// Read-only table of primitives, shared by every render in the process.
#[derive(Debug)]
pub struct GlyphVocabulary {
    primitives: Vec<Primitive>,
}

static STANDARD: OnceLock<GlyphVocabulary> = OnceLock::new();

fn build_standard() -> Vec<Primitive> {
    vec![
        Primitive {
            name: "bottom_left",
            segment: Segment::new(10.0, 30.0, 20.0, 15.0),
        },
        Primitive {
            name: "bottom_right",
            segment: Segment::new(30.0, 30.0, 20.0, 15.0),
        },
        Primitive {
            name: "center",
            segment: Segment::new(10.0, 30.0, 30.0, 30.0),
        },
        Primitive {
            name: "top_left",
            segment: Segment::new(10.0, 30.0, 20.0, 45.0),
        },
        Primitive {
            name: "top_right",
            segment: Segment::new(30.0, 30.0, 20.0, 45.0),
        },
    ]
}

impl GlyphVocabulary {
    /// The built-in five-primitive vocabulary.
    pub fn standard() -> &'static GlyphVocabulary {
        STANDARD.get_or_init(|| GlyphVocabulary {
            primitives: build_standard(),
        })
    }

    /// Look up a primitive by identifier (exact match).
    pub fn lookup(&self, name: &str) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
