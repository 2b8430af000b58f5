//! Page layout: normalized text → wrapped letter placements → plotted geometry.
//!
//! ## Components
//!
//! - [`wrap`]: greedy fixed-advance word wrap producing [`PlacementEvent`]s
//! - [`driver`]: runs normalize → wrap → plot for one page and collects the draw stream

pub mod driver;
pub mod wrap;

pub use driver::{DrawOp, LayoutDriver, Page, PageKind, legend_lines};
pub use wrap::{LineWrapEngine, PlacementEvent, WrapOutput, WrapParams};

/// An element dropped from a page without aborting the render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skipped {
    /// The letter has no keymap entry; no glyph and no advance.
    Letter { letter: char },
    /// A keymap entry names a primitive the vocabulary lacks; that segment is omitted.
    Primitive { letter: char, primitive: String },
}

impl std::fmt::Display for Skipped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skipped::Letter { letter } => write!(f, "letter {letter:?} not in keymap"),
            Skipped::Primitive { letter, primitive } => {
                write!(f, "primitive '{primitive}' of letter {letter:?} not in vocabulary")
            }
        }
    }
}
