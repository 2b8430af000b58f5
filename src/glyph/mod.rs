//! Line-segment glyphs for the symbolic cipher.
//!
//! Every letter is drawn as a handful of straight segments picked from a
//! small fixed vocabulary, in the spirit of the Pigpen cipher.
//!
//! ## Components
//!
//! - [`vocabulary`]: the five named primitives in unscaled 0–50 glyph units
//! - [`keymap`]: letter → ordered primitive names, loaded from JSON
//! - [`plotter`]: scales and anchors a letter's primitives, plus its caption

pub mod keymap;
pub mod plotter;
pub mod vocabulary;

pub use keymap::Keymap;
pub use plotter::{Caption, CaptionStyle, GlyphPlotter, PlottedGlyph, Position};
pub use vocabulary::{GlyphVocabulary, Primitive, Segment};
