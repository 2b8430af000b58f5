// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # symbolic-cipher
//!
//! Renders plain text as a Pigpen-style symbolic cipher: each letter becomes a
//! few straight line segments from a fixed vocabulary, laid out with greedy
//! word wrap on a PDF, SVG or PNG page, optionally captioned with the plaintext.
//!
//! ## Architecture
//!
//! - **Glyphs** (`glyph`): primitive vocabulary, JSON keymap, per-letter plotter
//! - **Text** (`text`): diacritic stripping and input loading
//! - **Layout** (`layout`): fixed-advance word wrap and the page driver
//! - **Rendering** (`render`): `Surface` trait with SVG, PDF and PNG backends
//! - **Pipeline** (`pipeline`): legend → solution → encoded page run
//!
//! ## Library usage
//!
//! ```no_run
//! use symbolic_cipher::config::{LayoutConfig, PageConfig};
//! use symbolic_cipher::glyph::{GlyphVocabulary, Keymap};
//! use symbolic_cipher::layout::LayoutDriver;
//! use symbolic_cipher::render::{self, OutputFormat};
//!
//! let keymap = Keymap::builtin();
//! let config = LayoutConfig::for_page(PageConfig::canvas(), 0);
//! let driver = LayoutDriver::new(GlyphVocabulary::standard(), &keymap, config);
//! let page = driver.solution(&["Hola mundo"]);
//! render::write_page(&page, OutputFormat::Svg, "hola_decoded.svg".as_ref()).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod glyph;
pub mod layout;
pub mod paths;
pub mod pipeline;
pub mod render;
pub mod text;
