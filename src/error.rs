//! Rich diagnostic error types for the symbolic cipher.
//!
//! Each area defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.
//!
//! Only fatal conditions live here. A letter missing from the keymap or a
//! primitive missing from the vocabulary is skipped and reported on the page
//! (see [`crate::layout::Skipped`]), never raised.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the symbolic cipher.
///
/// Each variant wraps an area-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum CipherError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Keymap(#[from] KeymapError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Keymap errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum KeymapError {
    #[error("keymap file not found: {path}")]
    #[diagnostic(
        code(cipher::keymap::not_found),
        help(
            "Pass the keymap location with `--keymap <path>`. \
             A sample keymap ships in `assets/keymap.json`."
        )
    )]
    NotFound { path: String },

    #[error("failed to read keymap: {path}")]
    #[diagnostic(
        code(cipher::keymap::read),
        help("Check that the file is readable and is UTF-8 text.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed keymap {path}: {message}")]
    #[diagnostic(
        code(cipher::keymap::malformed),
        help(
            "A keymap is a JSON object mapping single lowercase letters to \
             arrays of primitive names, e.g. {{\"a\": [\"center\"]}}."
        )
    )]
    Malformed { path: String, message: String },

    #[error("keymap key {key:?} is not a single character")]
    #[diagnostic(
        code(cipher::keymap::bad_key),
        help("Every key must be exactly one letter, such as \"a\".")
    )]
    BadKey { key: String },

    #[error("keymap defines letter '{letter}' more than once")]
    #[diagnostic(
        code(cipher::keymap::duplicate),
        help("Keys are case-folded on load, so \"A\" and \"a\" name the same letter.")
    )]
    Duplicate { letter: char },
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum InputError {
    #[error("input file not found: {path}")]
    #[diagnostic(
        code(cipher::input::not_found),
        help("Check the path passed with `-i`.")
    )]
    NotFound { path: String },

    #[error("failed to read input file: {path}")]
    #[diagnostic(
        code(cipher::input::read),
        help("The input must be a readable UTF-8 text file.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Render / output errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("unsupported output format: {extension:?}")]
    #[diagnostic(
        code(cipher::render::unsupported_format),
        help("Supported output formats are `pdf`, `svg` and `png`.")
    )]
    UnsupportedFormat { extension: String },

    #[error("failed to encode {format} page: {message}")]
    #[diagnostic(
        code(cipher::render::encode),
        help("The page backend could not serialize the drawing. This is a bug; please report it.")
    )]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("failed to write output file: {path}")]
    #[diagnostic(
        code(cipher::render::write),
        help(
            "Check that the output directory exists and is writable. \
             Any previous file at this path was left untouched."
        )
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(cipher::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}")]
    #[diagnostic(
        code(cipher::config::parse),
        help("Check the TOML syntax in the config file. {message}")
    )]
    Parse { path: String, message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(cipher::config::invalid),
        help("Glyph size and spacings must be positive and the margins must leave room on the page.")
    )]
    Invalid { message: String },
}

pub type KeymapResult<T> = std::result::Result<T, KeymapError>;
pub type InputResult<T> = std::result::Result<T, InputError>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Convenience alias for functions returning cipher results.
pub type CipherResult<T> = std::result::Result<T, CipherError>;
