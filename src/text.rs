//! Text normalization ahead of layout, plus input file loading.
//!
//! Normalization strips trailing line-break markers and diacritics
//! (compatibility decomposition, then every character with a non-zero
//! canonical combining class is dropped). Case is left alone: folding
//! happens per letter at keymap lookup.

use std::path::Path;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

use crate::error::{InputError, InputResult};

/// Strip diacritics from `text`, e.g. `"áéíóú"` → `"aeiou"`.
pub fn strip_diacritics(text: &str) -> String {
    text.nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect()
}

/// Normalize one raw line. An empty result is kept: it forces a line break.
pub fn normalize_line(line: &str) -> String {
    strip_diacritics(line.trim_end_matches(['\n', '\r']))
}

/// Normalize a sequence of raw lines.
pub fn normalize_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|l| normalize_line(l.as_ref()))
        .collect()
}

/// Read a text file as raw lines (line-break markers removed).
pub fn read_lines(path: &Path) -> InputResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InputError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            InputError::Read {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;
    let lines: Vec<String> = content.lines().map(str::to_owned).collect();
    tracing::debug!(path = %path.display(), lines = lines.len(), "input read");
    Ok(lines)
}
