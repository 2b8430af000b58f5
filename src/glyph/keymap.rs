//! The cipher key: letter → ordered primitive names.
//!
//! Loaded once per run from a JSON object such as
//! `{"a": ["center"], "b": ["top_left", "bottom_right"]}` and immutable
//! afterwards. Primitive names are not checked against the vocabulary here;
//! unknown names are skipped (with a warning) when a glyph is plotted.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{KeymapError, KeymapResult};

const BUILTIN_KEYMAP: &str = include_str!("../../assets/keymap.json");

/// Letter → primitive-sequence substitution table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keymap {
    entries: BTreeMap<char, Vec<String>>,
}

impl Keymap {
    /// Load a keymap from a JSON file. Any failure is fatal to the run.
    pub fn load(path: &Path) -> KeymapResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                KeymapError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                KeymapError::Read {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;
        let keymap = Self::from_json_str(&content, &path.display().to_string())?;
        tracing::info!(path = %path.display(), letters = keymap.len(), "keymap loaded");
        Ok(keymap)
    }

    /// Parse a keymap from JSON text. `origin` names the source in errors.
    pub fn from_json_str(json: &str, origin: &str) -> KeymapResult<Self> {
        let raw: BTreeMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|e| KeymapError::Malformed {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        let mut entries = BTreeMap::new();
        for (key, primitives) in raw {
            let mut chars = key.chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(KeymapError::BadKey { key }),
            };
            let letter = fold_case(letter).ok_or_else(|| KeymapError::BadKey { key: key.clone() })?;
            if entries.insert(letter, primitives).is_some() {
                return Err(KeymapError::Duplicate { letter });
            }
        }
        Ok(Self { entries })
    }

    /// The sample keymap bundled with the crate (a–z over the standard vocabulary).
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_KEYMAP, "<builtin>").expect("bundled keymap is valid")
    }

    /// Build a keymap directly from `(letter, primitives)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (char, Vec<S>)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .filter_map(|(c, prims)| {
                    fold_case(c).map(|c| (c, prims.into_iter().map(Into::into).collect()))
                })
                .collect(),
        }
    }

    /// Primitive names for `letter`, case-folded at lookup time.
    pub fn get(&self, letter: char) -> Option<&[String]> {
        fold_case(letter)
            .and_then(|c| self.entries.get(&c))
            .map(Vec::as_slice)
    }

    pub fn contains(&self, letter: char) -> bool {
        self.get(letter).is_some()
    }

    /// Mapped letters in ascending order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lowercase `c`, rejecting characters whose lowercase form is not a single char.
fn fold_case(c: char) -> Option<char> {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => Some(l),
        _ => None,
    }
}
