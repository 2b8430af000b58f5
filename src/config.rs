//! Layout and page configuration.
//!
//! All geometry knobs travel in one immutable [`LayoutConfig`] handed to the
//! layout driver. A config can be loaded from TOML; every field has a default,
//! so a file only needs the values it changes:
//!
//! ```toml
//! size = 40.0
//! caption_style = "inside"
//!
//! [page]
//! width = 842.0
//! height = 595.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::glyph::CaptionStyle;

/// Page bounds and the first baseline, in page units (y grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Baseline of the first text line.
    pub initial_baseline: f64,
}

impl PageConfig {
    /// Wide landscape canvas used by the vector (SVG) surface.
    pub fn canvas() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            margin_left: 10.0,
            margin_right: 10.0,
            initial_baseline: 750.0,
        }
    }

    /// US Letter portrait in points, used by the PDF page writer.
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_left: 40.0,
            margin_right: 40.0,
            initial_baseline: 700.0,
        }
    }

    /// Right-hand limit a word must end at or before.
    pub fn right_limit(&self) -> f64 {
        self.width - self.margin_right
    }

    pub fn usable_width(&self) -> f64 {
        self.right_limit() - self.margin_left
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::letter()
    }
}

/// Line stroke used for every glyph segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeConfig {
    #[serde(default = "default_stroke_width")]
    pub width: f64,
    /// `#rrggbb` colour.
    #[serde(default = "default_stroke_color")]
    pub color: String,
    /// Optional dash pattern (on, off lengths). Empty means solid.
    #[serde(default)]
    pub dash: Vec<f64>,
}

fn default_stroke_width() -> f64 {
    2.0
}
fn default_stroke_color() -> String {
    "#000000".into()
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            width: default_stroke_width(),
            color: default_stroke_color(),
            dash: Vec::new(),
        }
    }
}

impl StrokeConfig {
    /// Colour as 8-bit RGB. Every backend derives its colour from here.
    /// Validated configs always parse; anything else draws black.
    pub fn rgb8(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.color).unwrap_or((0, 0, 0))
    }

    /// Colour as RGB components in `0.0..=1.0`.
    pub fn rgb(&self) -> (f64, f64, f64) {
        let (r, g, b) = self.rgb8();
        (
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Canonical `#rrggbb` form of [`Self::rgb8`].
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |message: String| Err(ConfigError::Invalid { message });
        if !(self.width >= 0.0) {
            return invalid(format!("stroke width must not be negative, got {}", self.width));
        }
        if parse_hex_color(&self.color).is_none() {
            return invalid(format!(
                "stroke colour must be #rrggbb, got \"{}\"",
                self.color
            ));
        }
        if self.dash.iter().any(|d| !(*d >= 0.0) || !d.is_finite()) {
            return invalid(format!(
                "dash lengths must be finite and non-negative, got {:?}",
                self.dash
            ));
        }
        if !self.dash.is_empty() && self.dash.iter().all(|d| *d == 0.0) {
            return invalid("dash pattern must not be all zeros".to_string());
        }
        Ok(())
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Everything the layout pass needs besides the keymap and vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Glyph size; primitives are scaled by `size / 50`.
    #[serde(default = "default_size")]
    pub size: f64,
    /// Advance width per letter as a fraction of `size`.
    #[serde(default = "default_letter_spacing")]
    pub letter_spacing: f64,
    /// Line height as a fraction of `size`.
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f64,
    /// Drop the extra advance between words.
    #[serde(default)]
    pub trim_words: bool,
    /// Caption placement on the solution page.
    #[serde(default = "default_caption_style")]
    pub caption_style: CaptionStyle,
    /// Letters per legend row; 0 puts the whole alphabet on one line.
    #[serde(default)]
    pub legend_group: usize,
    #[serde(default)]
    pub stroke: StrokeConfig,
    #[serde(default)]
    pub page: PageConfig,
}

fn default_size() -> f64 {
    50.0
}
fn default_letter_spacing() -> f64 {
    0.4
}
fn default_line_spacing() -> f64 {
    0.6
}
fn default_caption_style() -> CaptionStyle {
    CaptionStyle::Below
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            letter_spacing: default_letter_spacing(),
            line_spacing: default_line_spacing(),
            trim_words: false,
            caption_style: default_caption_style(),
            legend_group: 0,
            stroke: StrokeConfig::default(),
            page: PageConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Defaults paired with a page preset and the legend grouping that goes with it.
    pub fn for_page(page: PageConfig, legend_group: usize) -> Self {
        Self {
            page,
            legend_group,
            ..Default::default()
        }
    }

    /// Fixed horizontal advance per letter.
    pub fn advance(&self) -> f64 {
        self.size * self.letter_spacing
    }

    /// Load from a TOML file on top of the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        Self::load_over(path, &Self::default())
    }

    /// Load from a TOML file, taking every value the file leaves out from `base`.
    pub fn load_over(path: &Path, base: &LayoutConfig) -> ConfigResult<Self> {
        let parse_err = |message: String| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let overrides: toml::Table =
            toml::from_str(&content).map_err(|e| parse_err(e.to_string()))?;

        let mut merged = match toml::Value::try_from(base) {
            Ok(toml::Value::Table(table)) => table,
            Ok(_) => toml::Table::new(),
            Err(e) => return Err(parse_err(e.to_string())),
        };
        merge_tables(&mut merged, overrides);

        let config: Self = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| parse_err(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the layout pass cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |message: String| Err(ConfigError::Invalid { message });
        if !(self.size > 0.0) {
            return invalid(format!("glyph size must be positive, got {}", self.size));
        }
        if !(self.letter_spacing > 0.0) {
            return invalid(format!(
                "letter spacing must be positive, got {}",
                self.letter_spacing
            ));
        }
        if !(self.line_spacing > 0.0) {
            return invalid(format!(
                "line spacing must be positive, got {}",
                self.line_spacing
            ));
        }
        if !(self.page.usable_width() > 0.0) || !(self.page.height > 0.0) {
            return invalid(format!(
                "page {}x{} with margins {}/{} leaves no room for text",
                self.page.width, self.page.height, self.page.margin_left, self.page.margin_right
            ));
        }
        self.stroke.validate()
    }
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        if let toml::Value::Table(over) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, over);
                continue;
            }
            base.insert(key, toml::Value::Table(over));
        } else {
            base.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historical_values() {
        let c = LayoutConfig::default();
        assert_eq!(c.size, 50.0);
        assert_eq!(c.advance(), 20.0);
        assert_eq!(c.caption_style, CaptionStyle::Below);
        assert_eq!(c.stroke.width, 2.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn presets() {
        let canvas = PageConfig::canvas();
        assert_eq!(canvas.right_limit(), 1190.0);
        assert_eq!(canvas.initial_baseline, 750.0);
        let letter = PageConfig::letter();
        assert_eq!(letter.usable_width(), 532.0);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let c: LayoutConfig = toml::from_str(
            r#"
            size = 40.0
            caption_style = "inside"

            [page]
            width = 842.0
            height = 595.0
            margin_left = 20.0
            margin_right = 20.0
            initial_baseline = 560.0
            "#,
        )
        .unwrap();
        assert_eq!(c.size, 40.0);
        assert_eq!(c.letter_spacing, 0.4);
        assert_eq!(c.caption_style, CaptionStyle::Inside);
        assert_eq!(c.page.width, 842.0);
        assert_eq!(c.stroke, StrokeConfig::default());
    }

    #[test]
    fn load_rejects_bad_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cipher.toml");
        std::fs::write(&path, "size = -3.0\n").unwrap();
        let err = LayoutConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cipher.toml");
        std::fs::write(&path, "size = = 3\n").unwrap();
        let err = LayoutConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_over_keeps_base_page() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cipher.toml");
        std::fs::write(&path, "size = 30.0\n[page]\nmargin_left = 25.0\n").unwrap();
        let base = LayoutConfig::for_page(PageConfig::canvas(), 0);
        let c = LayoutConfig::load_over(&path, &base).unwrap();
        assert_eq!(c.size, 30.0);
        assert_eq!(c.page.width, 1200.0);
        assert_eq!(c.page.margin_left, 25.0);
        assert_eq!(c.page.initial_baseline, 750.0);
    }

    #[test]
    fn margins_must_leave_room() {
        let mut c = LayoutConfig::default();
        c.page.margin_left = 400.0;
        c.page.margin_right = 400.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn stroke_colour_parsing() {
        let mut s = StrokeConfig::default();
        assert_eq!(s.rgb(), (0.0, 0.0, 0.0));
        s.color = "#FF0000".into();
        assert_eq!(s.rgb(), (1.0, 0.0, 0.0));
        assert_eq!(s.hex(), "#ff0000");
    }

    #[test]
    fn unparseable_colour_is_invalid() {
        for color in ["red", "#f00", "#gg0000", "#+f0000", "000000", "#0000000"] {
            let mut c = LayoutConfig::default();
            c.stroke.color = color.into();
            let err = c.validate().unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{color}");
        }
    }

    #[test]
    fn dash_pattern_validation() {
        let mut c = LayoutConfig::default();
        c.stroke.dash = vec![4.0, 0.0];
        assert!(c.validate().is_ok());

        c.stroke.dash = vec![0.0, 0.0];
        assert!(matches!(c.validate(), Err(ConfigError::Invalid { .. })));

        c.stroke.dash = vec![3.0, -1.0];
        assert!(matches!(c.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn load_rejects_bad_stroke_colour() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cipher.toml");
        std::fs::write(&path, "[stroke]\ncolor = \"red\"\n").unwrap();
        let err = LayoutConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
