//! Greedy word wrap with a fixed per-letter advance.
//!
//! Each input line is split on the literal space character. A word is
//! measured as `chars * advance` (unmapped letters included) and moved to a
//! new line when it would end past `width - margin_right`; a word wider than
//! the whole line still gets that one break and is then placed at the margin
//! unsplit. Mapped letters are placed and advance the cursor; unmapped ones
//! are skipped and do not advance. After each word the cursor moves one more
//! advance unless `trim_words` is set, and every input line ends with a break.

use crate::config::LayoutConfig;
use crate::glyph::{CaptionStyle, Keymap, Position};
use crate::layout::Skipped;

/// Extra line height (fraction of size) reserved for captions under glyphs.
const BELOW_CAPTION_LEADING: f64 = 0.3;

/// One letter placed on the page, handed to the plotter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementEvent {
    /// Letter as it appeared in the text (case preserved).
    pub letter: char,
    pub position: Position,
    pub size: f64,
    pub caption: CaptionStyle,
}

impl PlacementEvent {
    pub fn shows_caption(&self) -> bool {
        self.caption.is_shown()
    }
}

/// Metrics for one wrap pass, derived from a [`LayoutConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapParams {
    pub size: f64,
    /// `W`: horizontal advance per letter.
    pub advance: f64,
    /// `H`: vertical advance per line break.
    pub line_height: f64,
    pub margin_left: f64,
    /// Words must end at or before this x.
    pub right_limit: f64,
    pub initial_baseline: f64,
    pub trim_words: bool,
    pub caption: CaptionStyle,
}

impl WrapParams {
    pub fn new(config: &LayoutConfig, caption: CaptionStyle) -> Self {
        let mut line_height = config.size * config.line_spacing;
        if caption == CaptionStyle::Below {
            line_height += config.size * BELOW_CAPTION_LEADING;
        }
        Self {
            size: config.size,
            advance: config.advance(),
            line_height,
            margin_left: config.page.margin_left,
            right_limit: config.page.right_limit(),
            initial_baseline: config.page.initial_baseline,
            trim_words: config.trim_words,
            caption,
        }
    }
}

/// Result of one wrap pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrapOutput {
    /// Placements in reading order.
    pub placements: Vec<PlacementEvent>,
    /// Letters dropped because the keymap has no entry for them.
    pub skipped: Vec<Skipped>,
    pub line_breaks: usize,
    /// Baseline the cursor ended on.
    pub final_baseline: f64,
}

/// Cursor for one pass; never outlives [`LineWrapEngine::layout`].
#[derive(Debug)]
struct LayoutState {
    x: f64,
    baseline: f64,
    line_breaks: usize,
}

impl LayoutState {
    fn new(params: &WrapParams) -> Self {
        Self {
            x: params.margin_left,
            baseline: params.initial_baseline,
            line_breaks: 0,
        }
    }

    fn line_break(&mut self, params: &WrapParams) {
        self.baseline -= params.line_height;
        self.x = params.margin_left;
        self.line_breaks += 1;
    }

    fn fits(&self, word_width: f64, params: &WrapParams) -> bool {
        self.x + word_width <= params.right_limit
    }
}

/// Places letters of normalized lines on the page.
#[derive(Debug, Clone, Copy)]
pub struct LineWrapEngine<'k> {
    keymap: &'k Keymap,
    params: WrapParams,
}

impl<'k> LineWrapEngine<'k> {
    pub fn new(keymap: &'k Keymap, params: WrapParams) -> Self {
        Self { keymap, params }
    }

    /// Lay out already-normalized lines. An empty line is a bare line break.
    pub fn layout<S: AsRef<str>>(&self, lines: &[S]) -> WrapOutput {
        let p = &self.params;
        let mut state = LayoutState::new(p);
        let mut out = WrapOutput::default();

        for line in lines {
            let line = line.as_ref();
            if line.is_empty() {
                state.line_break(p);
                continue;
            }

            for word in line.split(' ') {
                let word_width = word.chars().count() as f64 * p.advance;
                if !state.fits(word_width, p) {
                    state.line_break(p);
                }

                for letter in word.chars() {
                    if self.keymap.contains(letter) {
                        out.placements.push(PlacementEvent {
                            letter,
                            position: Position::new(state.x, state.baseline),
                            size: p.size,
                            caption: p.caption,
                        });
                        state.x += p.advance;
                    } else {
                        tracing::warn!(%letter, "letter not in keymap, skipping");
                        out.skipped.push(Skipped::Letter { letter });
                    }
                }

                if !p.trim_words {
                    state.x += p.advance;
                }
            }

            state.line_break(p);
        }

        out.line_breaks = state.line_breaks;
        out.final_baseline = state.baseline;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;

    fn ab_keymap() -> Keymap {
        Keymap::from_entries([
            ('a', vec!["center"]),
            ('b', vec!["top_left", "bottom_right"]),
        ])
    }

    fn canvas_params(caption: CaptionStyle) -> WrapParams {
        WrapParams::new(&LayoutConfig::for_page(PageConfig::canvas(), 0), caption)
    }

    fn xs(out: &WrapOutput) -> Vec<f64> {
        out.placements.iter().map(|p| p.position.x).collect()
    }

    #[test]
    fn line_height_grows_for_below_captions() {
        let config = LayoutConfig::default();
        assert_eq!(WrapParams::new(&config, CaptionStyle::None).line_height, 30.0);
        assert_eq!(WrapParams::new(&config, CaptionStyle::Inside).line_height, 30.0);
        assert_eq!(WrapParams::new(&config, CaptionStyle::Below).line_height, 45.0);
    }

    #[test]
    fn two_letters_share_baseline() {
        let km = ab_keymap();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::None));
        let out = engine.layout(&["ab"]);
        assert_eq!(xs(&out), vec![10.0, 30.0]);
        assert!(out.placements.iter().all(|p| p.position.baseline == 750.0));
        assert_eq!(out.line_breaks, 1);
        assert_eq!(out.final_baseline, 720.0);
    }

    #[test]
    fn words_separated_by_one_advance() {
        let km = ab_keymap();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::None));
        let out = engine.layout(&["ab ba"]);
        assert_eq!(xs(&out), vec![10.0, 30.0, 70.0, 90.0]);
    }

    #[test]
    fn trim_words_drops_word_gap() {
        let km = ab_keymap();
        let mut params = canvas_params(CaptionStyle::None);
        params.trim_words = true;
        let out = LineWrapEngine::new(&km, params).layout(&["ab ba"]);
        assert_eq!(xs(&out), vec![10.0, 30.0, 50.0, 70.0]);
    }

    #[test]
    fn trim_words_applies_to_every_word() {
        let km = ab_keymap();
        let mut params = canvas_params(CaptionStyle::None);
        params.trim_words = true;
        let out = LineWrapEngine::new(&km, params).layout(&["a b a b"]);
        assert_eq!(xs(&out), vec![10.0, 30.0, 50.0, 70.0]);
    }

    #[test]
    fn consecutive_spaces_add_empty_words() {
        let km = ab_keymap();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::None));
        // "a", "", "b": the empty word still earns its trailing advance.
        let out = engine.layout(&["a  b"]);
        assert_eq!(xs(&out), vec![10.0, 70.0]);
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn blank_line_is_one_line_height_and_no_glyphs() {
        let km = ab_keymap();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::None));
        let out = engine.layout(&["a", "", "b"]);
        assert_eq!(out.placements.len(), 2);
        let first = out.placements[0].position.baseline;
        let second = out.placements[1].position.baseline;
        // One break after "a", one for the blank line.
        assert_eq!(first - second, 2.0 * 30.0);

        let blank_only = engine.layout(&[""]);
        assert!(blank_only.placements.is_empty());
        assert_eq!(blank_only.line_breaks, 1);
        assert_eq!(blank_only.final_baseline, 720.0);
    }

    #[test]
    fn consecutive_blank_lines_each_take_a_line() {
        let km = ab_keymap();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::None));
        let out = engine.layout(&["", "", ""]);
        assert_eq!(out.line_breaks, 3);
        assert_eq!(out.final_baseline, 750.0 - 90.0);
    }

    #[test]
    fn unmapped_letter_is_skipped_without_advance() {
        let km = ab_keymap();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::None));
        let out = engine.layout(&["a7b"]);
        assert_eq!(xs(&out), vec![10.0, 30.0]);
        assert_eq!(out.skipped, vec![Skipped::Letter { letter: '7' }]);
    }

    #[test]
    fn unmapped_letters_still_count_toward_word_width() {
        let km = ab_keymap();
        let mut params = canvas_params(CaptionStyle::None);
        params.right_limit = 10.0 + 3.0 * params.advance;
        let engine = LineWrapEngine::new(&km, params);
        // "a" ends at 30, gap to 50; "b??" measures 60 -> 110 > 70, so it wraps.
        let out = engine.layout(&["a b??"]);
        assert_eq!(out.placements.len(), 2);
        assert_eq!(out.placements[1].position, Position::new(10.0, 720.0));
    }

    #[test]
    fn case_is_folded_for_lookup_but_kept_on_event() {
        let km = ab_keymap();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::Below));
        let out = engine.layout(&["AB"]);
        assert_eq!(out.placements.len(), 2);
        assert_eq!(out.placements[0].letter, 'A');
        assert!(out.placements[0].shows_caption());
    }

    #[test]
    fn exact_fit_stays_on_line() {
        let km = ab_keymap();
        let mut params = canvas_params(CaptionStyle::None);
        // "ab" occupies 10..50; "ab" again starts at 70 and needs 40 -> ends at 110.
        params.right_limit = 110.0;
        let out = LineWrapEngine::new(&km, params).layout(&["ab ab"]);
        assert!(out.placements.iter().all(|p| p.position.baseline == 750.0));
        assert_eq!(xs(&out), vec![10.0, 30.0, 70.0, 90.0]);

        params.right_limit = 109.5;
        let out = LineWrapEngine::new(&km, params).layout(&["ab ab"]);
        assert_eq!(out.placements[2].position, Position::new(10.0, 720.0));
    }

    #[test]
    fn fitting_line_is_never_broken() {
        let km = Keymap::builtin();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::None));
        let line = "the quick brown fox jumps over the lazy dog";
        assert!(line.chars().count() as f64 * 20.0 <= PageConfig::canvas().usable_width());
        let out = engine.layout(&[line]);
        assert_eq!(out.line_breaks, 1);
        assert!(out.placements.iter().all(|p| p.position.baseline == 750.0));
    }

    #[test]
    fn overlong_word_gets_own_line_unsplit() {
        let km = ab_keymap();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::None));
        let long: String = "ab".repeat(35); // 70 letters * 20 = 1400 > 1180 usable
        let line = format!("a {long} b");
        let out = engine.layout(&[line]);

        assert_eq!(out.placements.len(), 72);
        assert_eq!(out.placements[0].position, Position::new(10.0, 750.0));
        // Long word starts at the margin of the next line and runs past the edge.
        let long_placed = &out.placements[1..71];
        assert_eq!(long_placed[0].position, Position::new(10.0, 720.0));
        assert!(long_placed.iter().all(|p| p.position.baseline == 720.0));
        assert_eq!(long_placed[69].position.x, 10.0 + 69.0 * 20.0);
        // The following word starts a new line.
        assert_eq!(out.placements[71].position, Position::new(10.0, 690.0));
    }

    #[test]
    fn overlong_first_word_still_breaks_once() {
        let km = ab_keymap();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::None));
        let long: String = "a".repeat(70);
        let out = engine.layout(&[long]);
        assert_eq!(out.placements[0].position, Position::new(10.0, 720.0));
        assert_eq!(out.line_breaks, 2);
    }

    #[test]
    fn wrap_is_deterministic() {
        let km = Keymap::builtin();
        let engine = LineWrapEngine::new(&km, canvas_params(CaptionStyle::Below));
        let lines = ["Pack my box with five dozen liquor jugs", "", "42 zebras!"];
        assert_eq!(engine.layout(&lines), engine.layout(&lines));
    }
}
