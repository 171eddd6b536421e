//! Greedy word wrapping into a fixed box with measured glyph widths.
//!
//! Tokens are whitespace-delimited words. A word wider than the box is split
//! at the longest grapheme prefix that fits and the rest is placed as the next
//! word. When the line budget runs out the last kept line is shortened until
//! it fits with an ellipsis appended.

use std::collections::VecDeque;

use unicode_segmentation::UnicodeSegmentation;

use super::metrics::{Font, GlyphMetrics};
use crate::types::{Px, Size};

pub const DEFAULT_LINE_SPACING: f64 = 1.15;
pub const DEFAULT_ELLIPSIS: &str = "…";

/// Wrapped text, ready to be drawn one line per `line_height`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    /// Lines in reading order; each fits the width it was wrapped to
    pub lines: Vec<String>,
    /// Some input text is not represented in `lines`
    pub truncated: bool,
    /// Baseline-to-baseline distance
    pub line_height: Px,
    /// Not even one glyph fit the width
    pub degenerate: bool,
}

impl TextBlock {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Vertical space taken by all lines
    pub fn height(&self) -> Px {
        self.line_height * self.lines.len() as f64
    }
}

/// Wraps strings into boxes for one font
pub struct TextFitter<'m> {
    metrics: &'m dyn GlyphMetrics,
    font: Font,
    line_spacing: f64,
    max_lines: Option<usize>,
    ellipsis: String,
}

impl<'m> TextFitter<'m> {
    pub fn new(metrics: &'m dyn GlyphMetrics, font: Font) -> Self {
        Self {
            metrics,
            font,
            line_spacing: DEFAULT_LINE_SPACING,
            max_lines: None,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }

    /// Line height as a multiple of the font size
    pub fn line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Absolute cap on lines, applied on top of the height limit
    pub fn max_lines(mut self, cap: usize) -> Self {
        self.max_lines = Some(cap.max(1));
        self
    }

    pub fn ellipsis(mut self, marker: impl Into<String>) -> Self {
        self.ellipsis = marker.into();
        self
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn line_height(&self) -> Px {
        Px(self.font.size_px * self.line_spacing)
    }

    pub fn measure(&self, text: &str) -> Px {
        self.metrics.width(text, &self.font)
    }

    /// Number of lines that fit in `height`, at least one.
    pub fn line_budget(&self, height: Px) -> usize {
        let by_height = match height.checked_div(self.line_height()) {
            Some(ratio) if ratio.is_finite() && ratio >= 1.0 => ratio.floor() as usize,
            Some(ratio) if ratio.is_infinite() => usize::MAX,
            _ => 1,
        };
        let budget = by_height.max(1);
        match self.max_lines {
            Some(cap) => budget.min(cap),
            None => budget,
        }
    }

    fn fits(&self, text: &str, width: Px) -> bool {
        self.measure(text) <= width
    }

    /// Wrap `text` into `bounds`.
    pub fn wrap(&self, text: &str, bounds: Size<Px>) -> TextBlock {
        let line_height = self.line_height();
        let budget = self.line_budget(bounds.h);
        let width = bounds.w;

        let mut queue: VecDeque<String> = text.split_whitespace().map(str::to_owned).collect();
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut truncated = false;
        let mut degenerate = false;

        while let Some(token) = queue.pop_front() {
            if current.is_empty() {
                if self.fits(&token, width) {
                    current = token;
                    continue;
                }
                let split = self.longest_fitting_prefix(&token, width);
                if split == 0 {
                    degenerate = true;
                    truncated = true;
                    break;
                }
                let (head, tail) = token.split_at(split);
                lines.push(head.to_owned());
                queue.push_front(tail.to_owned());
            } else {
                let candidate = format!("{current} {token}");
                if self.fits(&candidate, width) {
                    current = candidate;
                    continue;
                }
                lines.push(std::mem::take(&mut current));
                queue.push_front(token);
            }
            if lines.len() >= budget {
                truncated = true;
                break;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }

        if truncated {
            match lines.pop() {
                Some(last) => {
                    let shortened = self.ellipsize(&last, width);
                    lines.push(shortened);
                }
                None => {
                    let marker =
                        if self.fits(&self.ellipsis, width) { self.ellipsis.clone() } else { String::new() };
                    lines.push(marker);
                }
            }
        }

        TextBlock { lines, truncated, line_height, degenerate }
    }

    /// Byte length of the longest grapheme-aligned prefix of `token` that
    /// fits `width`; 0 if not even the first grapheme fits.
    fn longest_fitting_prefix(&self, token: &str, width: Px) -> usize {
        let ends: Vec<usize> = token.grapheme_indices(true).map(|(i, g)| i + g.len()).collect();
        let (mut lo, mut hi) = (0usize, ends.len());
        while lo < hi {
            let mid = (lo + hi + 1) / 2;
            if self.fits(&token[..ends[mid - 1]], width) {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        if lo == 0 { 0 } else { ends[lo - 1] }
    }

    /// Drop trailing graphemes until `line + ellipsis` fits.
    fn ellipsize(&self, line: &str, width: Px) -> String {
        let starts: Vec<usize> = line.grapheme_indices(true).map(|(i, _)| i).collect();
        let mut kept = starts.len();
        let mut end = line.len();
        loop {
            let head = line[..end].trim_end();
            if !head.is_empty() {
                let candidate = format!("{head}{}", self.ellipsis);
                if self.fits(&candidate, width) {
                    return candidate;
                }
            }
            if kept == 0 {
                break;
            }
            kept -= 1;
            end = starts[kept];
        }
        if self.fits(&self.ellipsis, width) { self.ellipsis.clone() } else { String::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::metrics::ProportionalMetrics;
    use proptest::prelude::*;

    const TALL: f64 = 10_000.0;

    fn fitter(size: f64) -> TextFitter<'static> {
        TextFitter::new(&ProportionalMetrics, Font::px(size))
    }

    fn width_of(line: &str, size: f64) -> Px {
        ProportionalMetrics.width(line, &Font::px(size))
    }

    #[test]
    fn wraps_phase_title_without_truncation() {
        let block = fitter(14.0).max_lines(3).wrap(
            "Integration and Acceptance Testing Phase",
            Size::new(180.0, TALL),
        );
        assert!((2..=3).contains(&block.lines.len()), "{:?}", block.lines);
        assert!(!block.truncated);
        for line in &block.lines {
            assert!(width_of(line, 14.0) <= Px(180.0), "{line:?} too wide");
        }
        assert_eq!(block.lines, ["Integration and Acceptance", "Testing Phase"]);
    }

    #[test]
    fn long_word_truncates_to_single_ellipsized_line() {
        let block = fitter(14.0)
            .max_lines(1)
            .wrap("Supercalifragilisticexpialidocious", Size::new(60.0, TALL));
        assert_eq!(block.lines.len(), 1);
        assert!(block.truncated);
        assert!(block.lines[0].ends_with(DEFAULT_ELLIPSIS));
        assert!(width_of(&block.lines[0], 14.0) <= Px(60.0));
        assert_eq!(block.lines[0], "Supercal…");
    }

    #[test]
    fn long_word_is_split_across_lines_when_budget_allows() {
        let block = fitter(14.0).wrap("Supercalifragilisticexpialidocious", Size::new(60.0, TALL));
        assert!(!block.truncated);
        assert_eq!(block.lines.concat(), "Supercalifragilisticexpialidocious");
        assert!(block.lines.len() > 1);
    }

    #[test]
    fn height_limits_line_count() {
        let f = fitter(10.0).line_spacing(2.0);
        // 45px tall at 20px per line -> 2 lines
        assert_eq!(f.line_budget(Px(45.0)), 2);
        // less than one line still allows one
        assert_eq!(f.line_budget(Px(5.0)), 1);
        assert_eq!(f.max_lines(1).line_budget(Px(45.0)), 1);
    }

    #[test]
    fn empty_and_whitespace_text() {
        let block = fitter(14.0).wrap("   \n\t ", Size::new(100.0, 100.0));
        assert!(block.is_empty());
        assert!(!block.truncated);
    }

    #[test]
    fn width_smaller_than_any_glyph_degenerates() {
        // 'W' is 150 units; at 14px that's 12px. The ellipsis is 8px.
        let block = fitter(14.0).wrap("WWW", Size::new(9.0, TALL));
        assert!(block.degenerate);
        assert!(block.truncated);
        assert_eq!(block.lines, ["…"]);

        let block = fitter(14.0).wrap("WWW", Size::new(1.0, TALL));
        assert!(block.truncated);
        assert_eq!(block.lines, [""]);
    }

    #[test]
    fn one_glyph_per_line_at_glyph_width() {
        let block = fitter(14.0).wrap("WWW", Size::new(12.5, TALL));
        assert_eq!(block.lines, ["W", "W", "W"]);
        assert!(!block.truncated);
    }

    #[test]
    fn ellipsis_never_leaves_trailing_space() {
        let block = fitter(14.0).max_lines(1).wrap("ab cd ef gh ij kl", Size::new(60.0, TALL));
        assert!(block.truncated);
        assert!(!block.lines[0].contains(" …"), "{:?}", block.lines);
    }

    #[test]
    fn grapheme_clusters_are_not_split() {
        // e + combining acute is one grapheme
        let word = "e\u{301}e\u{301}e\u{301}e\u{301}";
        let block = fitter(14.0).wrap(word, Size::new(20.0, TALL));
        for line in &block.lines {
            assert!(!line.starts_with('\u{301}'));
        }
        assert_eq!(block.lines.concat(), word);
    }

    proptest! {
        #[test]
        fn every_line_fits(
            text in "[a-zA-Z0-9 ,.\u{e9}]{0,120}",
            width in 1.0f64..400.0,
            size in 1.0f64..40.0,
            cap in 1usize..6,
        ) {
            let block = fitter(size).max_lines(cap).wrap(&text, Size::new(width, TALL));
            for line in &block.lines {
                prop_assert!(width_of(line, size) <= Px(width), "{:?} wider than {}", line, width);
            }
            prop_assert!(block.lines.len() <= cap);
        }

        #[test]
        fn binding_budget_truncates_with_ellipsis(
            words in prop::collection::vec("[a-z]{1,12}", 1..40),
            cap in 1usize..4,
        ) {
            let size = 14.0;
            // wide enough for the ellipsis plus a few letters
            let width = 80.0;
            let text = words.join(" ");
            let unbounded = fitter(size).wrap(&text, Size::new(width, TALL));
            let block = fitter(size).max_lines(cap).wrap(&text, Size::new(width, TALL));
            prop_assert!(block.lines.len() <= cap);
            if unbounded.lines.len() > cap {
                prop_assert!(block.truncated);
                prop_assert!(block.lines.last().is_some_and(|l| l.ends_with(DEFAULT_ELLIPSIS)));
            } else {
                prop_assert!(!block.truncated);
                prop_assert_eq!(block.lines, unbounded.lines);
            }
        }
    }
}
