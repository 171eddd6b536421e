//! Glyph-width measurement.
//!
//! Layout only ever asks "how wide is this string in this font". Callers with
//! a real font stack implement [`GlyphMetrics`]; [`ProportionalMetrics`] is a
//! self-contained fallback built on a per-character advance table.

use crate::types::Px;

/// Font selection for measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Em size in pixels
    pub size_px: f64,
    pub bold: bool,
    pub mono: bool,
}

impl Font {
    pub const fn px(size_px: f64) -> Self {
        Self { size_px, bold: false, mono: false }
    }

    /// Font sized in points for output at `dpi`.
    pub fn from_points(points: f64, dpi: f64) -> Self {
        Self::px(points * dpi / 72.0)
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn mono(mut self) -> Self {
        self.mono = true;
        self
    }

    pub fn size(&self) -> Px {
        Px(self.size_px)
    }
}

/// Measures rendered text width. Implementations must be pure: the same
/// text and font always measure the same.
pub trait GlyphMetrics: Send + Sync {
    fn width(&self, text: &str, font: &Font) -> Px;
}

impl<M: GlyphMetrics + ?Sized> GlyphMetrics for &M {
    fn width(&self, text: &str, font: &Font) -> Px {
        (**self).width(text, font)
    }
}

/// Proportional character advances for printable ASCII, in hundredths of the
/// nominal character width.
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Advance for characters outside the table
const DEFAULT_ADVANCE: u32 = 100;
/// Advance for every character in monospace text
const MONO_ADVANCE: u32 = 82;
/// Nominal character width as a fraction of the em size (0.08 / 0.14)
const CHAR_WIDTH_EM: f64 = 0.08 / 0.14;
const BOLD_FACTOR: f64 = 1.1;

/// Sum of proportional advances, in hundredths of a character width
pub fn proportional_text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                AW_CHAR[(c as usize) - 0x20] as u32
            } else {
                DEFAULT_ADVANCE
            }
        })
        .sum()
}

/// Sum of monospace advances, in hundredths of a character width
pub fn monospace_text_length(text: &str) -> u32 {
    text.chars().count() as u32 * MONO_ADVANCE
}

/// Table-driven metrics; deterministic and font-file free.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalMetrics;

impl GlyphMetrics for ProportionalMetrics {
    fn width(&self, text: &str, font: &Font) -> Px {
        let hundredths = if font.mono {
            monospace_text_length(text)
        } else {
            proportional_text_length(text)
        };
        let mut width = hundredths as f64 * 0.01 * CHAR_WIDTH_EM * font.size_px;
        if font.bold && !font.mono {
            width *= BOLD_FACTOR;
        }
        Px(width)
    }
}
