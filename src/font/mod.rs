//! Font metrics for line wrapping.

mod bitmap;
mod cache;

pub use bitmap::{BitmapFontConfig, BitmapFontMetrics};
pub use cache::GlyphWidthCache;

use crate::layout::{ResolvedStyle, Word};
use unicode_segmentation::UnicodeSegmentation;

/// Font used when a component names none.
pub const DEFAULT_FONT: &str = "minecraft:default";

/// Pixel advances of rendered text.
pub trait FontMetrics {
    /// Advance of one grapheme in `font`, in pixels.
    fn glyph_advance(&self, grapheme: &str, font: &str) -> u32;

    /// Width of `text` in `style`. Bold text is one pixel wider per grapheme.
    fn text_width(&self, text: &str, style: &ResolvedStyle) -> u32 {
        let font = style.font.as_deref().unwrap_or(DEFAULT_FONT);
        let bold = u32::from(style.bold);
        text.graphemes(true)
            .map(|g| self.glyph_advance(g, font) + bold)
            .sum()
    }

    /// Width of a word, span by span.
    fn word_width(&self, word: &Word) -> u32 {
        word.spans()
            .map(|(span, text)| self.text_width(text.as_str(), &span.style))
            .sum()
    }
}

impl<M: FontMetrics + ?Sized> FontMetrics for &M {
    fn glyph_advance(&self, grapheme: &str, font: &str) -> u32 {
        (**self).glyph_advance(grapheme, font)
    }
}

/// Every grapheme has the same advance.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    pub advance: u32,
}

impl MonospaceMetrics {
    pub fn new(advance: u32) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(6)
    }
}

impl FontMetrics for MonospaceMetrics {
    fn glyph_advance(&self, _grapheme: &str, _font: &str) -> u32 {
        self.advance
    }
}
