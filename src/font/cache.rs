//! Glyph width cache shared by readers.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Measured glyph advances keyed by font and grapheme.
///
/// Entries are only ever added while the fonts stay the same; call
/// [`invalidate`](Self::invalidate) when they change.
#[derive(Debug, Default)]
pub struct GlyphWidthCache {
    widths: RwLock<HashMap<String, HashMap<String, u32>>>,
}

impl GlyphWidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, font: &str, grapheme: &str) -> Option<u32> {
        self.widths.read().get(font)?.get(grapheme).copied()
    }

    /// Cached advance, or `measure()` stored and returned.
    pub fn get_or_insert_with(&self, font: &str, grapheme: &str, measure: impl FnOnce() -> u32) -> u32 {
        if let Some(width) = self.get(font, grapheme) {
            return width;
        }
        let width = measure();
        self.widths
            .write()
            .entry(font.to_string())
            .or_default()
            .entry(grapheme.to_string())
            .or_insert(width);
        width
    }

    /// Drop every entry.
    pub fn invalidate(&self) {
        self.widths.write().clear();
    }

    /// Number of cached glyphs across all fonts.
    pub fn len(&self) -> usize {
        self.widths.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
