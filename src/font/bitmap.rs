//! Glyph advances measured from a resource pack's bitmap fonts.

use super::{FontMetrics, GlyphWidthCache, DEFAULT_FONT};
use crate::resource_pack::{FontProvider, ResourcePack, TextureData};
use crate::types::normalize_resource_location;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Configuration for [`BitmapFontMetrics`].
#[derive(Debug, Clone)]
pub struct BitmapFontConfig {
    /// Advance of a glyph no provider defines.
    pub missing_advance: u32,
}

impl Default for BitmapFontConfig {
    fn default() -> Self {
        Self { missing_advance: 6 }
    }
}

impl BitmapFontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing_advance(mut self, advance: u32) -> Self {
        self.missing_advance = advance;
        self
    }
}

/// A bitmap provider's texture cut into cells.
#[derive(Debug)]
struct GlyphSheet {
    texture: Arc<TextureData>,
    cell_w: u32,
    cell_h: u32,
    /// Rendered height over cell height.
    scale: f32,
    /// Code point → (column, row). The first cell holding a code point wins.
    cells: HashMap<char, (u32, u32)>,
}

impl GlyphSheet {
    fn new(texture: Arc<TextureData>, height: i32, chars: &[String]) -> Option<Self> {
        let rows: Vec<Vec<char>> = chars.iter().map(|row| row.chars().collect()).collect();
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        if rows.is_empty() || columns == 0 {
            return None;
        }

        let cell_w = texture.width / columns;
        let cell_h = texture.height / rows.len() as u32;
        if cell_w == 0 || cell_h == 0 {
            return None;
        }

        let mut cells = HashMap::new();
        for (row, row_chars) in rows.iter().enumerate() {
            for (col, &c) in row_chars.iter().enumerate() {
                if c != '\0' {
                    cells.entry(c).or_insert((col as u32, row as u32));
                }
            }
        }

        Some(Self {
            texture,
            cell_w,
            cell_h,
            scale: height as f32 / cell_h as f32,
            cells,
        })
    }

    /// Scaled width of the opaque part of the glyph plus one pixel of spacing.
    fn advance(&self, c: char) -> Option<u32> {
        let &(col, row) = self.cells.get(&c)?;
        let extent = self
            .texture
            .opaque_extent(col * self.cell_w, row * self.cell_h, self.cell_w, self.cell_h);
        Some((extent as f32 * self.scale).round() as u32 + 1)
    }
}

#[derive(Debug)]
enum Glyphs {
    Bitmap(GlyphSheet),
    Space(HashMap<char, u32>),
}

impl Glyphs {
    fn advance(&self, c: char) -> Option<u32> {
        match self {
            Glyphs::Bitmap(sheet) => sheet.advance(c),
            Glyphs::Space(advances) => advances.get(&c).copied(),
        }
    }
}

/// [`FontMetrics`] backed by the `bitmap` and `space` providers of a
/// resource pack. `reference` providers are inlined; other provider types
/// are ignored.
///
/// Glyphs are measured on first use and cached.
#[derive(Debug)]
pub struct BitmapFontMetrics {
    fonts: HashMap<String, Vec<Glyphs>>,
    cache: GlyphWidthCache,
    config: BitmapFontConfig,
}

impl BitmapFontMetrics {
    pub fn from_resource_pack(pack: &ResourcePack) -> Self {
        Self::with_config(pack, BitmapFontConfig::default())
    }

    pub fn with_config(pack: &ResourcePack, config: BitmapFontConfig) -> Self {
        Self {
            fonts: build_fonts(pack),
            cache: GlyphWidthCache::new(),
            config,
        }
    }

    /// Swap in the fonts of another pack and drop every cached width.
    pub fn replace_fonts(&mut self, pack: &ResourcePack) {
        self.fonts = build_fonts(pack);
        self.cache.invalidate();
    }

    pub fn config(&self) -> &BitmapFontConfig {
        &self.config
    }

    pub fn cache(&self) -> &GlyphWidthCache {
        &self.cache
    }

    pub fn has_font(&self, font: &str) -> bool {
        self.fonts.contains_key(&normalize_resource_location(font))
    }

    /// Loaded font ids, sorted.
    pub fn font_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.fonts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// The loaded font `font` names, or the default font.
    fn resolve_font(&self, font: &str) -> Option<(&str, &[Glyphs])> {
        if let Some((id, glyphs)) = self.fonts.get_key_value(font) {
            return Some((id.as_str(), glyphs.as_slice()));
        }
        let normalized = normalize_resource_location(font);
        self.fonts
            .get_key_value(&normalized)
            .or_else(|| self.fonts.get_key_value(DEFAULT_FONT))
            .map(|(id, glyphs)| (id.as_str(), glyphs.as_slice()))
    }

    fn measure(&self, grapheme: &str, glyphs: &[Glyphs]) -> u32 {
        grapheme
            .chars()
            .map(|c| {
                glyphs
                    .iter()
                    .find_map(|provider| provider.advance(c))
                    .unwrap_or(self.config.missing_advance)
            })
            .sum()
    }
}

impl FontMetrics for BitmapFontMetrics {
    fn glyph_advance(&self, grapheme: &str, font: &str) -> u32 {
        match self.resolve_font(font) {
            Some((id, glyphs)) => self
                .cache
                .get_or_insert_with(id, grapheme, || self.measure(grapheme, glyphs)),
            None => self.config.missing_advance * grapheme.chars().count() as u32,
        }
    }
}

fn build_fonts(pack: &ResourcePack) -> HashMap<String, Vec<Glyphs>> {
    let mut textures = HashMap::new();
    let mut fonts = HashMap::new();

    for id in pack.font_ids() {
        let mut glyphs = Vec::new();
        let mut visiting = HashSet::new();
        collect_glyphs(pack, &id, &mut visiting, &mut textures, &mut glyphs);
        fonts.insert(id, glyphs);
    }

    log::debug!("Built glyph tables for {} fonts", fonts.len());
    fonts
}

/// Append the providers of font `id` to `out`, following references.
fn collect_glyphs(
    pack: &ResourcePack,
    id: &str,
    visiting: &mut HashSet<String>,
    textures: &mut HashMap<String, Arc<TextureData>>,
    out: &mut Vec<Glyphs>,
) {
    if !visiting.insert(id.to_string()) {
        log::warn!("Font {} references itself", id);
        return;
    }
    let Some(font) = pack.get_font(id) else {
        log::warn!("Referenced font {} not found", id);
        visiting.remove(id);
        return;
    };

    for provider in &font.providers {
        match provider {
            FontProvider::Reference { id: target } => {
                collect_glyphs(pack, &normalize_resource_location(target), visiting, textures, out);
            }
            FontProvider::Bitmap { height, chars, .. } => {
                let Some(location) = provider.texture() else {
                    continue;
                };
                let texture = match textures.get(&location) {
                    Some(texture) => Arc::clone(texture),
                    None => match pack.get_texture(&location) {
                        Some(texture) => {
                            let texture = Arc::new(texture.clone());
                            textures.insert(location.clone(), Arc::clone(&texture));
                            texture
                        }
                        None => {
                            log::warn!("Font {} uses missing texture {}", id, location);
                            continue;
                        }
                    },
                };
                match GlyphSheet::new(texture, *height, chars) {
                    Some(sheet) => out.push(Glyphs::Bitmap(sheet)),
                    None => log::warn!("Font {} has an unusable bitmap provider for {}", id, location),
                }
            }
            FontProvider::Space { advances } => {
                let advances = advances
                    .iter()
                    .filter_map(|(key, advance)| {
                        let c = key.chars().next()?;
                        Some((c, advance.max(0.0).round() as u32))
                    })
                    .collect();
                out.push(Glyphs::Space(advances));
            }
            FontProvider::Unsupported => {}
        }
    }

    visiting.remove(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ResolvedStyle;
    use crate::resource_pack::FontDefinition;

    /// 16x8 sheet with two 8x8 cells: `a` is 5px wide, `b` is 2px wide.
    fn sheet() -> TextureData {
        let mut pixels = vec![0u8; 16 * 8 * 4];
        for y in 0..8 {
            for x in [0, 1, 2, 3, 4, 8, 9] {
                pixels[(y * 16 + x) * 4 + 3] = 255;
            }
        }
        TextureData::new(16, 8, pixels)
    }

    fn font(json: &str) -> FontDefinition {
        serde_json::from_str(json).unwrap()
    }

    fn pack() -> ResourcePack {
        let mut pack = ResourcePack::new();
        pack.add_texture("minecraft", "font/ascii", sheet());
        pack.add_font(
            "minecraft",
            "default",
            font(r#"{"providers":[
                {"type":"space","advances":{" ":4,"n":-3}},
                {"type":"bitmap","file":"minecraft:font/ascii.png","ascent":7,"chars":["ab"]},
                {"type":"bitmap","file":"minecraft:font/ascii.png","ascent":7,"chars":["ba"]}
            ]}"#),
        );
        pack.add_font(
            "demo",
            "big",
            font(r#"{"providers":[{"type":"bitmap","file":"font/ascii.png","height":16,"ascent":14,"chars":["ab"]}]}"#),
        );
        pack.add_font(
            "demo",
            "ref",
            font(r#"{"providers":[{"type":"reference","id":"minecraft:default"},{"type":"reference","id":"demo:ref"}]}"#),
        );
        pack.add_font(
            "demo",
            "broken",
            font(r#"{"providers":[{"type":"bitmap","file":"font/missing.png","ascent":7,"chars":["a"]},{"type":"unihex","hex_file":"x.zip"}]}"#),
        );
        pack
    }

    #[test]
    fn test_bitmap_advances() {
        let metrics = BitmapFontMetrics::from_resource_pack(&pack());
        assert_eq!(metrics.glyph_advance("a", DEFAULT_FONT), 6);
        // The first provider defining `b` wins.
        assert_eq!(metrics.glyph_advance("b", DEFAULT_FONT), 3);
        assert_eq!(metrics.glyph_advance(" ", DEFAULT_FONT), 4);
        assert_eq!(metrics.glyph_advance("n", DEFAULT_FONT), 0);
        assert_eq!(metrics.glyph_advance("z", DEFAULT_FONT), 6);
    }

    #[test]
    fn test_scaled_font() {
        let metrics = BitmapFontMetrics::from_resource_pack(&pack());
        assert_eq!(metrics.glyph_advance("a", "demo:big"), 11);
        assert_eq!(metrics.glyph_advance("b", "demo:big"), 5);
    }

    #[test]
    fn test_references_and_fallbacks() {
        let metrics = BitmapFontMetrics::with_config(&pack(), BitmapFontConfig::new().with_missing_advance(9));
        // Self-reference is ignored, the inlined default still applies.
        assert_eq!(metrics.glyph_advance("a", "demo:ref"), 6);
        // Unknown fonts fall back to the default font.
        assert_eq!(metrics.glyph_advance("a", "demo:nope"), 6);
        assert_eq!(metrics.glyph_advance("a", "default"), 6);
        // No usable providers.
        assert_eq!(metrics.glyph_advance("a", "demo:broken"), 9);
        assert!(metrics.has_font("default"));
        assert_eq!(
            metrics.font_ids(),
            vec!["demo:big", "demo:broken", "demo:ref", "minecraft:default"]
        );
    }

    #[test]
    fn test_text_width_uses_style_font() {
        let metrics = BitmapFontMetrics::from_resource_pack(&pack());
        let big_bold = ResolvedStyle {
            font: Some("demo:big".into()),
            bold: true,
            ..Default::default()
        };
        assert_eq!(metrics.text_width("ab", &ResolvedStyle::default()), 9);
        assert_eq!(metrics.text_width("ab", &big_bold), 18);
    }

    #[test]
    fn test_cache_and_replace_fonts() {
        let mut metrics = BitmapFontMetrics::from_resource_pack(&pack());
        metrics.glyph_advance("a", DEFAULT_FONT);
        metrics.glyph_advance("a", "demo:nope");
        // Fallbacks are cached under the font actually used.
        assert_eq!(metrics.cache().len(), 1);
        assert_eq!(metrics.cache().get(DEFAULT_FONT, "a"), Some(6));

        metrics.replace_fonts(&ResourcePack::new());
        assert!(metrics.cache().is_empty());
        assert_eq!(metrics.glyph_advance("a", DEFAULT_FONT), 6);
        assert!(metrics.font_ids().is_empty());
    }
}
