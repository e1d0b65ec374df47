//! Font definition parsing (`assets/<namespace>/font/*.json`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A font definition: an ordered list of glyph providers.
///
/// Earlier providers take precedence over later ones.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FontDefinition {
    #[serde(default)]
    pub providers: Vec<FontProvider>,
}

/// A single glyph provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FontProvider {
    /// Glyphs cut from a grid texture, one row of `chars` per grid row.
    Bitmap {
        /// Texture location, e.g. `minecraft:font/ascii.png`.
        file: String,
        #[serde(default = "default_bitmap_height")]
        height: i32,
        ascent: i32,
        chars: Vec<String>,
    },
    /// Invisible glyphs with fixed advances.
    Space { advances: HashMap<String, f32> },
    /// Include all providers of another font.
    Reference { id: String },
    /// TrueType, unihex and other providers without pixel metrics here.
    #[serde(other)]
    Unsupported,
}

fn default_bitmap_height() -> i32 {
    8
}

impl FontProvider {
    /// Texture location a bitmap provider draws from, without `.png`.
    pub fn texture(&self) -> Option<String> {
        match self {
            FontProvider::Bitmap { file, .. } => Some(
                crate::types::normalize_resource_location(file.trim_end_matches(".png")),
            ),
            _ => None,
        }
    }
}

impl FontDefinition {
    /// Textures referenced by this font's bitmap providers.
    pub fn textures(&self) -> impl Iterator<Item = String> + '_ {
        self.providers.iter().filter_map(FontProvider::texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_font_definition() {
        let json = r#"{
            "providers": [
                {"type": "reference", "id": "minecraft:include/space"},
                {"type": "bitmap", "file": "minecraft:font/ascii.png", "ascent": 7, "chars": ["ab", "cd"]},
                {"type": "ttf", "file": "minecraft:font/x.ttf", "shift": [0, 0], "size": 11.0, "oversample": 2.0},
                {"type": "space", "advances": {" ": 4, "\u200c": 0.5}}
            ]
        }"#;
        let font: FontDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(font.providers.len(), 4);

        match &font.providers[1] {
            FontProvider::Bitmap { height, ascent, chars, .. } => {
                assert_eq!(*height, 8);
                assert_eq!(*ascent, 7);
                assert_eq!(chars, &vec!["ab".to_string(), "cd".to_string()]);
            }
            other => panic!("unexpected provider {:?}", other),
        }
        assert!(matches!(font.providers[2], FontProvider::Unsupported));
        match &font.providers[3] {
            FontProvider::Space { advances } => assert_eq!(advances["\u{200c}"], 0.5),
            other => panic!("unexpected provider {:?}", other),
        }

        assert_eq!(font.textures().collect::<Vec<_>>(), vec!["minecraft:font/ascii"]);
    }

    #[test]
    fn test_missing_providers_is_empty() {
        let font: FontDefinition = serde_json::from_str("{}").unwrap();
        assert!(font.providers.is_empty());
    }
}
