//! Style fields of a text component.

use serde::{Serialize, Serializer};
use std::fmt;

/// Formatting applied to a component and inherited by its children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub color: Option<TextColor>,
    pub font: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underlined: Option<bool>,
    pub strikethrough: Option<bool>,
    pub obfuscated: Option<bool>,
    pub shadow_color: Option<ShadowColor>,
}

impl Style {
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }

    /// Whether any field the layout pipeline inherits is set.
    /// `shadow_color` does not affect layout.
    pub fn has_layout_fields(&self) -> bool {
        self.color.is_some()
            || self.font.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.underlined.is_some()
            || self.strikethrough.is_some()
            || self.obfuscated.is_some()
    }
}

/// The sixteen chat colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    pub const ALL: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::DarkBlue,
        NamedColor::DarkGreen,
        NamedColor::DarkAqua,
        NamedColor::DarkRed,
        NamedColor::DarkPurple,
        NamedColor::Gold,
        NamedColor::Gray,
        NamedColor::DarkGray,
        NamedColor::Blue,
        NamedColor::Green,
        NamedColor::Aqua,
        NamedColor::Red,
        NamedColor::LightPurple,
        NamedColor::Yellow,
        NamedColor::White,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::DarkBlue => "dark_blue",
            NamedColor::DarkGreen => "dark_green",
            NamedColor::DarkAqua => "dark_aqua",
            NamedColor::DarkRed => "dark_red",
            NamedColor::DarkPurple => "dark_purple",
            NamedColor::Gold => "gold",
            NamedColor::Gray => "gray",
            NamedColor::DarkGray => "dark_gray",
            NamedColor::Blue => "blue",
            NamedColor::Green => "green",
            NamedColor::Aqua => "aqua",
            NamedColor::Red => "red",
            NamedColor::LightPurple => "light_purple",
            NamedColor::Yellow => "yellow",
            NamedColor::White => "white",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.name() == name)
    }

    /// RGB value used by the game client.
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            NamedColor::Black => [0, 0, 0],
            NamedColor::DarkBlue => [0, 0, 170],
            NamedColor::DarkGreen => [0, 170, 0],
            NamedColor::DarkAqua => [0, 170, 170],
            NamedColor::DarkRed => [170, 0, 0],
            NamedColor::DarkPurple => [170, 0, 170],
            NamedColor::Gold => [255, 170, 0],
            NamedColor::Gray => [170, 170, 170],
            NamedColor::DarkGray => [85, 85, 85],
            NamedColor::Blue => [85, 85, 255],
            NamedColor::Green => [85, 255, 85],
            NamedColor::Aqua => [85, 255, 255],
            NamedColor::Red => [255, 85, 85],
            NamedColor::LightPurple => [255, 85, 255],
            NamedColor::Yellow => [255, 255, 85],
            NamedColor::White => [255, 255, 255],
        }
    }
}

/// A `color` value: a named chat color or `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColor {
    Named(NamedColor),
    Hex(u32),
}

impl TextColor {
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            return u32::from_str_radix(hex, 16).ok().map(TextColor::Hex);
        }
        NamedColor::from_name(value).map(TextColor::Named)
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            TextColor::Named(named) => named.rgb(),
            TextColor::Hex(value) => [(value >> 16) as u8, (value >> 8) as u8, *value as u8],
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextColor::Named(named) => f.write_str(named.name()),
            TextColor::Hex(value) => write!(f, "#{:06x}", value),
        }
    }
}

impl Serialize for TextColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An RGBA text shadow color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowColor {
    pub rgba: [f32; 4],
}

impl ShadowColor {
    /// Build from channels, rejecting values outside `[0, 1]`.
    pub fn from_rgba(rgba: [f32; 4]) -> Option<Self> {
        rgba.iter()
            .all(|c| (0.0..=1.0).contains(c))
            .then_some(Self { rgba })
    }

    /// Build from a packed `0xAARRGGBB` integer.
    pub fn from_argb(argb: u32) -> Self {
        let channel = |shift: u32| ((argb >> shift) & 0xff) as f32 / 255.0;
        Self {
            rgba: [channel(16), channel(8), channel(0), channel(24)],
        }
    }

    /// Parse `#RRGGBBAA`.
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?;
        if hex.len() != 8 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let rgba = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::from_argb(rgba.rotate_right(8)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_color() {
        assert_eq!(TextColor::parse("red"), Some(TextColor::Named(NamedColor::Red)));
        assert_eq!(TextColor::parse("#FF8800"), Some(TextColor::Hex(0xff8800)));
        assert_eq!(TextColor::parse("#FF88"), None);
        assert_eq!(TextColor::parse("crimson"), None);
        assert_eq!(TextColor::Hex(0x00aa00).to_string(), "#00aa00");
        assert_eq!(TextColor::parse("gold").unwrap().rgb(), [255, 170, 0]);
    }

    #[test]
    fn test_shadow_color_forms() {
        let from_int = ShadowColor::from_argb(0xff00_00ff);
        assert_eq!(from_int.rgba, [0.0, 0.0, 1.0, 1.0]);

        let from_hex = ShadowColor::from_hex("#0000FFFF").unwrap();
        assert_eq!(from_hex, from_int);

        assert!(ShadowColor::from_rgba([0.5, 0.5, 0.5, 1.0]).is_some());
        assert!(ShadowColor::from_rgba([1.5, 0.0, 0.0, 1.0]).is_none());
        assert!(ShadowColor::from_hex("#00FF").is_none());
    }

    #[test]
    fn test_layout_fields() {
        let shadow_only = Style {
            shadow_color: Some(ShadowColor::from_argb(0)),
            ..Default::default()
        };
        assert!(!shadow_only.is_empty());
        assert!(!shadow_only.has_layout_fields());
        assert!(Style { italic: Some(false), ..Default::default() }.has_layout_fields());
    }
}
