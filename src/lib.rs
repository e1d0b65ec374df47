//! # Text Component
//!
//! A Rust library for reading, writing and laying out Minecraft JSON text
//! components.
//!
//! ## Overview
//!
//! Text components come in two dialects. Before 1.21.5 they are JSON with
//! `clickEvent` / `hoverEvent`; from 1.21.5 on they are SNBT with
//! `click_event` / `hover_event`. This library parses either dialect into one
//! component tree, writes the tree back in either dialect, and wraps the text
//! into pixel-measured lines using the fonts of a resource pack.
//!
//! ## Quick Start
//!
//! ```ignore
//! use text_component::{parse, stringify, Dialect};
//!
//! let component = parse(r#"{"text":"Hi","color":"red"}"#, Dialect::Legacy)?;
//! let modern = stringify(&component, Dialect::Modern)?;
//! assert_eq!(modern, "{text:'Hi',color:'red'}");
//! ```
//!
//! ## Layout
//!
//! ```ignore
//! use text_component::{load_resource_pack, BitmapFontMetrics, LayoutConfig, TextLayouter};
//!
//! let pack = load_resource_pack("path/to/pack.zip")?;
//! let metrics = BitmapFontMetrics::from_resource_pack(&pack);
//! let layouter = TextLayouter::with_config(metrics, LayoutConfig::new().with_line_width(120));
//!
//! let wrapped = layouter.layout(&component);
//! for line in &wrapped.lines {
//!     println!("{} ({}px)", line.text(), line.width);
//! }
//! ```

pub mod error;
pub mod types;
pub mod component;
pub mod unicode;
pub mod parser;
pub mod stringify;
pub mod layout;
pub mod font;
pub mod resource_pack;

// Re-export main types for convenience
pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use types::{Dialect, MinecraftVersion};
pub use component::{ClickEvent, Content, HoverEvent, Style, TextColor, TextElement, TextObject};
pub use unicode::{UnicodeNameTable, UnicodeNames, UnicodeString};
pub use parser::{parse, Parser};
pub use stringify::stringify;
pub use layout::{LayoutConfig, Line, ResolvedStyle, TextLayouter, Word, WrappedText};
pub use font::{BitmapFontConfig, BitmapFontMetrics, FontMetrics, MonospaceMetrics};
pub use resource_pack::ResourcePack;

/// Re-write a component from one dialect into another.
pub fn convert(source: &str, from: Dialect, to: Dialect) -> Result<String> {
    let element = parse(source, from)?;
    stringify(&element, to)
}

/// Load a resource pack from a file path (ZIP or directory).
pub fn load_resource_pack<P: AsRef<std::path::Path>>(path: P) -> Result<ResourcePack> {
    resource_pack::loader::load_from_path(path)
}

/// Load a resource pack from bytes (for WASM compatibility).
pub fn load_resource_pack_from_bytes(data: &[u8]) -> Result<ResourcePack> {
    resource_pack::loader::load_from_bytes(data)
}

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_between_dialects() {
        let modern = convert(r#"{"text":"Hi","color":"red"}"#, Dialect::Legacy, Dialect::Modern).unwrap();
        assert_eq!(modern, "{text:'Hi',color:'red'}");

        let legacy = convert(&modern, Dialect::Modern, Dialect::Legacy).unwrap();
        assert_eq!(legacy, r#"{"text":"Hi","color":"red"}"#);
    }

    #[test]
    fn test_convert_reports_parse_errors() {
        let err = convert("{text:", Dialect::Modern, Dialect::Legacy).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
