//! Style flattening.
//!
//! Walks a component tree in document order and yields one leaf per
//! content-bearing node, each carrying the fully inherited style. Leaves
//! whose style does not change share one `Arc`, which the segmenter uses
//! to decide where spans start.

use crate::component::{Content, Style, TextColor, TextElement, TextObject};
use crate::unicode::UnicodeString;
use serde::Serialize;
use std::sync::Arc;

/// Style after inheritance, restricted to what affects layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedStyle {
    pub color: Option<TextColor>,
    pub font: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
}

impl ResolvedStyle {
    /// `style` applied over `self`.
    pub fn merge(&self, style: &Style) -> Self {
        Self {
            color: style.color.or(self.color),
            font: style.font.clone().or_else(|| self.font.clone()),
            bold: style.bold.unwrap_or(self.bold),
            italic: style.italic.unwrap_or(self.italic),
            underlined: style.underlined.unwrap_or(self.underlined),
            strikethrough: style.strikethrough.unwrap_or(self.strikethrough),
            obfuscated: style.obfuscated.unwrap_or(self.obfuscated),
        }
    }
}

/// A piece of text with its resolved style.
#[derive(Debug, Clone)]
pub struct FlatLeaf {
    pub text: UnicodeString,
    pub style: Arc<ResolvedStyle>,
}

/// Flatten with the default style at the root.
pub fn flatten(element: &TextElement) -> Vec<FlatLeaf> {
    flatten_with_root(element, Arc::new(ResolvedStyle::default()))
}

/// Flatten with `root` as the inherited style of the top-level element.
pub fn flatten_with_root(element: &TextElement, root: Arc<ResolvedStyle>) -> Vec<FlatLeaf> {
    let mut leaves = Vec::new();
    flatten_element(element, &root, &mut leaves);
    leaves
}

/// Style an element resolves to under `inherited`. Reuses `inherited` when
/// nothing changes.
fn resolve(element: &TextElement, inherited: &Arc<ResolvedStyle>) -> Arc<ResolvedStyle> {
    match element {
        TextElement::Object(object) if object.style.has_layout_fields() => {
            let merged = inherited.merge(&object.style);
            if merged == **inherited {
                Arc::clone(inherited)
            } else {
                Arc::new(merged)
            }
        }
        _ => Arc::clone(inherited),
    }
}

fn flatten_element(element: &TextElement, inherited: &Arc<ResolvedStyle>, leaves: &mut Vec<FlatLeaf>) {
    match element {
        TextElement::String(text) => leaves.push(FlatLeaf {
            text: UnicodeString::new(text),
            style: Arc::clone(inherited),
        }),
        TextElement::Array(items) => flatten_list(items, inherited, leaves),
        TextElement::Object(object) => flatten_object(object, resolve(element, inherited), leaves),
    }
}

/// The first item seeds the context its siblings inherit from.
fn flatten_list(items: &[TextElement], inherited: &Arc<ResolvedStyle>, leaves: &mut Vec<FlatLeaf>) {
    let Some((first, rest)) = items.split_first() else {
        return;
    };
    let seed = resolve(first, inherited);
    match first {
        TextElement::Object(object) => flatten_object(object, Arc::clone(&seed), leaves),
        _ => flatten_element(first, inherited, leaves),
    }
    for item in rest {
        flatten_element(item, &seed, leaves);
    }
}

fn flatten_object(object: &TextObject, style: Arc<ResolvedStyle>, leaves: &mut Vec<FlatLeaf>) {
    leaves.push(FlatLeaf {
        text: UnicodeString::new(leaf_text(&object.content)),
        style: Arc::clone(&style),
    });

    if let Content::Translate { with: Some(with), .. } = &object.content {
        flatten_list(with, &style, leaves);
    }
    if let Some(extra) = &object.extra {
        flatten_list(extra, &style, leaves);
    }
}

/// Text standing in for a node's content.
fn leaf_text(content: &Content) -> &str {
    match content {
        Content::Text(text) => text,
        Content::Translate { key, fallback, .. } => fallback.as_deref().unwrap_or(key),
        Content::Score { name, .. } => name,
        Content::Selector { selector, .. } => selector,
        Content::Keybind(key) => key,
        Content::Nbt { path, .. } => path,
        Content::Sprite { sprite, .. } => sprite,
        Content::Player { profile, .. } => profile.name().unwrap_or(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::NamedColor;
    use crate::parser::parse;
    use crate::types::Dialect;

    fn leaves(source: &str) -> Vec<FlatLeaf> {
        flatten(&parse(source, Dialect::Modern).unwrap())
    }

    fn texts(leaves: &[FlatLeaf]) -> Vec<&str> {
        leaves.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_extra_inherits_parent_style() {
        let leaves = leaves("{text:'a', bold:true, extra:['b', {text:'c', bold:false}]}");
        assert_eq!(texts(&leaves), vec!["a", "b", "c"]);
        assert!(leaves[0].style.bold);
        assert!(leaves[1].style.bold);
        assert!(!leaves[2].style.bold);
        // Unstyled children share the parent's Arc.
        assert!(Arc::ptr_eq(&leaves[0].style, &leaves[1].style));
    }

    #[test]
    fn test_first_sibling_seeds_context() {
        let leaves = leaves("[{text:'a', color:red}, 'b', {text:'c', italic:true}]");
        assert_eq!(texts(&leaves), vec!["a", "b", "c"]);
        let red = Some(TextColor::Named(NamedColor::Red));
        assert_eq!(leaves[1].style.color, red);
        assert_eq!(leaves[2].style.color, red);
        assert!(leaves[2].style.italic);
        assert!(Arc::ptr_eq(&leaves[0].style, &leaves[1].style));
    }

    #[test]
    fn test_first_sibling_rule_in_extra() {
        let leaves = leaves("{text:'p', extra:[{text:'a', underlined:true}, 'b']}");
        assert!(!leaves[0].style.underlined);
        assert!(leaves[1].style.underlined);
        assert!(leaves[2].style.underlined);
    }

    #[test]
    fn test_translate_expands_with() {
        let leaves = leaves("{translate:'chat.type.text', fallback:'<%s> %s', with:['Steve', {text:'hi', bold:true}], extra:['!']}");
        assert_eq!(texts(&leaves), vec!["<%s> %s", "Steve", "hi", "!"]);
        assert!(leaves[2].style.bold);
        assert!(!leaves[3].style.bold);
    }

    #[test]
    fn test_every_content_yields_a_leaf() {
        let leaves = leaves(
            "[{translate:'key.only'}, {score:{name:'@p', objective:o}}, {selector:'@a'}, {keybind:'key.jump'}, \
             {nbt:'Pos', entity:'@s'}, {sprite:'item/apple'}, {player:'Steve'}, {player:{texture:'t'}}]",
        );
        assert_eq!(
            texts(&leaves),
            vec!["key.only", "@p", "@a", "key.jump", "Pos", "item/apple", "Steve", ""]
        );
    }

    #[test]
    fn test_root_style() {
        let root = Arc::new(ResolvedStyle {
            font: Some("minecraft:uniform".into()),
            ..Default::default()
        });
        let leaves = flatten_with_root(&TextElement::text("x"), Arc::clone(&root));
        assert!(Arc::ptr_eq(&leaves[0].style, &root));
    }
}
