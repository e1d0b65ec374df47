//! Text component objects: per-key dispatch and whole-object validation.

use super::Parser;
use crate::component::{Content, NbtSource, PlayerProfile, Style, TextElement, TextObject};
use crate::component::{ClickEvent, HoverEvent};
use crate::error::ParseError;
use crate::types::Dialect;
use std::collections::HashMap;
use std::sync::OnceLock;

type KeyParser = fn(&mut Parser<'_>, &mut RawObject) -> Result<(), ParseError>;

/// Which dialects accept a key.
#[derive(Debug, Clone, Copy)]
enum Gate {
    Any,
    LegacyOnly { modern: &'static str },
    ModernOnly { legacy: Option<&'static str> },
}

impl Gate {
    fn check(self, key: &str, dialect: Dialect) -> Result<(), String> {
        match (self, dialect) {
            (Gate::LegacyOnly { modern }, Dialect::Modern) => Err(format!(
                "'{}' is not supported in 1.21.5 or newer, use '{}' instead",
                key, modern
            )),
            (Gate::ModernOnly { legacy: Some(legacy) }, Dialect::Legacy) => Err(format!(
                "'{}' requires 1.21.5 or newer, use '{}' instead",
                key, legacy
            )),
            (Gate::ModernOnly { legacy: None }, Dialect::Legacy) => {
                Err(format!("'{}' requires 1.21.5 or newer", key))
            }
            _ => Ok(()),
        }
    }
}

struct KeyRule {
    gate: Gate,
    parse: KeyParser,
}

/// Key name → value parser and dialect gate.
fn key_rules() -> &'static HashMap<&'static str, KeyRule> {
    static RULES: OnceLock<HashMap<&'static str, KeyRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let rules: [(&'static str, Gate, KeyParser); 30] = [
            // Content
            ("text", Gate::Any, |p, o| set(&mut o.text, p.parse_string()?)),
            ("translate", Gate::Any, |p, o| set(&mut o.translate, p.parse_string()?)),
            ("with", Gate::Any, |p, o| set(&mut o.with, p.parse_element_list(true)?)),
            ("fallback", Gate::Any, |p, o| set(&mut o.fallback, p.parse_string()?)),
            ("score", Gate::Any, |p, o| set(&mut o.score, p.parse_score()?)),
            ("selector", Gate::Any, |p, o| set(&mut o.selector, p.parse_string()?)),
            ("separator", Gate::Any, |p, o| set(&mut o.separator, p.parse_element()?)),
            ("keybind", Gate::Any, |p, o| set(&mut o.keybind, p.parse_string()?)),
            ("nbt", Gate::Any, |p, o| set(&mut o.nbt, p.parse_string()?)),
            ("block", Gate::Any, |p, o| set(&mut o.block, p.parse_string()?)),
            ("entity", Gate::Any, |p, o| set(&mut o.entity, p.parse_string()?)),
            ("storage", Gate::Any, |p, o| set(&mut o.storage, p.parse_string()?)),
            ("interpret", Gate::Any, |p, o| set(&mut o.interpret, p.parse_bool()?)),
            ("sprite", Gate::ModernOnly { legacy: None }, |p, o| set(&mut o.sprite, p.parse_string()?)),
            ("atlas", Gate::ModernOnly { legacy: None }, |p, o| set(&mut o.atlas, p.parse_string()?)),
            ("player", Gate::ModernOnly { legacy: None }, |p, o| set(&mut o.player, p.parse_player()?)),
            ("hat", Gate::ModernOnly { legacy: None }, |p, o| set(&mut o.hat, p.parse_bool()?)),
            ("type", Gate::Any, |p, o| set(&mut o.content_type, p.parse_content_type()?)),
            // Style
            ("color", Gate::Any, |p, o| set(&mut o.style.color, p.parse_color()?)),
            ("font", Gate::Any, |p, o| set(&mut o.style.font, p.parse_string()?)),
            ("bold", Gate::Any, |p, o| set(&mut o.style.bold, p.parse_bool()?)),
            ("italic", Gate::Any, |p, o| set(&mut o.style.italic, p.parse_bool()?)),
            ("underlined", Gate::Any, |p, o| set(&mut o.style.underlined, p.parse_bool()?)),
            ("strikethrough", Gate::Any, |p, o| set(&mut o.style.strikethrough, p.parse_bool()?)),
            ("obfuscated", Gate::Any, |p, o| set(&mut o.style.obfuscated, p.parse_bool()?)),
            ("shadow_color", Gate::Any, |p, o| set(&mut o.style.shadow_color, p.parse_shadow_color()?)),
            // Interactivity
            ("insertion", Gate::Any, |p, o| set(&mut o.insertion, p.parse_string()?)),
            ("extra", Gate::Any, |p, o| set(&mut o.extra, p.parse_element_list(false)?)),
            ("clickEvent", Gate::LegacyOnly { modern: "click_event" }, |p, o| {
                set(&mut o.click_event, p.parse_legacy_click()?)
            }),
            ("hoverEvent", Gate::LegacyOnly { modern: "hover_event" }, |p, o| {
                set(&mut o.hover_event, p.parse_legacy_hover()?)
            }),
        ];

        let mut map: HashMap<&'static str, KeyRule> = rules
            .into_iter()
            .map(|(name, gate, parse)| (name, KeyRule { gate, parse }))
            .collect();
        map.insert(
            "click_event",
            KeyRule {
                gate: Gate::ModernOnly { legacy: Some("clickEvent") },
                parse: |p, o| set(&mut o.click_event, p.parse_modern_click()?),
            },
        );
        map.insert(
            "hover_event",
            KeyRule {
                gate: Gate::ModernOnly { legacy: Some("hoverEvent") },
                parse: |p, o| set(&mut o.hover_event, p.parse_modern_hover()?),
            },
        );
        map
    })
}

fn set<T>(slot: &mut Option<T>, value: T) -> Result<(), ParseError> {
    *slot = Some(value);
    Ok(())
}

/// Fields collected while an object is open.
#[derive(Default)]
pub(crate) struct RawObject {
    text: Option<String>,
    translate: Option<String>,
    with: Option<Vec<TextElement>>,
    fallback: Option<String>,
    score: Option<(String, String)>,
    selector: Option<String>,
    separator: Option<TextElement>,
    keybind: Option<String>,
    nbt: Option<String>,
    block: Option<String>,
    entity: Option<String>,
    storage: Option<String>,
    interpret: Option<bool>,
    sprite: Option<String>,
    atlas: Option<String>,
    player: Option<PlayerProfile>,
    hat: Option<bool>,
    content_type: Option<&'static str>,
    style: Style,
    insertion: Option<String>,
    click_event: Option<ClickEvent>,
    hover_event: Option<HoverEvent>,
    extra: Option<Vec<TextElement>>,
}

/// The `type` value naming each content key.
fn content_type_of(content_key: &str) -> &'static str {
    match content_key {
        "text" => "text",
        "translate" => "translatable",
        "score" => "score",
        "selector" => "selector",
        "keybind" => "keybind",
        "nbt" => "nbt",
        _ => "object",
    }
}

pub(crate) const CONTENT_TYPES: [&str; 7] =
    ["text", "translatable", "score", "selector", "keybind", "nbt", "object"];

fn requires(present: bool, key: &str, companion: bool, companion_desc: &str) -> Result<(), String> {
    if present && !companion {
        Err(format!("'{}' requires {}", key, companion_desc))
    } else {
        Ok(())
    }
}

impl RawObject {
    fn content_keys(&self) -> Vec<&'static str> {
        let flags = [
            ("text", self.text.is_some()),
            ("translate", self.translate.is_some()),
            ("score", self.score.is_some()),
            ("selector", self.selector.is_some()),
            ("keybind", self.keybind.is_some()),
            ("nbt", self.nbt.is_some()),
            ("sprite", self.sprite.is_some()),
            ("player", self.player.is_some()),
        ];
        flags.iter().filter(|(_, set)| *set).map(|(key, _)| *key).collect()
    }

    /// Check companion-key rules and build the object.
    fn finish(self) -> Result<TextObject, String> {
        let content_keys = self.content_keys();
        let content_key = match content_keys.as_slice() {
            [] => {
                return Err(format!(
                    "Missing content, expected one of {}",
                    Content::KEYS.map(|k| format!("'{}'", k)).join(", ")
                ));
            }
            [key] => *key,
            [first, second, ..] => {
                return Err(format!(
                    "Only one content key is allowed, found '{}' and '{}'",
                    first, second
                ));
            }
        };

        if let Some(content_type) = self.content_type {
            if content_type != content_type_of(content_key) {
                return Err(format!(
                    "'type' is '{}' but the content is '{}'",
                    content_type, content_key
                ));
            }
        }

        let is_translate = self.translate.is_some();
        let is_nbt = self.nbt.is_some();
        requires(self.with.is_some(), "with", is_translate, "'translate'")?;
        requires(self.fallback.is_some(), "fallback", is_translate, "'translate'")?;
        requires(
            self.separator.is_some(),
            "separator",
            is_nbt || self.selector.is_some(),
            "'nbt' or 'selector'",
        )?;
        requires(self.interpret.is_some(), "interpret", is_nbt, "'nbt'")?;
        requires(self.block.is_some(), "block", is_nbt, "'nbt'")?;
        requires(self.entity.is_some(), "entity", is_nbt, "'nbt'")?;
        requires(self.storage.is_some(), "storage", is_nbt, "'nbt'")?;
        requires(self.atlas.is_some(), "atlas", self.sprite.is_some(), "'sprite'")?;
        requires(self.hat.is_some(), "hat", self.player.is_some(), "'player'")?;

        let content = match content_key {
            "text" => Content::Text(self.text.unwrap_or_default()),
            "translate" => Content::Translate {
                key: self.translate.unwrap_or_default(),
                with: self.with,
                fallback: self.fallback,
            },
            "score" => {
                let (name, objective) = self.score.unwrap_or_default();
                Content::Score { name, objective }
            }
            "selector" => Content::Selector {
                selector: self.selector.unwrap_or_default(),
                separator: self.separator.map(Box::new),
            },
            "keybind" => Content::Keybind(self.keybind.unwrap_or_default()),
            "nbt" => {
                let sources: Vec<NbtSource> = [
                    self.block.map(NbtSource::Block),
                    self.entity.map(NbtSource::Entity),
                    self.storage.map(NbtSource::Storage),
                ]
                .into_iter()
                .flatten()
                .collect();
                let mut sources = sources.into_iter();
                let source = match (sources.next(), sources.next()) {
                    (Some(source), None) => source,
                    (None, _) => {
                        return Err(
                            "'nbt' requires one of 'block', 'entity' or 'storage'".to_string()
                        );
                    }
                    (Some(_), Some(_)) => {
                        return Err(
                            "'nbt' accepts only one of 'block', 'entity' or 'storage'".to_string()
                        );
                    }
                };
                Content::Nbt {
                    path: self.nbt.unwrap_or_default(),
                    source,
                    interpret: self.interpret,
                    separator: self.separator.map(Box::new),
                }
            }
            "sprite" => Content::Sprite {
                sprite: self.sprite.unwrap_or_default(),
                atlas: self.atlas,
            },
            _ => Content::Player {
                profile: self.player.unwrap_or(PlayerProfile::Name(String::new())),
                hat: self.hat,
            },
        };

        Ok(TextObject {
            content,
            style: self.style,
            insertion: self.insertion,
            click_event: self.click_event,
            hover_event: self.hover_event,
            extra: self.extra,
        })
    }
}

impl Parser<'_> {
    /// `{ ... }` as a text component object.
    pub(crate) fn parse_text_object(&mut self) -> Result<TextElement, ParseError> {
        let rules = key_rules();
        let mut raw = RawObject::default();

        let open = self.parse_object_entries(|p, key| {
            let Some(rule) = rules.get(key.name.as_str()) else {
                return Err(p.unknown_key(&key));
            };
            rule.gate
                .check(&key.name, p.dialect)
                .map_err(|message| p.unsupported(key.pos, message))?;
            (rule.parse)(p, &mut raw)
                .map_err(|e| e.with_context(format!("Invalid value for '{}'", key.name)))
        })?;

        raw.finish()
            .map(TextElement::object)
            .map_err(|message| self.semantic(open, message).with_context("Invalid object"))
    }

    fn parse_content_type(&mut self) -> Result<&'static str, ParseError> {
        let start = self.pos();
        let value = self.parse_string()?;
        CONTENT_TYPES
            .into_iter()
            .find(|t| *t == value)
            .ok_or_else(|| self.semantic(start, format!("Unknown component type '{}'", value)))
    }
}
