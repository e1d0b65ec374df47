//! Write a component tree back out in either dialect.
//!
//! Output is compact, with keys in a fixed order: content, style,
//! `insertion`, click and hover events, then `extra`. Legacy output is JSON;
//! modern output is SNBT with bare keys.

mod quote;

use crate::component::{
    ClickEvent, Content, EntityTooltip, HoverEvent, ItemStack, PlayerProfile, SnbtValue, Style,
    TextElement, TextObject, Uuid,
};
use crate::error::{Error, Result};
use crate::types::Dialect;
use quote::{json_string, snbt_key, snbt_string};

/// Serialize a component for `dialect`.
pub fn stringify(element: &TextElement, dialect: Dialect) -> Result<String> {
    Writer { dialect }.element(element)
}

struct Writer {
    dialect: Dialect,
}

type Fields = Vec<(&'static str, String)>;

impl Writer {
    fn is_legacy(&self) -> bool {
        self.dialect == Dialect::Legacy
    }

    fn string(&self, value: &str) -> String {
        match self.dialect {
            Dialect::Legacy => json_string(value),
            Dialect::Modern => snbt_string(value),
        }
    }

    fn key(&self, key: &str) -> String {
        match self.dialect {
            Dialect::Legacy => json_string(key),
            Dialect::Modern => snbt_key(key),
        }
    }

    fn object<K: AsRef<str>>(&self, fields: impl IntoIterator<Item = (K, String)>) -> String {
        let body: Vec<String> = fields
            .into_iter()
            .map(|(key, value)| format!("{}:{}", self.key(key.as_ref()), value))
            .collect();
        format!("{{{}}}", body.join(","))
    }

    fn unsupported(&self, feature: &str) -> Error {
        Error::UnsupportedInDialect {
            feature: feature.to_string(),
            dialect: self.dialect,
        }
    }

    fn element(&self, element: &TextElement) -> Result<String> {
        match element {
            TextElement::String(text) => Ok(self.string(text)),
            TextElement::Array(items) => self.elements(items),
            TextElement::Object(object) => self.text_object(object),
        }
    }

    fn elements(&self, items: &[TextElement]) -> Result<String> {
        let items = items
            .iter()
            .map(|item| self.element(item))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("[{}]", items.join(",")))
    }

    fn text_object(&self, object: &TextObject) -> Result<String> {
        let mut fields = Fields::new();
        self.content(&object.content, &mut fields)?;
        self.style(&object.style, &mut fields);
        if let Some(insertion) = &object.insertion {
            fields.push(("insertion", self.string(insertion)));
        }
        if let Some(click) = &object.click_event {
            let key = if self.is_legacy() { "clickEvent" } else { "click_event" };
            fields.push((key, self.click_event(click)?));
        }
        if let Some(hover) = &object.hover_event {
            let key = if self.is_legacy() { "hoverEvent" } else { "hover_event" };
            fields.push((key, self.hover_event(hover)?));
        }
        if let Some(extra) = &object.extra {
            fields.push(("extra", self.elements(extra)?));
        }
        Ok(self.object(fields))
    }

    fn content(&self, content: &Content, fields: &mut Fields) -> Result<()> {
        match content {
            Content::Text(text) => fields.push(("text", self.string(text))),
            Content::Translate { key, with, fallback } => {
                fields.push(("translate", self.string(key)));
                if let Some(with) = with {
                    fields.push(("with", self.elements(with)?));
                }
                if let Some(fallback) = fallback {
                    fields.push(("fallback", self.string(fallback)));
                }
            }
            Content::Score { name, objective } => {
                let score = self.object([
                    ("name", self.string(name)),
                    ("objective", self.string(objective)),
                ]);
                fields.push(("score", score));
            }
            Content::Selector { selector, separator } => {
                fields.push(("selector", self.string(selector)));
                if let Some(separator) = separator {
                    fields.push(("separator", self.element(separator)?));
                }
            }
            Content::Keybind(key) => fields.push(("keybind", self.string(key))),
            Content::Nbt { path, source, interpret, separator } => {
                fields.push(("nbt", self.string(path)));
                fields.push((source.key(), self.string(source.value())));
                if let Some(interpret) = interpret {
                    fields.push(("interpret", interpret.to_string()));
                }
                if let Some(separator) = separator {
                    fields.push(("separator", self.element(separator)?));
                }
            }
            Content::Sprite { sprite, atlas } => {
                if self.is_legacy() {
                    return Err(self.unsupported("sprite"));
                }
                fields.push(("sprite", self.string(sprite)));
                if let Some(atlas) = atlas {
                    fields.push(("atlas", self.string(atlas)));
                }
            }
            Content::Player { profile, hat } => {
                if self.is_legacy() {
                    return Err(self.unsupported("player"));
                }
                fields.push(("player", self.player(profile)));
                if let Some(hat) = hat {
                    fields.push(("hat", hat.to_string()));
                }
            }
        }
        Ok(())
    }

    fn player(&self, profile: &PlayerProfile) -> String {
        match profile {
            PlayerProfile::Name(name) => self.string(name),
            PlayerProfile::Profile { name, id, texture } => {
                let mut fields = Fields::new();
                if let Some(name) = name {
                    fields.push(("name", self.string(name)));
                }
                if let Some(id) = id {
                    fields.push(("id", self.uuid(id)));
                }
                if let Some(texture) = texture {
                    fields.push(("texture", self.string(texture)));
                }
                self.object(fields)
            }
        }
    }

    fn style(&self, style: &Style, fields: &mut Fields) {
        if let Some(color) = &style.color {
            fields.push(("color", self.string(&color.to_string())));
        }
        if let Some(font) = &style.font {
            fields.push(("font", self.string(font)));
        }
        let flags = [
            ("bold", style.bold),
            ("italic", style.italic),
            ("underlined", style.underlined),
            ("strikethrough", style.strikethrough),
            ("obfuscated", style.obfuscated),
        ];
        for (key, value) in flags {
            if let Some(value) = value {
                fields.push((key, value.to_string()));
            }
        }
        if let Some(shadow) = &style.shadow_color {
            let channels: Vec<String> = shadow.rgba.iter().map(|c| format_float(*c)).collect();
            fields.push(("shadow_color", format!("[{}]", channels.join(","))));
        }
    }

    fn click_event(&self, event: &ClickEvent) -> Result<String> {
        if self.is_legacy() {
            let value = match event {
                ClickEvent::OpenUrl(v)
                | ClickEvent::OpenFile(v)
                | ClickEvent::RunCommand(v)
                | ClickEvent::SuggestCommand(v)
                | ClickEvent::CopyToClipboard(v) => self.string(v),
                ClickEvent::ChangePage(page) => page.to_string(),
                ClickEvent::ShowDialog(_) | ClickEvent::Custom { .. } => {
                    return Err(self.unsupported(event.action()));
                }
            };
            return Ok(self.object([("action", self.string(event.action())), ("value", value)]));
        }

        let mut fields: Fields = vec![("action", self.string(event.action()))];
        match event {
            ClickEvent::OpenUrl(url) => fields.push(("url", self.string(url))),
            ClickEvent::OpenFile(path) => fields.push(("path", self.string(path))),
            ClickEvent::RunCommand(command) | ClickEvent::SuggestCommand(command) => {
                fields.push(("command", self.string(command)))
            }
            ClickEvent::ChangePage(page) => fields.push(("page", page.to_string())),
            ClickEvent::CopyToClipboard(value) => fields.push(("value", self.string(value))),
            ClickEvent::ShowDialog(dialog) => fields.push(("dialog", self.string(dialog))),
            ClickEvent::Custom { id, payload } => {
                fields.push(("id", self.string(id)));
                if let Some(payload) = payload {
                    fields.push(("payload", self.snbt(payload)));
                }
            }
        }
        Ok(self.object(fields))
    }

    fn hover_event(&self, event: &HoverEvent) -> Result<String> {
        let mut fields: Fields = vec![("action", self.string(event.action()))];

        if self.is_legacy() {
            let contents = match event {
                HoverEvent::ShowText(text) => self.element(text)?,
                HoverEvent::ShowItem(item) => self.object(self.item_fields(item)),
                HoverEvent::ShowEntity(entity) => self.object(self.entity_fields(entity, "type", "id")?),
            };
            fields.push(("contents", contents));
        } else {
            match event {
                HoverEvent::ShowText(text) => fields.push(("value", self.element(text)?)),
                HoverEvent::ShowItem(item) => fields.extend(self.item_fields(item)),
                HoverEvent::ShowEntity(entity) => fields.extend(self.entity_fields(entity, "id", "uuid")?),
            }
        }
        Ok(self.object(fields))
    }

    fn item_fields(&self, item: &ItemStack) -> Fields {
        let mut fields: Fields = vec![("id", self.string(&item.id))];
        if let Some(count) = item.count {
            fields.push(("count", count.to_string()));
        }
        if let Some(components) = &item.components {
            fields.push(("components", self.snbt(components)));
        }
        fields
    }

    fn entity_fields(&self, entity: &EntityTooltip, type_key: &'static str, uuid_key: &'static str) -> Result<Fields> {
        let mut fields: Fields = vec![
            (type_key, self.string(&entity.entity_type)),
            (uuid_key, self.uuid(&entity.uuid)),
        ];
        if let Some(name) = &entity.name {
            fields.push(("name", self.element(name)?));
        }
        Ok(fields)
    }

    fn uuid(&self, uuid: &Uuid) -> String {
        match uuid {
            Uuid::Text(text) => self.string(text),
            Uuid::Ints([a, b, c, d]) if self.is_legacy() => format!("[{},{},{},{}]", a, b, c, d),
            Uuid::Ints([a, b, c, d]) => format!("[I;{},{},{},{}]", a, b, c, d),
        }
    }

    fn snbt(&self, value: &SnbtValue) -> String {
        match value {
            SnbtValue::Bool(b) => b.to_string(),
            SnbtValue::Int(i) => i.to_string(),
            SnbtValue::Float(f) => format_float(*f),
            SnbtValue::String(s) => self.string(s),
            SnbtValue::List(items) => {
                let items: Vec<String> = items.iter().map(|item| self.snbt(item)).collect();
                format!("[{}]", items.join(","))
            }
            SnbtValue::Compound(map) => {
                self.object(map.iter().map(|(key, value)| (key.as_str(), self.snbt(value))))
            }
        }
    }
}

/// A decimal literal with a `.` and no exponent. `Display` for floats
/// prints the shortest digits that read back as the same value.
fn format_float<T: std::fmt::Display>(value: T) -> String {
    let repr = value.to_string();
    if repr.contains('.') {
        repr
    } else {
        format!("{}.0", repr)
    }
}
