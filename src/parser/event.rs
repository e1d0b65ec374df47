//! Click and hover events in both dialects.
//!
//! Legacy events are `{action, value}` / `{action, contents}` pairs. Modern
//! events flatten the payload into action-specific keys. In both dialects a
//! hover event's `action` must come first because it decides how the
//! remaining keys are read.

use super::{Key, Parser};
use crate::component::{is_modern_only_click_action, ClickEvent, EntityTooltip, HoverEvent, ItemStack, SnbtValue, TextElement, Uuid};
use crate::error::ParseError;

/// Modern click event keys and the action each belongs to.
const MODERN_CLICK_FIELDS: [(&str, &str); 9] = [
    ("url", "open_url"),
    ("path", "open_file"),
    ("command", "run_command"),
    ("command", "suggest_command"),
    ("page", "change_page"),
    ("value", "copy_to_clipboard"),
    ("dialog", "show_dialog"),
    ("id", "custom"),
    ("payload", "custom"),
];

fn missing(key: &str) -> String {
    format!("Missing required key '{}'", key)
}

impl Parser<'_> {
    fn parse_action(&mut self, known: &[&str], what: &str) -> Result<(String, usize), ParseError> {
        let start = self.pos();
        let action = self.parse_string()?;
        if !known.contains(&action.as_str()) {
            return Err(self.semantic(start, format!("Unknown {} action '{}'", what, action)));
        }
        Ok((action, start))
    }

    /// `{action, value}`.
    pub(crate) fn parse_legacy_click(&mut self) -> Result<ClickEvent, ParseError> {
        let mut action: Option<(String, usize)> = None;
        let mut value: Option<(String, usize)> = None;

        let open = self.parse_object_entries(|p, key| {
            match key.name.as_str() {
                "action" => {
                    let (name, start) = p.parse_action(&ClickEvent::ACTIONS, "click")?;
                    if is_modern_only_click_action(&name) {
                        return Err(p.unsupported(
                            start,
                            format!("Click action '{}' requires 1.21.5 or newer", name),
                        ));
                    }
                    action = Some((name, start));
                }
                "value" => {
                    let start = p.pos();
                    // change_page accepts a bare integer as well as a string.
                    let text = match p.reader.peek() {
                        Some(c) if super::is_number_start(c) => p.parse_number_literal()?,
                        _ => p.parse_string()?,
                    };
                    value = Some((text, start));
                }
                _ => return Err(p.unknown_key(&key)),
            }
            Ok(())
        })?;

        let Some((action, _)) = action else {
            return Err(self.semantic(open, missing("action")));
        };
        let Some((value, value_pos)) = value else {
            return Err(self.semantic(open, missing("value")));
        };

        Ok(match action.as_str() {
            "open_url" => ClickEvent::OpenUrl(value),
            "open_file" => ClickEvent::OpenFile(value),
            "run_command" => ClickEvent::RunCommand(value),
            "suggest_command" => ClickEvent::SuggestCommand(value),
            "change_page" => {
                let page = value.trim().parse::<i32>().map_err(|_| {
                    self.semantic(value_pos, format!("Expected a page number, found '{}'", value))
                })?;
                ClickEvent::ChangePage(page)
            }
            _ => ClickEvent::CopyToClipboard(value),
        })
    }

    /// `{action, url | path | command | page | value | dialog | id, payload}`.
    pub(crate) fn parse_modern_click(&mut self) -> Result<ClickEvent, ParseError> {
        let mut action: Option<String> = None;
        let mut text_fields: Vec<(Key, String)> = Vec::new();
        let mut page: Option<(i32, usize)> = None;
        let mut payload: Option<(SnbtValue, usize)> = None;

        let open = self.parse_object_entries(|p, key| {
            match key.name.as_str() {
                "action" => action = Some(p.parse_action(&ClickEvent::ACTIONS, "click")?.0),
                "page" => page = Some((p.parse_int()?, key.pos)),
                "payload" => payload = Some((p.parse_snbt()?, key.pos)),
                "url" | "path" | "command" | "value" | "dialog" | "id" => {
                    let text = p.parse_string()?;
                    text_fields.push((key, text));
                }
                _ => return Err(p.unknown_key(&key)),
            }
            Ok(())
        })?;

        let Some(action) = action else {
            return Err(self.semantic(open, missing("action")));
        };

        // Every field present has to belong to the chosen action.
        let belongs = |field: &str| {
            MODERN_CLICK_FIELDS
                .iter()
                .any(|&(f, a)| f == field && a == action)
        };
        let stray = text_fields
            .iter()
            .map(|(key, _)| (key.name.as_str(), key.pos))
            .chain(page.as_ref().map(|(_, pos)| ("page", *pos)))
            .chain(payload.as_ref().map(|(_, pos)| ("payload", *pos)))
            .find(|(field, _)| !belongs(*field));
        if let Some((field, pos)) = stray {
            return Err(self.semantic(
                pos,
                format!("'{}' is not valid for click action '{}'", field, action),
            ));
        }

        let mut take = |field: &str| -> Result<String, ParseError> {
            text_fields
                .iter()
                .position(|(key, _)| key.name == field)
                .map(|i| text_fields.swap_remove(i).1)
                .ok_or_else(|| self.semantic(open, missing(field)))
        };

        Ok(match action.as_str() {
            "open_url" => ClickEvent::OpenUrl(take("url")?),
            "open_file" => ClickEvent::OpenFile(take("path")?),
            "run_command" => ClickEvent::RunCommand(take("command")?),
            "suggest_command" => ClickEvent::SuggestCommand(take("command")?),
            "copy_to_clipboard" => ClickEvent::CopyToClipboard(take("value")?),
            "show_dialog" => ClickEvent::ShowDialog(take("dialog")?),
            "custom" => ClickEvent::Custom {
                id: take("id")?,
                payload: payload.map(|(value, _)| value),
            },
            _ => match page {
                Some((page, _)) => ClickEvent::ChangePage(page),
                None => return Err(self.semantic(open, missing("page"))),
            },
        })
    }

    /// `{action, contents}`.
    pub(crate) fn parse_legacy_hover(&mut self) -> Result<HoverEvent, ParseError> {
        let mut action: Option<String> = None;
        let mut event: Option<HoverEvent> = None;

        let open = self.parse_object_entries(|p, key| {
            match key.name.as_str() {
                "action" => action = Some(p.parse_action(&HoverEvent::ACTIONS, "hover")?.0),
                "contents" => {
                    let Some(action) = action.as_deref() else {
                        return Err(p.semantic(key.pos, "'action' must come before 'contents'"));
                    };
                    event = Some(match action {
                        "show_text" => HoverEvent::ShowText(Box::new(p.parse_element()?)),
                        "show_item" => HoverEvent::ShowItem(p.parse_legacy_item()?),
                        _ => HoverEvent::ShowEntity(p.parse_legacy_entity()?),
                    });
                }
                _ => return Err(p.unknown_key(&key)),
            }
            Ok(())
        })?;

        match (action, event) {
            (None, _) => Err(self.semantic(open, missing("action"))),
            (Some(_), None) => Err(self.semantic(open, missing("contents"))),
            (Some(_), Some(event)) => Ok(event),
        }
    }

    /// An item id, or `{id, count, components}`.
    fn parse_legacy_item(&mut self) -> Result<ItemStack, ParseError> {
        if self.reader.peek() != Some('{') {
            return self.parse_string().map(ItemStack::new);
        }

        let mut item = ItemStack::new("");
        let mut has_id = false;
        let open = self.parse_object_entries(|p, key| {
            match key.name.as_str() {
                "id" => {
                    item.id = p.parse_string()?;
                    has_id = true;
                }
                "count" => item.count = Some(p.parse_int()?),
                "components" => item.components = Some(p.parse_snbt()?),
                _ => return Err(p.unknown_key(&key)),
            }
            Ok(())
        })?;

        if !has_id {
            return Err(self.semantic(open, missing("id")));
        }
        Ok(item)
    }

    /// `{type, id, name}`.
    fn parse_legacy_entity(&mut self) -> Result<EntityTooltip, ParseError> {
        let mut entity_type = None;
        let mut uuid = None;
        let mut name = None;
        let open = self.parse_object_entries(|p, key| {
            match key.name.as_str() {
                "type" => entity_type = Some(p.parse_string()?),
                "id" => uuid = Some(p.parse_uuid()?),
                "name" => name = Some(Box::new(p.parse_element()?)),
                _ => return Err(p.unknown_key(&key)),
            }
            Ok(())
        })?;

        self.entity_tooltip(open, entity_type, uuid, name, "type", "id")
    }

    /// `{action, value}`, `{action, id, count, components}` or
    /// `{action, id, uuid, name}`.
    pub(crate) fn parse_modern_hover(&mut self) -> Result<HoverEvent, ParseError> {
        let mut action: Option<String> = None;
        let mut text: Option<TextElement> = None;
        let mut id: Option<String> = None;
        let mut count: Option<i32> = None;
        let mut components: Option<SnbtValue> = None;
        let mut uuid: Option<Uuid> = None;
        let mut name: Option<TextElement> = None;

        let open = self.parse_object_entries(|p, key| {
            if key.name == "action" {
                action = Some(p.parse_action(&HoverEvent::ACTIONS, "hover")?.0);
                return Ok(());
            }
            let Some(action) = action.as_deref() else {
                return Err(p.semantic(key.pos, format!("'action' must come before '{}'", key.name)));
            };
            match (action, key.name.as_str()) {
                ("show_text", "value") => text = Some(p.parse_element()?),
                ("show_item" | "show_entity", "id") => id = Some(p.parse_string()?),
                ("show_item", "count") => count = Some(p.parse_int()?),
                ("show_item", "components") => components = Some(p.parse_snbt()?),
                ("show_entity", "uuid") => uuid = Some(p.parse_uuid()?),
                ("show_entity", "name") => name = Some(p.parse_element()?),
                _ => {
                    return Err(p.semantic(
                        key.pos,
                        format!("'{}' is not valid for hover action '{}'", key.name, action),
                    ));
                }
            }
            Ok(())
        })?;

        let Some(action) = action else {
            return Err(self.semantic(open, missing("action")));
        };
        match action.as_str() {
            "show_text" => text
                .map(|text| HoverEvent::ShowText(Box::new(text)))
                .ok_or_else(|| self.semantic(open, missing("value"))),
            "show_item" => {
                let id = id.ok_or_else(|| self.semantic(open, missing("id")))?;
                Ok(HoverEvent::ShowItem(ItemStack { id, count, components }))
            }
            _ => self
                .entity_tooltip(open, id, uuid, name.map(Box::new), "id", "uuid")
                .map(HoverEvent::ShowEntity),
        }
    }

    fn entity_tooltip(
        &self,
        open: usize,
        entity_type: Option<String>,
        uuid: Option<Uuid>,
        name: Option<Box<TextElement>>,
        type_key: &str,
        uuid_key: &str,
    ) -> Result<EntityTooltip, ParseError> {
        let entity_type = entity_type.ok_or_else(|| self.semantic(open, missing(type_key)))?;
        let uuid = uuid.ok_or_else(|| self.semantic(open, missing(uuid_key)))?;
        Ok(EntityTooltip { entity_type, uuid, name })
    }
}

#[cfg(test)]
mod tests {
    use crate::component::*;
    use crate::error::ParseErrorKind;
    use crate::parser::parse;
    use crate::types::Dialect;

    fn click(source: &str, dialect: Dialect) -> ClickEvent {
        parse(source, dialect).unwrap().as_object().unwrap().click_event.clone().unwrap()
    }

    fn hover(source: &str, dialect: Dialect) -> HoverEvent {
        parse(source, dialect).unwrap().as_object().unwrap().hover_event.clone().unwrap()
    }

    #[test]
    fn test_legacy_click() {
        assert_eq!(
            click(r#"{"text":"a","clickEvent":{"action":"run_command","value":"/say hi"}}"#, Dialect::Legacy),
            ClickEvent::RunCommand("/say hi".into())
        );
        assert_eq!(
            click(r#"{"text":"a","clickEvent":{"action":"change_page","value":"3"}}"#, Dialect::Legacy),
            ClickEvent::ChangePage(3)
        );
        assert_eq!(
            click(r#"{"text":"a","clickEvent":{"value":5,"action":"change_page"}}"#, Dialect::Legacy),
            ClickEvent::ChangePage(5)
        );
    }

    #[test]
    fn test_legacy_click_errors() {
        let err = parse(r#"{"text":"a","clickEvent":{"action":"explode","value":"x"}}"#, Dialect::Legacy)
            .unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::Semantic);
        assert!(err.message().contains("Unknown click action 'explode'"));

        let err = parse(r#"{"text":"a","clickEvent":{"action":"show_dialog","value":"x"}}"#, Dialect::Legacy)
            .unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::VersionUnsupported);

        let err = parse(r#"{"text":"a","clickEvent":{"action":"open_url"}}"#, Dialect::Legacy).unwrap_err();
        assert_eq!(err.message(), "Missing required key 'value'");
    }

    #[test]
    fn test_modern_click() {
        assert_eq!(
            click("{text:a, click_event:{action:open_url, url:'https://example.com'}}", Dialect::Modern),
            ClickEvent::OpenUrl("https://example.com".into())
        );
        assert_eq!(
            click("{text:a, click_event:{page:2, action:change_page}}", Dialect::Modern),
            ClickEvent::ChangePage(2)
        );
        assert_eq!(
            click("{text:a, click_event:{action:custom, id:'demo:ping', payload:{n:1}}}", Dialect::Modern),
            ClickEvent::Custom {
                id: "demo:ping".into(),
                payload: Some(SnbtValue::Compound([("n".to_string(), SnbtValue::Int(1))].into())),
            }
        );
    }

    #[test]
    fn test_modern_click_field_mismatch() {
        let err = parse("{text:a, click_event:{action:open_url, command:'/kill'}}", Dialect::Modern).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::Semantic);
        assert_eq!(err.message(), "'command' is not valid for click action 'open_url'");

        let err = parse("{text:a, click_event:{action:run_command}}", Dialect::Modern).unwrap_err();
        assert_eq!(err.message(), "Missing required key 'command'");
    }

    #[test]
    fn test_legacy_hover() {
        let event = hover(
            r#"{"text":"a","hoverEvent":{"action":"show_text","contents":{"text":"tip","color":"gray"}}}"#,
            Dialect::Legacy,
        );
        assert!(matches!(event, HoverEvent::ShowText(_)));

        let event = hover(
            r#"{"text":"a","hoverEvent":{"action":"show_item","contents":{"id":"minecraft:diamond","count":2}}}"#,
            Dialect::Legacy,
        );
        assert_eq!(
            event,
            HoverEvent::ShowItem(ItemStack { id: "minecraft:diamond".into(), count: Some(2), components: None })
        );

        let event = hover(
            r#"{"text":"a","hoverEvent":{"action":"show_entity","contents":{"type":"minecraft:pig","id":[1,2,3,4]}}}"#,
            Dialect::Legacy,
        );
        assert_eq!(
            event,
            HoverEvent::ShowEntity(EntityTooltip {
                entity_type: "minecraft:pig".into(),
                uuid: Uuid::Ints([1, 2, 3, 4]),
                name: None,
            })
        );
    }

    #[test]
    fn test_hover_action_must_come_first() {
        let err = parse(
            r#"{"text":"a","hoverEvent":{"contents":"tip","action":"show_text"}}"#,
            Dialect::Legacy,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::Semantic);
        assert_eq!(err.message(), "'action' must come before 'contents'");

        let err = parse("{text:a, hover_event:{value:'tip', action:show_text}}", Dialect::Modern).unwrap_err();
        assert_eq!(err.message(), "'action' must come before 'value'");
    }

    #[test]
    fn test_modern_hover() {
        let event = hover(
            "{text:a, hover_event:{action:show_item, id:'minecraft:stone', count:4, components:{'minecraft:rarity':epic}}}",
            Dialect::Modern,
        );
        match event {
            HoverEvent::ShowItem(item) => {
                assert_eq!(item.id, "minecraft:stone");
                assert_eq!(item.count, Some(4));
                assert!(item.components.is_some());
            }
            other => panic!("unexpected hover {:?}", other),
        }

        let err = parse("{text:a, hover_event:{action:show_text, id:'x'}}", Dialect::Modern).unwrap_err();
        assert_eq!(err.message(), "'id' is not valid for hover action 'show_text'");

        let err = parse("{text:a, hover_event:{action:show_entity, id:'minecraft:pig'}}", Dialect::Modern).unwrap_err();
        assert_eq!(err.message(), "Missing required key 'uuid'");
    }
}
