//! Click and hover events.

use super::{SnbtValue, TextElement};

/// Action run when a component is clicked.
///
/// Legacy components store the payload in `value`; modern ones use an
/// action-specific field (`url`, `command`, `page`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum ClickEvent {
    OpenUrl(String),
    OpenFile(String),
    RunCommand(String),
    SuggestCommand(String),
    ChangePage(i32),
    CopyToClipboard(String),
    /// Modern dialect only.
    ShowDialog(String),
    /// Modern dialect only.
    Custom {
        id: String,
        payload: Option<SnbtValue>,
    },
}

impl ClickEvent {
    pub const ACTIONS: [&'static str; 8] = [
        "open_url",
        "open_file",
        "run_command",
        "suggest_command",
        "change_page",
        "copy_to_clipboard",
        "show_dialog",
        "custom",
    ];

    pub fn action(&self) -> &'static str {
        match self {
            ClickEvent::OpenUrl(_) => "open_url",
            ClickEvent::OpenFile(_) => "open_file",
            ClickEvent::RunCommand(_) => "run_command",
            ClickEvent::SuggestCommand(_) => "suggest_command",
            ClickEvent::ChangePage(_) => "change_page",
            ClickEvent::CopyToClipboard(_) => "copy_to_clipboard",
            ClickEvent::ShowDialog(_) => "show_dialog",
            ClickEvent::Custom { .. } => "custom",
        }
    }

    pub fn is_modern_only(&self) -> bool {
        is_modern_only_click_action(self.action())
    }
}

pub(crate) fn is_modern_only_click_action(action: &str) -> bool {
    matches!(action, "show_dialog" | "custom")
}

/// Tooltip shown when a component is hovered.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEvent {
    ShowText(Box<TextElement>),
    ShowItem(ItemStack),
    ShowEntity(EntityTooltip),
}

impl HoverEvent {
    pub const ACTIONS: [&'static str; 3] = ["show_text", "show_item", "show_entity"];

    pub fn action(&self) -> &'static str {
        match self {
            HoverEvent::ShowText(_) => "show_text",
            HoverEvent::ShowItem(_) => "show_item",
            HoverEvent::ShowEntity(_) => "show_entity",
        }
    }
}

/// Item shown by a `show_item` tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub id: String,
    pub count: Option<i32>,
    /// Data components, an SNBT compound.
    pub components: Option<SnbtValue>,
}

impl ItemStack {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            count: None,
            components: None,
        }
    }
}

/// Entity shown by a `show_entity` tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityTooltip {
    /// Entity type id, e.g. `minecraft:pig`.
    pub entity_type: String,
    pub uuid: Uuid,
    pub name: Option<Box<TextElement>>,
}

/// An entity or profile UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Uuid {
    /// Hyphenated hex form.
    Text(String),
    /// Four big-endian 32-bit words.
    Ints([i32; 4]),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_actions() {
        assert_eq!(ClickEvent::ChangePage(3).action(), "change_page");
        assert!(!ClickEvent::RunCommand("/say hi".into()).is_modern_only());
        assert!(ClickEvent::ShowDialog("demo:intro".into()).is_modern_only());
        assert!(ClickEvent::Custom { id: "demo:ping".into(), payload: None }.is_modern_only());
        assert!(ClickEvent::ACTIONS.contains(&"copy_to_clipboard"));
    }

    #[test]
    fn test_hover_actions() {
        let hover = HoverEvent::ShowItem(ItemStack::new("minecraft:stone"));
        assert_eq!(hover.action(), "show_item");
        assert_eq!(HoverEvent::ACTIONS.len(), 3);
    }
}
