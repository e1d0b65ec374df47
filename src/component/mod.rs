//! The text component tree.
//!
//! A [`TextElement`] is a plain string, an array of elements, or a
//! [`TextObject`] carrying exactly one piece of [`Content`] plus optional
//! style, interactivity and `extra` children. The model is dialect neutral:
//! the parser reads either dialect into it and the stringifier writes it back
//! out in whichever dialect is requested.

mod event;
mod snbt;
mod style;

pub(crate) use event::is_modern_only_click_action;
pub use event::{ClickEvent, EntityTooltip, HoverEvent, ItemStack, Uuid};
pub use snbt::SnbtValue;
pub use style::{NamedColor, ShadowColor, Style, TextColor};

/// A node in the text component tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TextElement {
    /// Plain text with the inherited style.
    String(String),
    /// A list of siblings; the first element acts as the parent of the rest.
    Array(Vec<TextElement>),
    /// A full component object.
    Object(Box<TextObject>),
}

impl TextElement {
    pub fn text(text: impl Into<String>) -> Self {
        TextElement::String(text.into())
    }

    pub fn object(object: TextObject) -> Self {
        TextElement::Object(Box::new(object))
    }

    pub fn as_object(&self) -> Option<&TextObject> {
        match self {
            TextElement::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<&str> for TextElement {
    fn from(text: &str) -> Self {
        TextElement::String(text.to_string())
    }
}

impl From<String> for TextElement {
    fn from(text: String) -> Self {
        TextElement::String(text)
    }
}

impl From<TextObject> for TextElement {
    fn from(object: TextObject) -> Self {
        TextElement::object(object)
    }
}

/// A text component object.
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
    pub content: Content,
    pub style: Style,
    /// Text inserted into chat when the component is shift-clicked.
    pub insertion: Option<String>,
    pub click_event: Option<ClickEvent>,
    pub hover_event: Option<HoverEvent>,
    /// Children, which inherit this object's style.
    pub extra: Option<Vec<TextElement>>,
}

impl TextObject {
    pub fn new(content: Content) -> Self {
        Self {
            content,
            style: Style::default(),
            insertion: None,
            click_event: None,
            hover_event: None,
            extra: None,
        }
    }

    /// A `{"text": ...}` object.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Content::Text(text.into()))
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_extra(mut self, extra: Vec<TextElement>) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn with_click_event(mut self, event: ClickEvent) -> Self {
        self.click_event = Some(event);
        self
    }

    pub fn with_hover_event(mut self, event: HoverEvent) -> Self {
        self.hover_event = Some(event);
        self
    }
}

/// Where an `nbt` component reads its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NbtSource {
    /// Block entity at a position, e.g. `"~ ~-1 ~"`.
    Block(String),
    /// Entity selector.
    Entity(String),
    /// Command storage id.
    Storage(String),
}

impl NbtSource {
    /// The key naming this source.
    pub fn key(&self) -> &'static str {
        match self {
            NbtSource::Block(_) => "block",
            NbtSource::Entity(_) => "entity",
            NbtSource::Storage(_) => "storage",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            NbtSource::Block(v) | NbtSource::Entity(v) | NbtSource::Storage(v) => v,
        }
    }
}

/// Profile shown by a `player` component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerProfile {
    /// Shorthand: just a player name.
    Name(String),
    Profile {
        name: Option<String>,
        id: Option<Uuid>,
        texture: Option<String>,
    },
}

impl PlayerProfile {
    /// Name to display, if the profile carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            PlayerProfile::Name(name) => Some(name),
            PlayerProfile::Profile { name, .. } => name.as_deref(),
        }
    }
}

/// The single content field of a [`TextObject`].
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Translate {
        key: String,
        with: Option<Vec<TextElement>>,
        fallback: Option<String>,
    },
    Score {
        name: String,
        objective: String,
    },
    Selector {
        selector: String,
        separator: Option<Box<TextElement>>,
    },
    Keybind(String),
    Nbt {
        path: String,
        source: NbtSource,
        interpret: Option<bool>,
        separator: Option<Box<TextElement>>,
    },
    /// Modern dialect only.
    Sprite {
        sprite: String,
        atlas: Option<String>,
    },
    /// Modern dialect only.
    Player {
        profile: PlayerProfile,
        hat: Option<bool>,
    },
}

impl Content {
    /// Every key that selects a content type.
    pub const KEYS: [&'static str; 8] = [
        "text", "translate", "score", "selector", "keybind", "nbt", "sprite", "player",
    ];

    /// The key naming this content type.
    pub fn key(&self) -> &'static str {
        match self {
            Content::Text(_) => "text",
            Content::Translate { .. } => "translate",
            Content::Score { .. } => "score",
            Content::Selector { .. } => "selector",
            Content::Keybind(_) => "keybind",
            Content::Nbt { .. } => "nbt",
            Content::Sprite { .. } => "sprite",
            Content::Player { .. } => "player",
        }
    }

    /// Whether only the modern dialect can express this content.
    pub fn is_modern_only(&self) -> bool {
        matches!(self, Content::Sprite { .. } | Content::Player { .. })
    }
}
