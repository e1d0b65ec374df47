//! Text layout: flatten a component into styled leaves, split the leaves
//! into words and wrap the words into lines of a fixed pixel width.

mod flatten;
mod segment;
mod wrap;

pub use flatten::{flatten, flatten_with_root, FlatLeaf, ResolvedStyle};
pub use segment::segment;
pub use wrap::wrap;

use crate::component::TextElement;
use crate::error::Result;
use crate::font::{FontMetrics, DEFAULT_FONT};
use crate::parser::parse;
use crate::types::Dialect;
use crate::unicode::UnicodeString;
use serde::Serialize;
use std::ops::Range;
use std::sync::Arc;

/// A run of characters sharing one style, `start..end` in graphemes.
#[derive(Debug, Clone, Serialize)]
pub struct StyleSpan {
    pub style: Arc<ResolvedStyle>,
    pub start: usize,
    pub end: usize,
}

impl StyleSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A non-space run, a run of spaces, or an empty line-break marker.
///
/// `styles` always tiles `0..text.len()` without gaps.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Word {
    pub text: UnicodeString,
    pub styles: Vec<StyleSpan>,
    /// Pixel width, filled in by [`wrap`].
    pub width: u32,
    /// An explicit newline; the word itself is empty.
    pub force_wrap: bool,
}

impl Word {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_break() -> Self {
        Self {
            force_wrap: true,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the word is a run of spaces.
    pub fn is_space(&self) -> bool {
        self.text.is_spaces()
    }

    /// Append one grapheme, extending the last span when the style is the
    /// same `Arc`.
    pub fn push(&mut self, grapheme: &str, style: &Arc<ResolvedStyle>) {
        let index = self.text.len();
        self.text.push(grapheme);
        match self.styles.last_mut() {
            Some(span) if span.end == index && Arc::ptr_eq(&span.style, style) => span.end += 1,
            _ => self.styles.push(StyleSpan {
                style: Arc::clone(style),
                start: index,
                end: index + 1,
            }),
        }
    }

    /// Style of the grapheme at `index`.
    pub fn style_at(&self, index: usize) -> Option<&Arc<ResolvedStyle>> {
        self.styles
            .iter()
            .find(|span| span.start <= index && index < span.end)
            .map(|span| &span.style)
    }

    /// Graphemes in `range` with spans clipped and re-based to start at 0.
    /// The width is left at 0.
    pub fn slice(&self, range: Range<usize>) -> Word {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        let styles = self
            .styles
            .iter()
            .filter(|span| span.start < end && span.end > start)
            .map(|span| StyleSpan {
                style: Arc::clone(&span.style),
                start: span.start.max(start) - start,
                end: span.end.min(end) - start,
            })
            .collect();

        Word {
            text: self.text.slice(start..end),
            styles,
            width: 0,
            force_wrap: false,
        }
    }

    /// Each span paired with its text.
    pub fn spans(&self) -> impl Iterator<Item = (&StyleSpan, UnicodeString)> + '_ {
        self.styles
            .iter()
            .map(move |span| (span, self.text.slice(span.start..span.end)))
    }
}

/// One wrapped line.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Line {
    pub words: Vec<Word>,
    pub width: u32,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The line's text.
    pub fn text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }
}

/// Output of [`wrap`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct WrappedText {
    pub lines: Vec<Line>,
    /// Widest line, the width of the text background.
    pub background_width: u32,
}

/// Configuration for [`TextLayouter`].
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Maximum line width in pixels.
    pub line_width: u32,
    /// Font used where a component sets none.
    pub default_font: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            // text_display line_width default
            line_width: 200,
            default_font: DEFAULT_FONT.to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line_width(mut self, line_width: u32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_default_font(mut self, font: impl Into<String>) -> Self {
        self.default_font = font.into();
        self
    }
}

/// Runs flatten, segment and wrap with one set of font metrics.
pub struct TextLayouter<M: FontMetrics> {
    metrics: M,
    config: LayoutConfig,
}

impl<M: FontMetrics> TextLayouter<M> {
    pub fn new(metrics: M) -> Self {
        Self::with_config(metrics, LayoutConfig::default())
    }

    pub fn with_config(metrics: M, config: LayoutConfig) -> Self {
        Self { metrics, config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Lay out a parsed component.
    pub fn layout(&self, element: &TextElement) -> WrappedText {
        let root = Arc::new(ResolvedStyle {
            font: Some(self.config.default_font.clone()),
            ..Default::default()
        });
        let leaves = flatten_with_root(element, root);
        let words = segment(&leaves);
        let wrapped = wrap(&words, self.config.line_width, &self.metrics);

        log::debug!(
            "Laid out {} leaves as {} words on {} lines ({}px wide)",
            leaves.len(),
            words.len(),
            wrapped.lines.len(),
            wrapped.background_width
        );
        wrapped
    }

    /// Parse `source` and lay it out.
    pub fn layout_str(&self, source: &str, dialect: Dialect) -> Result<WrappedText> {
        let element = parse(source, dialect)?;
        Ok(self.layout(&element))
    }
}
