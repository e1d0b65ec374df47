//! Grapheme-aware strings.
//!
//! Widths and indices in the layout pipeline are counted in user-perceived
//! characters (extended grapheme clusters), never in bytes or UTF-16 units.

mod escape;
mod names;

pub(crate) use escape::resolve_escape;
pub use escape::unescape;
pub use names::{UnicodeNameTable, UnicodeNames};

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// A string indexed by grapheme.
///
/// `bounds` holds the byte offset of every grapheme start plus the final
/// end offset, so `bounds.len() == len() + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnicodeString {
    text: String,
    bounds: Vec<usize>,
}

impl UnicodeString {
    pub fn new(text: &str) -> Self {
        let mut bounds: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        bounds.push(text.len());
        Self {
            text: text.to_string(),
            bounds,
        }
    }

    /// Resolve backslash escapes, then segment.
    ///
    /// Invalid escapes are kept literally, and so are `\N{NAME}` escapes the
    /// table cannot resolve.
    pub fn from_escaped(text: &str, names: Option<&dyn UnicodeNames>) -> Self {
        Self::new(&unescape(text, names))
    }

    /// Number of graphemes.
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The grapheme at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        let start = *self.bounds.get(index)?;
        let end = *self.bounds.get(index + 1)?;
        Some(&self.text[start..end])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.bounds.windows(2).map(move |w| &self.text[w[0]..w[1]])
    }

    /// Graphemes in `range`, clamped to the string.
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        let base = self.bounds[start];
        Self {
            text: self.text[base..self.bounds[end]].to_string(),
            bounds: self.bounds[start..=end].iter().map(|b| b - base).collect(),
        }
    }

    /// Append one grapheme unit as-is.
    pub fn push(&mut self, grapheme: &str) {
        self.text.push_str(grapheme);
        self.bounds.push(self.text.len());
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether every grapheme is a plain space.
    pub fn is_spaces(&self) -> bool {
        !self.is_empty() && self.text.bytes().all(|b| b == b' ')
    }
}

impl Default for UnicodeString {
    fn default() -> Self {
        Self {
            text: String::new(),
            bounds: vec![0],
        }
    }
}

impl From<&str> for UnicodeString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for UnicodeString {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

impl fmt::Display for UnicodeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for UnicodeString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
