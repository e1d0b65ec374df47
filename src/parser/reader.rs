//! Character cursor with error positioning.

use crate::error::{ParseError, ParseErrorKind};

pub(crate) struct Reader {
    chars: Vec<char>,
    pos: usize,
}

impl Reader {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Remaining input.
    pub fn rest(&self) -> &[char] {
        &self.chars[self.pos..]
    }

    /// Skip whitespace, returning how many characters were skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos - start
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Build an error pointing at `offset`.
    pub fn error_at(&self, kind: ParseErrorKind, offset: usize, message: impl Into<String>) -> ParseError {
        let offset = offset.min(self.chars.len());
        let line_start = self.chars[..offset]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        let line_end = self.chars[offset..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |i| offset + i);
        let line = self.chars[..line_start].iter().filter(|&&c| c == '\n').count() + 1;
        let column = offset - line_start + 1;
        let source_line: String = self.chars[line_start..line_end].iter().collect();

        ParseError::new(kind, message, line, column, source_line)
    }
}
