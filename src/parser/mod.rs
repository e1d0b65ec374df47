//! Recursive-descent parser for text components.
//!
//! The grammar is the relaxed SNBT-like notation Minecraft accepts for text
//! components: quoted or bareword strings, objects with optional commas,
//! arrays, booleans and plain decimal numbers. Parsing is a single pass with
//! peek-only lookahead. Every object key fully determines how its value is
//! read, given the siblings already parsed (a hover event's `action` must
//! precede the fields whose shape depends on it).

mod event;
mod object;
mod reader;
mod value;

use crate::component::TextElement;
use crate::error::{ParseError, ParseErrorKind};
use crate::types::Dialect;
use crate::unicode::{resolve_escape, UnicodeNames};
use reader::Reader;
use std::collections::HashSet;

/// Parse a complete text component.
pub fn parse(source: &str, dialect: Dialect) -> Result<TextElement, ParseError> {
    Parser::new(source, dialect).parse()
}

/// Text component parser for one source string.
pub struct Parser<'a> {
    reader: Reader,
    dialect: Dialect,
    names: Option<&'a dyn UnicodeNames>,
    depth: usize,
}

/// Deepest nesting of arrays, objects and SNBT values accepted, as in the game.
pub const MAX_DEPTH: usize = 512;

/// An object key and where it starts.
pub(crate) struct Key {
    pub name: String,
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Float(f64),
}

fn is_bareword_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_bareword_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '.'
}

fn can_start_value(c: char) -> bool {
    matches!(c, '{' | '[' | '"' | '\'') || is_number_start(c) || is_bareword_start(c)
}

impl<'a> Parser<'a> {
    pub fn new(source: &str, dialect: Dialect) -> Self {
        Self {
            reader: Reader::new(source),
            dialect,
            names: None,
            depth: 0,
        }
    }

    /// Resolve `\N{NAME}` escapes through `names` instead of keeping them literally.
    pub fn with_names(mut self, names: &'a dyn UnicodeNames) -> Self {
        self.names = Some(names);
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse the whole input as one text component.
    pub fn parse(mut self) -> Result<TextElement, ParseError> {
        self.reader.skip_whitespace();
        let element = self.parse_element()?;
        self.reader.skip_whitespace();
        if let Some(c) = self.reader.peek() {
            return Err(self.syntax(
                self.reader.pos(),
                format!("Unexpected trailing input '{}'", c),
            ));
        }
        Ok(element)
    }

    pub(crate) fn syntax(&self, offset: usize, message: impl Into<String>) -> ParseError {
        self.reader.error_at(ParseErrorKind::Syntax, offset, message)
    }

    pub(crate) fn semantic(&self, offset: usize, message: impl Into<String>) -> ParseError {
        self.reader.error_at(ParseErrorKind::Semantic, offset, message)
    }

    pub(crate) fn unsupported(&self, offset: usize, message: impl Into<String>) -> ParseError {
        self.reader.error_at(ParseErrorKind::VersionUnsupported, offset, message)
    }

    pub(crate) fn unknown_key(&self, key: &Key) -> ParseError {
        self.semantic(key.pos, format!("Unknown key '{}'", key.name))
    }

    pub(crate) fn pos(&self) -> usize {
        self.reader.pos()
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.reader.peek() {
            Some(c) if c == expected => {
                self.reader.bump();
                Ok(())
            }
            Some(c) => Err(self.syntax(
                self.reader.pos(),
                format!("Expected '{}', found '{}'", expected, c),
            )),
            None => Err(self.syntax(
                self.reader.pos(),
                format!("Expected '{}', found end of input", expected),
            )),
        }
    }

    /// Error for a value of the wrong type at the cursor.
    pub(crate) fn value_mismatch(&self, expected: &str) -> ParseError {
        let pos = self.reader.pos();
        match self.reader.peek() {
            None => self.syntax(pos, format!("Expected {}, found end of input", expected)),
            Some(c) if !can_start_value(c) => {
                self.syntax(pos, format!("Unexpected character '{}'", c))
            }
            Some(_) => self.semantic(pos, format!("Expected {}", expected)),
        }
    }

    /// Run `parse` one nesting level deeper, failing past [`MAX_DEPTH`].
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.semantic(
                self.reader.pos(),
                format!("Nesting is deeper than {} levels", MAX_DEPTH),
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Any text component: object, array, quoted string or bareword.
    pub(crate) fn parse_element(&mut self) -> Result<TextElement, ParseError> {
        self.nested(|p| {
            let start = p.reader.pos();
            match p.reader.peek() {
                Some('{') => p.parse_text_object(),
                Some('[') => {
                    let items = p.parse_element_list(false)?;
                    Ok(TextElement::Array(items))
                }
                Some('"' | '\'') => Ok(TextElement::String(p.parse_quoted()?)),
                Some(c) if is_bareword_start(c) => Ok(TextElement::String(p.parse_bareword())),
                Some(c) => Err(p.syntax(
                    start,
                    format!("Unexpected character '{}', expected a text component", c),
                )),
                None => Err(p.syntax(start, "Expected a text component, found end of input")),
            }
        })
    }

    /// `[ element, ... ]`.
    pub(crate) fn parse_element_list(&mut self, allow_empty: bool) -> Result<Vec<TextElement>, ParseError> {
        let start = self.reader.pos();
        if self.reader.peek() != Some('[') {
            return Err(self.value_mismatch("an array"));
        }
        self.reader.bump();

        let mut items = Vec::new();
        self.parse_sequence(']', "array", |p| {
            items.push(p.parse_element()?);
            Ok(())
        })?;

        if items.is_empty() && !allow_empty {
            return Err(self.semantic(start, "Array must not be empty"));
        }
        Ok(items)
    }

    /// Items up to `close`, which is consumed. The opening bracket must
    /// already be consumed.
    ///
    /// Commas between items are optional and one trailing comma is allowed,
    /// but items need at least whitespace between them and a comma cannot
    /// follow another comma or the opening bracket.
    pub(crate) fn parse_sequence<F>(&mut self, close: char, what: &str, mut item: F) -> Result<(), ParseError>
    where
        F: FnMut(&mut Self) -> Result<(), ParseError>,
    {
        loop {
            self.reader.skip_whitespace();
            match self.reader.peek() {
                None => {
                    return Err(self.syntax(
                        self.reader.pos(),
                        format!("Unterminated {}, expected '{}'", what, close),
                    ));
                }
                Some(c) if c == close => {
                    self.reader.bump();
                    return Ok(());
                }
                Some(',') => return Err(self.syntax(self.reader.pos(), "Unexpected ','")),
                Some(_) => {}
            }

            item(self)?;

            let skipped = self.reader.skip_whitespace();
            match self.reader.peek() {
                Some(',') => {
                    self.reader.bump();
                }
                Some(c) if c != close && skipped == 0 => {
                    return Err(self.syntax(
                        self.reader.pos(),
                        format!("Expected ',' or '{}', found '{}'", close, c),
                    ));
                }
                _ => {}
            }
        }
    }

    /// `{ key: value, ... }`, handing each key to `on_entry` with the cursor
    /// on its value. Returns the offset of the opening brace.
    pub(crate) fn parse_object_entries<F>(&mut self, mut on_entry: F) -> Result<usize, ParseError>
    where
        F: FnMut(&mut Self, Key) -> Result<(), ParseError>,
    {
        let open = self.reader.pos();
        if self.reader.peek() != Some('{') {
            return Err(self.value_mismatch("an object"));
        }
        self.reader.bump();

        let mut seen = HashSet::new();
        self.parse_sequence('}', "object", |p| {
            let key = p.parse_key()?;
            if !seen.insert(key.name.clone()) {
                return Err(p.syntax(key.pos, format!("Duplicate key '{}'", key.name)));
            }
            p.reader.skip_whitespace();
            p.expect(':')?;
            p.reader.skip_whitespace();
            on_entry(p, key)
        })?;

        Ok(open)
    }

    fn parse_key(&mut self) -> Result<Key, ParseError> {
        let pos = self.reader.pos();
        let name = match self.reader.peek() {
            Some('"' | '\'') => self.parse_quoted()?,
            Some(c) if is_bareword_start(c) => self.parse_bareword(),
            Some(c) => return Err(self.syntax(pos, format!("Expected a key, found '{}'", c))),
            None => return Err(self.syntax(pos, "Expected a key, found end of input")),
        };
        Ok(Key { name, pos })
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`; the cursor must be on a valid start character.
    fn parse_bareword(&mut self) -> String {
        let start = self.reader.pos();
        while self.reader.peek().is_some_and(is_bareword_char) {
            self.reader.bump();
        }
        self.reader.slice(start, self.reader.pos())
    }

    /// A `'` or `"` delimited string with escapes resolved.
    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        let start = self.reader.pos();
        let Some(quote) = self.reader.bump() else {
            return Err(self.syntax(start, "Expected a string, found end of input"));
        };

        let mut out = String::new();
        loop {
            match self.reader.bump() {
                None => return Err(self.syntax(start, "Unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escape_pos = self.reader.pos() - 1;
                    let escape = resolve_escape(
                        self.reader.rest(),
                        self.dialect.extended_escapes(),
                        self.names,
                    )
                    .map_err(|e| self.syntax(escape_pos, e.to_string()))?;
                    out.push_str(&escape.text);
                    self.reader.advance(escape.consumed);
                }
                Some(c) => out.push(c),
            }
        }
    }

    /// A quoted string or a bareword.
    pub(crate) fn parse_string(&mut self) -> Result<String, ParseError> {
        match self.reader.peek() {
            Some('"' | '\'') => self.parse_quoted(),
            Some(c) if is_bareword_start(c) => Ok(self.parse_bareword()),
            _ => Err(self.value_mismatch("a string")),
        }
    }

    /// `true`/`false`, bare or quoted.
    pub(crate) fn parse_bool(&mut self) -> Result<bool, ParseError> {
        let start = self.reader.pos();
        let word = match self.reader.peek() {
            Some('"' | '\'') => self.parse_quoted()?,
            Some(c) if is_bareword_start(c) => self.parse_bareword(),
            _ => return Err(self.value_mismatch("a boolean")),
        };
        match word.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(self.semantic(start, format!("Expected a boolean, found '{}'", word))),
        }
    }

    /// The raw text of a number: optional `-`, digits, at most one `.`.
    pub(crate) fn parse_number_literal(&mut self) -> Result<String, ParseError> {
        let start = self.reader.pos();
        if !self.reader.peek().is_some_and(is_number_start) {
            return Err(self.value_mismatch("a number"));
        }
        if self.reader.peek() == Some('-') {
            self.reader.bump();
        }

        let mut digits = 0;
        let mut seen_dot = false;
        loop {
            match self.reader.peek() {
                Some(c) if c.is_ascii_digit() => digits += 1,
                Some('.') if !seen_dot => seen_dot = true,
                _ => break,
            }
            self.reader.bump();
        }

        if digits == 0 {
            return Err(self.syntax(start, "Invalid number"));
        }
        Ok(self.reader.slice(start, self.reader.pos()))
    }

    pub(crate) fn parse_number(&mut self) -> Result<Number, ParseError> {
        let start = self.reader.pos();
        let literal = self.parse_number_literal()?;
        if literal.contains('.') {
            literal
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| self.syntax(start, format!("Invalid number '{}'", literal)))
        } else {
            literal
                .parse::<i64>()
                .map(Number::Int)
                .map_err(|_| self.semantic(start, format!("Number '{}' is out of range", literal)))
        }
    }

    pub(crate) fn parse_int(&mut self) -> Result<i32, ParseError> {
        let start = self.reader.pos();
        match self.parse_number()? {
            Number::Int(value) => i32::try_from(value)
                .map_err(|_| self.semantic(start, format!("Number '{}' is out of range", value))),
            Number::Float(_) => Err(self.semantic(start, "Expected an integer")),
        }
    }
}
