//! Error types for text component handling.

use crate::types::Dialect;
use std::fmt;
use thiserror::Error;

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for text component operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The source text is not a valid text component.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// The component uses something the target dialect cannot express.
    #[error("'{feature}' cannot be written in the {dialect} dialect")]
    UnsupportedInDialect { feature: String, dialect: Dialect },

    /// A Minecraft version string could not be understood.
    #[error("Invalid Minecraft version: {0}")]
    InvalidVersion(String),

    /// Failed to read or parse a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or decode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid resource pack structure.
    #[error("Invalid resource pack: {0}")]
    InvalidResourcePack(String),
}

/// What kind of problem a [`ParseError`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Malformed tokens: bad characters, unterminated strings, unbalanced
    /// brackets, duplicate keys, stray commas.
    Syntax,
    /// Well-formed but invalid: unknown keys, wrong value types, missing
    /// companion keys, out-of-range values.
    Semantic,
    /// A key or action exists, but not in the active dialect.
    VersionUnsupported,
}

impl ParseErrorKind {
    /// Both [`Semantic`](Self::Semantic) and
    /// [`VersionUnsupported`](Self::VersionUnsupported) describe well-formed input.
    pub fn is_semantic(self) -> bool {
        matches!(self, Self::Semantic | Self::VersionUnsupported)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Syntax => "syntax error",
            Self::Semantic => "semantic error",
            Self::VersionUnsupported => "unsupported in this version",
        })
    }
}

/// A positioned error produced while parsing a text component.
///
/// Rendering it prints the context chain, the message, the position and the
/// offending source line with a caret under the failing column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    message: String,
    context: Vec<String>,
    line: usize,
    column: usize,
    source_line: String,
}

impl ParseError {
    pub(crate) fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        line: usize,
        column: usize,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::new(),
            line,
            column,
            source_line: source_line.into(),
        }
    }

    /// Wrap the error with an outer description, keeping its position.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.insert(0, context.into());
        self
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The innermost message, without context or position.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Context descriptions, outermost first.
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// 1-based line of the error.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column (in characters) of the error.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn source_line(&self) -> &str {
        &self.source_line
    }

    /// The source line followed by a caret line pointing at the column.
    pub fn pointer(&self) -> String {
        format!(
            "{}\n{}^",
            self.source_line,
            " ".repeat(self.column.saturating_sub(1))
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for context in &self.context {
            write!(f, "{}: ", context)?;
        }
        write!(
            f,
            "{} at line {}, column {}\n{}",
            self.message,
            self.line,
            self.column,
            self.pointer()
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_rendering() {
        let err = ParseError::new(ParseErrorKind::Syntax, "Unexpected '}'", 1, 5, "{a:b}}");
        assert_eq!(err.pointer(), "{a:b}}\n    ^");
    }

    #[test]
    fn test_context_chain() {
        let err = ParseError::new(ParseErrorKind::Semantic, "Unknown color 'redd'", 1, 8, "{color:redd}")
            .with_context("Invalid value for 'color'")
            .with_context("Invalid object");
        let rendered = err.to_string();
        assert!(rendered.starts_with("Invalid object: Invalid value for 'color': Unknown color 'redd'"));
        assert!(rendered.contains("line 1, column 8"));
        assert_eq!(err.message(), "Unknown color 'redd'");
    }

    #[test]
    fn test_kind_classification() {
        assert!(!ParseErrorKind::Syntax.is_semantic());
        assert!(ParseErrorKind::Semantic.is_semantic());
        assert!(ParseErrorKind::VersionUnsupported.is_semantic());
    }
}
