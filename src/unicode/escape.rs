//! Backslash escape resolution shared by the parser and [`UnicodeString`].
//!
//! [`UnicodeString`]: super::UnicodeString

use super::UnicodeNames;
use std::fmt;

/// A resolved escape sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Escape {
    pub text: String,
    /// Characters consumed after the backslash.
    pub consumed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EscapeError {
    /// Backslash at the end of input.
    Truncated,
    /// Unknown escape character.
    Unknown(char),
    /// Fewer hex digits than the escape requires.
    BadHex { escape: char, digits: usize },
    /// Hex digits that do not name a Unicode scalar value.
    InvalidCodepoint(u32),
    /// `\N{` without a closing brace.
    UnterminatedName,
}

impl fmt::Display for EscapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscapeError::Truncated => f.write_str("Unterminated escape sequence"),
            EscapeError::Unknown(c) => write!(f, "Invalid escape sequence '\\{}'", c),
            EscapeError::BadHex { escape, digits } => {
                write!(f, "Escape '\\{}' needs {} hex digits", escape, digits)
            }
            EscapeError::InvalidCodepoint(cp) => write!(f, "Invalid code point U+{:04X}", cp),
            EscapeError::UnterminatedName => f.write_str("Unterminated '\\N{' escape"),
        }
    }
}

/// Resolve the escape starting right after a backslash.
///
/// `extended` enables `\s`, `\x`, `\U` and `\N{}`. Named escapes that the
/// table cannot resolve (or when there is no table) are kept literally.
pub(crate) fn resolve_escape(
    rest: &[char],
    extended: bool,
    names: Option<&dyn UnicodeNames>,
) -> Result<Escape, EscapeError> {
    let Some(&c) = rest.first() else {
        return Err(EscapeError::Truncated);
    };

    let simple = |ch: char| {
        Ok(Escape {
            text: ch.to_string(),
            consumed: 1,
        })
    };

    match c {
        '\\' | '"' | '\'' | '/' => simple(c),
        'n' => simple('\n'),
        't' => simple('\t'),
        'b' => simple('\u{8}'),
        'f' => simple('\u{c}'),
        'r' => simple('\r'),
        'u' => resolve_utf16(rest),
        's' if extended => simple(' '),
        'x' if extended => resolve_hex(rest, 'x', 2),
        'U' if extended => resolve_hex(rest, 'U', 8),
        'N' if extended => resolve_name(rest, names),
        other => Err(EscapeError::Unknown(other)),
    }
}

fn read_hex(rest: &[char], escape: char, digits: usize) -> Result<u32, EscapeError> {
    let hex = rest.get(1..=digits).ok_or(EscapeError::BadHex { escape, digits })?;
    hex.iter().try_fold(0u32, |acc, c| {
        c.to_digit(16)
            .map(|d| acc * 16 + d)
            .ok_or(EscapeError::BadHex { escape, digits })
    })
}

fn resolve_hex(rest: &[char], escape: char, digits: usize) -> Result<Escape, EscapeError> {
    let code = read_hex(rest, escape, digits)?;
    let ch = char::from_u32(code).ok_or(EscapeError::InvalidCodepoint(code))?;
    Ok(Escape {
        text: ch.to_string(),
        consumed: 1 + digits,
    })
}

/// `\uHHHH`, combining a following `\uDC00`-`\uDFFF` into a surrogate pair.
fn resolve_utf16(rest: &[char]) -> Result<Escape, EscapeError> {
    let high = read_hex(rest, 'u', 4)?;
    if (0xD800..0xDC00).contains(&high) && rest.get(5) == Some(&'\\') && rest.get(6) == Some(&'u') {
        if let Ok(low) = read_hex(&rest[6..], 'u', 4) {
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                let ch = char::from_u32(code).ok_or(EscapeError::InvalidCodepoint(code))?;
                return Ok(Escape {
                    text: ch.to_string(),
                    consumed: 11,
                });
            }
        }
    }
    let ch = char::from_u32(high).ok_or(EscapeError::InvalidCodepoint(high))?;
    Ok(Escape {
        text: ch.to_string(),
        consumed: 5,
    })
}

fn resolve_name(rest: &[char], names: Option<&dyn UnicodeNames>) -> Result<Escape, EscapeError> {
    if rest.get(1) != Some(&'{') {
        return Err(EscapeError::Unknown('N'));
    }
    let close = rest
        .iter()
        .skip(2)
        .position(|&c| c == '}')
        .ok_or(EscapeError::UnterminatedName)?
        + 2;
    let name: String = rest[2..close].iter().collect();
    let consumed = close + 1;

    match names.and_then(|table| table.lookup(&name)) {
        Some(ch) => Ok(Escape {
            text: ch.to_string(),
            consumed,
        }),
        None => {
            log::debug!("Unresolved Unicode name '{}', keeping escape", name);
            Ok(Escape {
                text: format!("\\N{{{}}}", name),
                consumed,
            })
        }
    }
}

/// Resolve every escape in `input`, keeping invalid sequences literally.
pub fn unescape(input: &str, names: Option<&dyn UnicodeNames>) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        match resolve_escape(&chars[i + 1..], true, names) {
            Ok(escape) => {
                out.push_str(&escape.text);
                i += 1 + escape.consumed;
            }
            Err(_) => {
                out.push('\\');
                i += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::UnicodeNameTable;

    fn resolve(s: &str, extended: bool) -> Result<Escape, EscapeError> {
        let chars: Vec<char> = s.chars().collect();
        resolve_escape(&chars, extended, None)
    }

    #[test]
    fn test_simple_escapes() {
        assert_eq!(resolve("n", false).unwrap().text, "\n");
        assert_eq!(resolve("\"", false).unwrap().text, "\"");
        assert_eq!(resolve("s", true).unwrap().text, " ");
        assert_eq!(resolve("s", false), Err(EscapeError::Unknown('s')));
        assert_eq!(resolve("q", true), Err(EscapeError::Unknown('q')));
        assert_eq!(resolve("", true), Err(EscapeError::Truncated));
    }

    #[test]
    fn test_hex_escapes() {
        assert_eq!(resolve("x41", true).unwrap(), Escape { text: "A".into(), consumed: 3 });
        assert_eq!(resolve("u00e9", false).unwrap().text, "é");
        assert_eq!(resolve("U0001F600", true).unwrap().text, "😀");
        assert_eq!(resolve("x4", true), Err(EscapeError::BadHex { escape: 'x', digits: 2 }));
        assert_eq!(resolve("U00110000", true), Err(EscapeError::InvalidCodepoint(0x110000)));
    }

    #[test]
    fn test_surrogate_pair() {
        let escape = resolve("uD83D\\uDE00", false).unwrap();
        assert_eq!(escape.text, "😀");
        assert_eq!(escape.consumed, 11);
        assert_eq!(resolve("uD83D", false), Err(EscapeError::InvalidCodepoint(0xD83D)));
    }

    #[test]
    fn test_named_escape() {
        let mut table = UnicodeNameTable::new();
        table.insert("SNOWMAN", '☃');
        let chars: Vec<char> = "N{snowman}!".chars().collect();
        let escape = resolve_escape(&chars, true, Some(&table)).unwrap();
        assert_eq!(escape, Escape { text: "☃".into(), consumed: 10 });

        // Without a table the escape survives literally.
        assert_eq!(resolve("N{SNOWMAN}", true).unwrap().text, "\\N{SNOWMAN}");
        assert_eq!(resolve("N{SNOWMAN", true), Err(EscapeError::UnterminatedName));
    }

    #[test]
    fn test_unescape_lenient() {
        assert_eq!(unescape("a\\nb\\sc", None), "a\nb c");
        assert_eq!(unescape("bad \\q and \\", None), "bad \\q and \\");
    }
}
