//! String and key quoting for both dialects.

use std::fmt::Write;

/// A JSON string literal.
pub(crate) fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// An SNBT string literal.
///
/// `value` is the resolved text, so every quote in it is a real one.
/// Single quotes are preferred. A string holding only `'` switches to
/// double quotes so nothing needs escaping; one holding both keeps single
/// quotes and escapes the `'`.
pub(crate) fn snbt_string(value: &str) -> String {
    let has_single = value.contains('\'');
    let has_double = value.contains('"');
    let delimiter = if has_single && !has_double { '"' } else { '\'' };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(delimiter);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

/// An SNBT key: bare when it is a plain identifier, quoted otherwise.
pub(crate) fn snbt_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if bare {
        key.to_string()
    } else {
        snbt_string(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_selection() {
        assert_eq!(snbt_string("plain"), "'plain'");
        assert_eq!(snbt_string("it's"), "\"it's\"");
        assert_eq!(snbt_string("say \"hi\""), "'say \"hi\"'");
        assert_eq!(snbt_string("it's \"x\""), "'it\\'s \"x\"'");
    }

    #[test]
    fn test_backslash_before_quote_is_literal() {
        // A stored backslash does not hide the quote after it.
        assert_eq!(snbt_string("a\\'b"), "\"a\\\\'b\"");
        let written = snbt_string("a\\'b \"c\"");
        assert_eq!(written, "'a\\\\\\'b \"c\"'");
    }

    #[test]
    fn test_snbt_escapes() {
        assert_eq!(snbt_string("a\\b\nc"), "'a\\\\b\\nc'");
        assert_eq!(snbt_string("\u{1}"), "'\\x01'");
    }

    #[test]
    fn test_json_string() {
        assert_eq!(json_string("Hello, \"World\"\n"), "\"Hello, \\\"World\\\"\\n\"");
        assert_eq!(json_string("é😀"), "\"é😀\"");
    }

    #[test]
    fn test_snbt_key() {
        assert_eq!(snbt_key("click_event"), "click_event");
        assert_eq!(snbt_key("minecraft:custom_name"), "'minecraft:custom_name'");
        assert_eq!(snbt_key(""), "''");
    }
}
