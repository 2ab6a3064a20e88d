//! Java string-literal rendering.
//!
//! The emitted literal must denote exactly the same character sequence once `javac` has read it. Two Java quirks
//! shape the rules:
//! - Unicode escapes (`\uXXXX`) are translated *before* lexing, so an escaped line terminator would still end the
//!   literal. Control characters are therefore written as octal escapes instead.
//! - A backslash is always doubled, which also keeps a literal `\u` in the source text from being read as a
//!   Unicode escape.
//!
//! Everything else, including non-ASCII text, is written as-is (sources are compiled as UTF-8).
//!
//! ## Examples
//! ```rust
//! use reqlgen_core::strings::java_string_literal;
//!
//! assert_eq!(java_string_literal("say \"hi\"\n"), r#""say \"hi\"\n""#);
//! assert_eq!(java_string_literal("it's"), r#""it's""#);
//! ```

use std::fmt::Write as _;

/// Render `value` as a double-quoted Java string literal.
pub fn java_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    escape_into(&mut out, value);
    out.push('"');
    out
}

/// Append the escaped body of a Java string literal (without quotes) to `out`.
pub fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                // Writing into a String cannot fail.
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_escapes() {
        assert_eq!(java_string_literal("a\tb\rc"), r#""a\tb\rc""#);
        assert_eq!(java_string_literal("\u{8}\u{c}"), r#""\b\f""#);
    }

    #[test]
    fn control_characters_use_octal() {
        assert_eq!(java_string_literal("\0"), r#""\000""#);
        assert_eq!(java_string_literal("\u{1b}"), r#""\033""#);
        assert_eq!(java_string_literal("\u{7f}"), r#""\177""#);
    }

    #[test]
    fn backslash_u_is_not_a_unicode_escape() {
        assert_eq!(java_string_literal("\\u0041"), r#""\\u0041""#);
    }

    #[test]
    fn non_ascii_passes_through() {
        assert_eq!(java_string_literal("héllo ☃ 😀"), "\"héllo ☃ 😀\"");
    }
}
