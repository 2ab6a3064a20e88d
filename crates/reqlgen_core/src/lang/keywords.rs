//! Define the reserved words of the host expression grammar.
//!
//! Only the words the expression subset can contain are listed. Statement keywords (`def`, `class`, ...) never
//! appear in a test line and lex as ordinary identifiers.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (`True` is a keyword, `true` is a name).
//! - `and`/`or`/`if`/`else` are reserved so the parser can reject them with a clear message instead of
//!   misreading them as names.
//!
//! ## Examples
//! ```rust
//! use reqlgen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("lambda"), Some(KeywordId::Lambda));
//! assert_eq!(keywords::as_str(KeywordId::None), "None");
//! ```

/// Stable identifier for every reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    Lambda,
    For,
    In,
    If,
    Else,
    Not,
    And,
    Or,
    Is,
    True,
    False,
    None,
}

/// Registry of keyword spellings.
pub const KEYWORDS: &[(KeywordId, &str)] = &[
    (KeywordId::Lambda, "lambda"),
    (KeywordId::For, "for"),
    (KeywordId::In, "in"),
    (KeywordId::If, "if"),
    (KeywordId::Else, "else"),
    (KeywordId::Not, "not"),
    (KeywordId::And, "and"),
    (KeywordId::Or, "or"),
    (KeywordId::Is, "is"),
    (KeywordId::True, "True"),
    (KeywordId::False, "False"),
    (KeywordId::None, "None"),
];

/// Resolve a spelling to its keyword id.
pub fn from_str(spelling: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|(_, s)| *s == spelling).map(|(id, _)| *id)
}

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    match id {
        KeywordId::Lambda => "lambda",
        KeywordId::For => "for",
        KeywordId::In => "in",
        KeywordId::If => "if",
        KeywordId::Else => "else",
        KeywordId::Not => "not",
        KeywordId::And => "and",
        KeywordId::Or => "or",
        KeywordId::Is => "is",
        KeywordId::True => "True",
        KeywordId::False => "False",
        KeywordId::None => "None",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_round_trips() {
        for (id, spelling) in KEYWORDS {
            assert_eq!(from_str(spelling), Some(*id));
            assert_eq!(as_str(*id), *spelling);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(from_str("true"), None);
        assert_eq!(from_str("none"), None);
    }
}
