//! Punctuation vocabulary of the host expression grammar.

/// Stable identifier for every punctuation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,
}

/// Registry of punctuation spellings.
pub const PUNCTUATION: &[(PunctuationId, char)] = &[
    (PunctuationId::LParen, '('),
    (PunctuationId::RParen, ')'),
    (PunctuationId::LBracket, '['),
    (PunctuationId::RBracket, ']'),
    (PunctuationId::LBrace, '{'),
    (PunctuationId::RBrace, '}'),
    (PunctuationId::Comma, ','),
    (PunctuationId::Colon, ':'),
    (PunctuationId::Dot, '.'),
];

/// Resolve a punctuation character.
pub fn from_char(c: char) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|(_, p)| *p == c).map(|(id, _)| *id)
}

/// Return the spelling of a punctuation token.
pub fn as_char(id: PunctuationId) -> char {
    match id {
        PunctuationId::LParen => '(',
        PunctuationId::RParen => ')',
        PunctuationId::LBracket => '[',
        PunctuationId::RBracket => ']',
        PunctuationId::LBrace => '{',
        PunctuationId::RBrace => '}',
        PunctuationId::Comma => ',',
        PunctuationId::Colon => ':',
        PunctuationId::Dot => '.',
    }
}

/// Return `true` for opening brackets (which suspend statement-ending newlines).
pub fn is_open(id: PunctuationId) -> bool {
    matches!(id, PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace)
}

/// Return `true` for closing brackets.
pub fn is_close(id: PunctuationId) -> bool {
    matches!(id, PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace)
}
