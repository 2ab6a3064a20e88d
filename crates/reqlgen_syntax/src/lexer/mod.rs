//! Lexer for host test lines.
//!
//! Handles tokenization including:
//! - Keywords and identifiers
//! - Integer, float, string and byte-string literals (with prefixes, triple quotes and escapes)
//! - Operators and punctuation
//! - Implicit line continuation inside brackets and explicit `\` continuation
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String/byte-string scanning
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use reqlgen_core::lang::operators::OperatorId;
use reqlgen_core::lang::punctuation::{self, PunctuationId};

/// Lexer for one or more host lines.
///
/// There is no indentation tracking: a test line is a single logical line, so a newline outside brackets only
/// separates statements.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// Bracket depth for implicit line continuation (parens, brackets, braces)
    bracket_depth: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            bracket_depth: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.current_pos, self.current_pos)));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        self.errors
            .push(CompileError::syntax(message.into(), Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' | '\u{c}' => {}

            '#' => {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            }

            '\n' => {
                if self.bracket_depth > 0 {
                    return;
                }
                let after_separator = matches!(self.tokens.last().map(|t| &t.kind), None | Some(TokenKind::Newline));
                if !after_separator {
                    self.add(TokenKind::Newline, start);
                }
            }

            '\\' => {
                self.match_char('\r');
                if !self.match_char('\n') {
                    self.error("unexpected character after line continuation", start);
                }
            }

            '+' => self.add_op(OperatorId::Plus, start),
            '-' => self.add_op(OperatorId::Minus, start),
            '*' => self.operator(start, OperatorId::Star, '*', OperatorId::StarStar),
            '/' => self.operator(start, OperatorId::Slash, '/', OperatorId::SlashSlash),
            '%' => self.add_op(OperatorId::Percent, start),
            '@' => self.add_op(OperatorId::At, start),
            '&' => self.add_op(OperatorId::Amp, start),
            '|' => self.add_op(OperatorId::Pipe, start),
            '^' => self.add_op(OperatorId::Caret, start),
            '~' => self.add_op(OperatorId::Tilde, start),
            '=' => self.operator(start, OperatorId::Eq, '=', OperatorId::EqEq),
            '!' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.error("unexpected character '!'", start);
                }
            }
            '<' => {
                if self.match_char('<') {
                    self.add_op(OperatorId::Shl, start);
                } else {
                    self.operator(start, OperatorId::Lt, '=', OperatorId::LtEq);
                }
            }
            '>' => {
                if self.match_char('>') {
                    self.add_op(OperatorId::Shr, start);
                } else {
                    self.operator(start, OperatorId::Gt, '=', OperatorId::GtEq);
                }
            }

            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.scan_number(c, start),
            c if c.is_ascii_digit() => self.scan_number(c, start),

            '\'' | '"' => self.scan_string(c, start, StringPrefix::default()),

            c if c.is_alphabetic() || c == '_' => self.scan_identifier(c, start),

            c => match punctuation::from_char(c) {
                Some(id) => self.add_punct(id, start),
                None => self.error(format!("unexpected character '{c}'"), start),
            },
        }
    }

    fn scan_identifier(&mut self, first: char, start: usize) {
        let mut ident = String::from(first);
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if let Some(quote @ ('\'' | '"')) = self.peek() {
            if let Some(prefix) = StringPrefix::parse(&ident) {
                self.advance();
                self.scan_string(quote, start, prefix);
                return;
            }
        }

        match keyword_id(&ident) {
            Some(id) => self.add(TokenKind::Keyword(id), start),
            None => self.add(TokenKind::Ident(ident), start),
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add(TokenKind::Operator(id), start);
    }

    /// Emit `double` if the next character is `second`, otherwise `single`.
    fn operator(&mut self, start: usize, single: OperatorId, second: char, double: OperatorId) {
        if self.match_char(second) {
            self.add_op(double, start);
        } else {
            self.add_op(single, start);
        }
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        if punctuation::is_open(id) {
            self.bracket_depth += 1;
        } else if punctuation::is_close(id) {
            self.bracket_depth = self.bracket_depth.saturating_sub(1);
        }
        self.add(TokenKind::Punctuation(id), start);
    }
}

/// String literal prefix flags (`r`, `u`, `b` and combinations).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StringPrefix {
    raw: bool,
    bytes: bool,
}

impl StringPrefix {
    fn parse(ident: &str) -> Option<Self> {
        match ident.to_ascii_lowercase().as_str() {
            "r" => Some(Self { raw: true, bytes: false }),
            "u" => Some(Self::default()),
            "b" => Some(Self { raw: false, bytes: true }),
            "br" | "rb" => Some(Self { raw: true, bytes: true }),
            _ => None,
        }
    }
}

/// Tokenize source text.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}
