//! String and byte-string scanning.
//!
//! Escape handling follows the host language: unknown escapes keep their backslash, `\x`/octal escapes denote
//! code points (or bytes), `\u`/`\U` are only recognized in text strings, and a raw prefix disables everything
//! except quote protection.

use super::tokens::TokenKind;
use super::{Lexer, StringPrefix};

/// Accumulates either text or bytes.
enum Buffer {
    Text(String),
    Bytes(Vec<u8>),
}

impl Buffer {
    fn push(&mut self, c: char) -> Result<(), String> {
        match self {
            Buffer::Text(s) => {
                s.push(c);
                Ok(())
            }
            Buffer::Bytes(b) => {
                if c.is_ascii() {
                    b.push(c as u8);
                    Ok(())
                } else {
                    Err(format!("bytes can only contain ASCII literal characters, found '{c}'"))
                }
            }
        }
    }

    /// Push a numeric escape value (`\xNN`, `\NNN`).
    fn push_value(&mut self, value: u32) -> Result<(), String> {
        match self {
            Buffer::Text(s) => {
                let c = char::from_u32(value).ok_or_else(|| format!("invalid code point {value:#x}"))?;
                s.push(c);
                Ok(())
            }
            Buffer::Bytes(b) => {
                let byte = u8::try_from(value).map_err(|_| format!("byte escape out of range: {value:#o}"))?;
                b.push(byte);
                Ok(())
            }
        }
    }

    fn into_token(self) -> TokenKind {
        match self {
            Buffer::Text(s) => TokenKind::String(s),
            Buffer::Bytes(b) => TokenKind::Bytes(b),
        }
    }
}

impl<'a> Lexer<'a> {
    /// Scan a string literal whose opening quote has been consumed.
    pub(super) fn scan_string(&mut self, quote: char, start: usize, prefix: StringPrefix) {
        let triple = self.peek() == Some(quote) && self.peek_next() == Some(quote);
        if triple {
            self.advance();
            self.advance();
        } else if self.peek() == Some(quote) {
            // Empty string.
            self.advance();
            let kind = if prefix.bytes {
                TokenKind::Bytes(Vec::new())
            } else {
                TokenKind::String(String::new())
            };
            self.add(kind, start);
            return;
        }

        let mut buf = if prefix.bytes {
            Buffer::Bytes(Vec::new())
        } else {
            Buffer::Text(String::new())
        };

        loop {
            let Some(c) = self.advance() else {
                self.error("unterminated string literal", start);
                return;
            };

            if c == quote {
                if !triple {
                    break;
                }
                if self.peek() == Some(quote) && self.peek_next() == Some(quote) {
                    self.advance();
                    self.advance();
                    break;
                }
            } else if c == '\n' && !triple {
                self.error("unterminated string literal", start);
                return;
            } else if c == '\\' {
                let escape_start = self.current_pos - 1;
                if let Err(message) = self.scan_escape(&mut buf, prefix) {
                    self.error(message, escape_start);
                    return;
                }
                continue;
            }

            if let Err(message) = buf.push(c) {
                self.error(message, start);
                return;
            }
        }

        self.add(buf.into_token(), start);
    }

    /// Process one escape sequence; the backslash has been consumed.
    fn scan_escape(&mut self, buf: &mut Buffer, prefix: StringPrefix) -> Result<(), String> {
        let Some(c) = self.advance() else {
            return Err("unterminated string literal".to_string());
        };

        if prefix.raw {
            // A raw string keeps the backslash; it only stops the next char from closing the literal.
            buf.push('\\')?;
            return buf.push(c);
        }

        match c {
            '\n' => Ok(()),
            '\\' => buf.push('\\'),
            '\'' => buf.push('\''),
            '"' => buf.push('"'),
            'a' => buf.push('\u{7}'),
            'b' => buf.push('\u{8}'),
            'f' => buf.push('\u{c}'),
            'n' => buf.push('\n'),
            'r' => buf.push('\r'),
            't' => buf.push('\t'),
            'v' => buf.push('\u{b}'),
            '0'..='7' => {
                let mut value = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            self.advance();
                        }
                        None => break,
                    }
                }
                buf.push_value(value)
            }
            'x' => {
                let value = self.scan_hex_digits(2)?;
                buf.push_value(value)
            }
            'u' if matches!(buf, Buffer::Text(_)) => {
                let value = self.scan_hex_digits(4)?;
                buf.push_value(value)
            }
            'U' if matches!(buf, Buffer::Text(_)) => {
                let value = self.scan_hex_digits(8)?;
                buf.push_value(value)
            }
            'N' if matches!(buf, Buffer::Text(_)) => Err("named unicode escapes are not supported".to_string()),
            other => {
                buf.push('\\')?;
                buf.push(other)
            }
        }
    }

    fn scan_hex_digits(&mut self, count: usize) -> Result<u32, String> {
        let mut value = 0u32;
        for _ in 0..count {
            let digit = self
                .peek()
                .and_then(|d| d.to_digit(16))
                .ok_or_else(|| format!("truncated escape: expected {count} hex digits"))?;
            value = value * 16 + digit;
            self.advance();
        }
        Ok(value)
    }
}
