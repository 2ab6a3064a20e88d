//! Numeric literal scanning.
//!
//! Integers are kept at 128 bits so that values beyond Java's `int` and `long` survive until the emitter decides
//! how to widen them. Only a literal that does not fit 128 bits is a lex error.

use super::Lexer;
use super::tokens::TokenKind;

impl<'a> Lexer<'a> {
    /// Scan a number whose first character (a digit or `.`) has been consumed.
    pub(super) fn scan_number(&mut self, first: char, start: usize) {
        if first == '0' {
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                self.scan_radix_int(radix, start);
                return;
            }
        }

        let mut text = String::from(first);
        let mut is_float = first == '.';
        self.take_digits(&mut text, 10);

        if !is_float && self.peek() == Some('.') {
            self.advance();
            text.push('.');
            is_float = true;
            self.take_digits(&mut text, 10);
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let has_exponent_digits = match self.peek_next() {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => {
                    let rest = &self.source[self.current_pos..];
                    rest.chars().nth(2).is_some_and(|c| c.is_ascii_digit())
                }
                _ => false,
            };
            if has_exponent_digits {
                self.advance();
                text.push('e');
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    self.advance();
                    text.push(sign);
                }
                self.take_digits(&mut text, 10);
                is_float = true;
            }
        }

        if matches!(self.peek(), Some('j' | 'J')) {
            self.advance();
            self.error("complex literals are not supported", start);
            return;
        }

        if is_float {
            match text.parse::<f64>() {
                Ok(value) => self.add(TokenKind::Float(value), start),
                Err(_) => self.error(format!("invalid float literal '{text}'"), start),
            }
        } else {
            match text.parse::<i128>() {
                Ok(value) => self.add(TokenKind::Int(value), start),
                Err(_) => self.error(format!("integer literal '{text}' is too large"), start),
            }
        }
    }

    fn scan_radix_int(&mut self, radix: u32, start: usize) {
        let mut digits = String::new();
        self.take_digits(&mut digits, radix);
        if digits.is_empty() {
            self.error("missing digits after integer base prefix", start);
            return;
        }
        match i128::from_str_radix(&digits, radix) {
            Ok(value) => self.add(TokenKind::Int(value), start),
            Err(_) => self.error("integer literal is too large", start),
        }
    }

    /// Append digits of `radix` to `text`, dropping `_` separators.
    fn take_digits(&mut self, text: &mut String, radix: u32) {
        while let Some(c) = self.peek() {
            if c.is_digit(radix) {
                text.push(c);
                self.advance();
            } else if c == '_' && self.peek_next().is_some_and(|n| n.is_digit(radix)) {
                self.advance();
            } else {
                break;
            }
        }
    }
}
