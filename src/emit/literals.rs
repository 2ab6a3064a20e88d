//! Emit literals and names.
//!
//! ## Numbers
//!
//! Integer literals are written in decimal. One whose magnitude exceeds Java's `int` range gets a `.0` suffix so
//! that `javac` reads a `double` instead of rejecting (or, via a `long` cast, silently truncating) it. Floats use
//! the shortest representation that reads back to the same `double`.

use reqlgen_core::lang::{constants, java};
use reqlgen_core::strings::java_string_literal;
use reqlgen_syntax::ast::Literal;

use super::Emitter;
use crate::errors::{EmitResult, Untranslatable};

impl<'a> Emitter<'a> {
    pub(super) fn literal(&mut self, literal: &Literal) -> EmitResult {
        match literal {
            Literal::Str(value) => self.write(&java_string_literal(value)),
            Literal::Bytes(bytes) => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|_| Untranslatable::unhandled("bytes literal is not valid UTF-8"))?;
                self.write(&java_string_literal(text));
                self.write(java::BYTES_SUFFIX);
            }
            Literal::Int(value) => self.write(&int_literal(*value)),
            Literal::Float(value) => {
                if !value.is_finite() {
                    return Err(Untranslatable::unhandled(format!(
                        "float literal {value} is out of range"
                    )));
                }
                self.write(&format!("{value:?}"));
            }
            Literal::Bool(value) => self.write(constants::java_bool(*value)),
            Literal::None => self.write(constants::JAVA_NULL),
        }
        Ok(())
    }

    /// Names pass through, except the constant spellings (`nil` and friends).
    pub(super) fn name(&mut self, name: &str) {
        self.write(constants::java_spelling(name).unwrap_or(name));
    }
}

/// Render an integer literal, widening values outside the `int` range.
pub(crate) fn int_literal(value: i128) -> String {
    if value.unsigned_abs() > java::INT_MAX.unsigned_abs() {
        format!("{value}{}", java::WIDE_INT_SUFFIX)
    } else {
        value.to_string()
    }
}
