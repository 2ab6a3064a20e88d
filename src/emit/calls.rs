//! Emit calls, collection literals and lambdas.
//!
//! Java call sites only take positional arguments, so keyword arguments become a fluent trailer:
//! `f(a, index='x')` is written `f(a).optArg("index", "x")`. Collections use fixed constructors
//! (`Arrays.asList(..)`, `new MapObject().with(k, v)..`) and keep source order.

use reqlgen_core::lang::java;
use reqlgen_core::strings::java_string_literal;
use reqlgen_syntax::ast::{Argument, DictEntry, Expr, Ident, Spanned};

use super::{Emitter, Mode};
use crate::errors::{EmitResult, Untranslatable};

impl<'a> Emitter<'a> {
    /// `callee(positional...)` followed by one `.optArg(name, value)` per keyword argument.
    pub(super) fn call(&mut self, callee: &Spanned<Expr>, args: &[Argument], mode: Mode) -> EmitResult {
        let mut positional = Vec::new();
        let mut keywords = Vec::new();
        for arg in args {
            match arg {
                Argument::Positional(value) => positional.push(value),
                Argument::Keyword(name, value) => keywords.push((name, value)),
                Argument::Starred(_) | Argument::DoubleStarred(_) => {
                    return Err(Untranslatable::unhandled(
                        "variadic arguments (*args / **kwargs) are not supported",
                    ));
                }
            }
        }

        self.expr(callee, mode)?;
        self.write("(");
        for (i, value) in positional.into_iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.expr(value, mode)?;
        }
        self.write(")");

        for (name, value) in keywords {
            self.write(".");
            self.write(java::OPT_ARG_METHOD);
            self.write("(");
            self.write(&java_string_literal(name));
            self.write(", ");
            self.expr(value, mode)?;
            self.write(")");
        }
        Ok(())
    }

    /// Lists and tuples: `Arrays.asList(a, b, ...)`.
    pub(super) fn sequence(&mut self, items: &[Spanned<Expr>], mode: Mode) -> EmitResult {
        self.write(java::LIST_CONSTRUCTOR);
        self.write("(");
        self.join(", ", items, mode)?;
        self.write(")");
        Ok(())
    }

    /// `new MapObject().with(k1, v1).with(k2, v2)`
    pub(super) fn dict(&mut self, entries: &[DictEntry], mode: Mode) -> EmitResult {
        self.write(java::MAP_CONSTRUCTOR);
        for entry in entries {
            let Some(key) = &entry.key else {
                return Err(Untranslatable::unhandled("dict unpacking (**mapping) is not supported"));
            };
            self.write(".");
            self.write(java::MAP_WITH_METHOD);
            self.write("(");
            self.expr(key, mode)?;
            self.write(", ");
            self.expr(&entry.value, mode)?;
            self.write(")");
        }
        Ok(())
    }

    /// `x -> body` for one parameter, `(a, b) -> body` otherwise.
    pub(super) fn lambda(&mut self, params: &[Ident], body: &Spanned<Expr>, mode: Mode) -> EmitResult {
        if let [param] = params {
            self.write(param);
        } else {
            self.write("(");
            self.write(&params.join(", "));
            self.write(")");
        }
        self.write(java::LAMBDA_ARROW);
        self.expr(body, mode)
    }
}
