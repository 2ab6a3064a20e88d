//! Emit member access, subscripts and slices.
//!
//! ## Plain mode
//! - `owner.member` is written as-is.
//! - Only integer-literal subscripts are supported: `value[3]`.
//!
//! ## DSL mode
//! - Member names go through the naming transform (`get_all` → `getAll`), the host-keyword clash table
//!   (`or_` → `or`), and Java escaping (`default` → `default_`).
//! - `root.row` is a deliberate skip: the Java driver has no implicit-row accessor.
//! - `x[i]` becomes `x.bracket(i)`; `x[a:b]` becomes `x.slice(a, b)` with omitted bounds defaulting to `0` and
//!   `-1`. Bounds must be integer literals, optionally negated (`-1` arrives as a negation of `1` and is folded
//!   back into one literal). Steps and multi-dimensional slices are hard failures.

use reqlgen_core::lang::{conventions, java};
use reqlgen_core::naming::dromedary;
use reqlgen_syntax::ast::{Expr, Literal, Slice, Spanned, UnaryOp};

use super::{Emitter, Mode};
use crate::errors::{EmitResult, Untranslatable};

impl<'a> Emitter<'a> {
    pub(super) fn attribute(&mut self, owner: &Spanned<Expr>, member: &str, mode: Mode) -> EmitResult {
        match mode {
            Mode::Plain => {
                self.expr(owner, mode)?;
                self.write(".");
                self.write(member);
                Ok(())
            }
            Mode::Dsl => {
                let root = &self.config.dsl_root;
                if matches!(&owner.node, Expr::Name(name) if name == root)
                    && conventions::is_unsupported_root_member(member)
                {
                    return Err(Untranslatable::skip(format!("Java driver doesn't support {root}.{member}")));
                }
                self.expr(owner, mode)?;
                self.write(".");
                self.write(&java_member_name(member));
                Ok(())
            }
        }
    }

    pub(super) fn subscript(&mut self, value: &Spanned<Expr>, slice: &Slice, mode: Mode) -> EmitResult {
        match mode {
            Mode::Plain => {
                let Slice::Index(Spanned {
                    node: Expr::Literal(Literal::Int(index)),
                    ..
                }) = slice
                else {
                    return Err(Untranslatable::unhandled(format!(
                        "only integer subscripts can be converted, found {}",
                        describe_slice(slice)
                    )));
                };
                self.expr(value, mode)?;
                self.write("[");
                self.write(&index.to_string());
                self.write("]");
                Ok(())
            }
            Mode::Dsl => {
                self.expr(value, mode)?;
                match slice {
                    Slice::Index(index) => {
                        self.write(".");
                        self.write(conventions::BRACKET_METHOD);
                        self.write("(");
                        self.expr(index, mode)?;
                        self.write(")");
                    }
                    Slice::Range { lower, upper, step } => {
                        if step.is_some() {
                            return Err(Untranslatable::unhandled("slice steps are not supported"));
                        }
                        let lower = slice_bound(lower.as_ref(), conventions::SLICE_DEFAULT_LOWER)?;
                        let upper = slice_bound(upper.as_ref(), conventions::SLICE_DEFAULT_UPPER)?;
                        self.write(".");
                        self.write(conventions::SLICE_METHOD);
                        self.write("(");
                        self.write(&lower.to_string());
                        self.write(", ");
                        self.write(&upper.to_string());
                        self.write(")");
                    }
                    Slice::Extended(_) => {
                        return Err(Untranslatable::unhandled("no translation for extended slices"));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Java method name for a DSL member.
pub(crate) fn java_member_name(member: &str) -> String {
    let name = match conventions::clash_spelling(member) {
        Some(fixed) => fixed.to_string(),
        None => dromedary(member),
    };
    java::escape_member(&name)
}

/// Resolve one slice bound to a Java `int`.
///
/// Accepts an omitted bound (`default`), an integer literal, or a negation of an integer literal. Java indexes
/// with `int`, so a bound outside its range is refused instead of widened.
fn slice_bound(bound: Option<&Spanned<Expr>>, default: i128) -> EmitResult<i32> {
    let value = match bound.map(|b| &b.node) {
        None => default,
        Some(Expr::Literal(Literal::Int(value))) => *value,
        Some(Expr::Unary(UnaryOp::Neg, operand)) => match &operand.node {
            Expr::Literal(Literal::Int(value)) => -value,
            other => return Err(unsupported_bound(other)),
        },
        Some(other) => return Err(unsupported_bound(other)),
    };
    i32::try_from(value)
        .map_err(|_| Untranslatable::unhandled(format!("slice bound {value} does not fit in a Java int")))
}

fn unsupported_bound(expr: &Expr) -> Untranslatable {
    Untranslatable::unhandled(format!(
        "slice bounds must be integer literals, found {}",
        expr.kind_name()
    ))
}

fn describe_slice(slice: &Slice) -> &'static str {
    match slice {
        Slice::Index(index) => index.node.kind_name(),
        Slice::Range { .. } => "slice",
        Slice::Extended(_) => "extended slice",
    }
}
