//! Emit unary, binary and comparison operators.
//!
//! Plain mode uses Java's infix and prefix symbols, except `**` which becomes `Math.pow(a, b)`. The host tree has
//! no parentheses, so operands that bind looser than their parent are wrapped to keep the original grouping
//! (`(a + b) * c`).
//!
//! DSL mode replaces binary operators and comparisons with methods on the DSL root (`r.add(a, b)`,
//! `r.lt(a, b)`), which need no grouping at all. Only single comparisons are accepted; `a < b < c` has no
//! faithful rendering and is a hard failure.

use reqlgen_core::lang::{java, operators};
use reqlgen_syntax::ast::{BinaryOp, CompareOp, Expr, Spanned, UnaryOp};

use super::{Emitter, Mode};
use crate::errors::{EmitResult, Untranslatable};

impl<'a> Emitter<'a> {
    pub(super) fn unary(&mut self, op: UnaryOp, operand: &Spanned<Expr>, mode: Mode) -> EmitResult {
        let symbol = operators::java_prefix(op.operator_id())
            .ok_or_else(|| Untranslatable::unhandled(format!("no Java operator for unary '{op}'")))?;
        self.write(symbol);
        let wrap = (mode == Mode::Plain && infix_precedence(&operand.node).is_some())
            || starts_with_same_prefix(symbol, &operand.node);
        self.operand(operand, mode, wrap)
    }

    pub(super) fn binary(
        &mut self,
        left: &Spanned<Expr>,
        op: BinaryOp,
        right: &Spanned<Expr>,
        mode: Mode,
    ) -> EmitResult {
        match mode {
            Mode::Dsl => {
                let method = operators::dsl_method(op.operator_id())
                    .ok_or_else(|| Untranslatable::unhandled(format!("no DSL method for operator '{op}'")))?;
                self.dsl_call2(method, left, right)
            }
            Mode::Plain if op == BinaryOp::Pow => {
                self.write(java::POW_FUNCTION);
                self.write("(");
                self.expr(left, mode)?;
                self.write(", ");
                self.expr(right, mode)?;
                self.write(")");
                Ok(())
            }
            Mode::Plain => {
                let symbol = operators::java_infix(op.operator_id())
                    .ok_or_else(|| Untranslatable::unhandled(format!("no Java operator for '{op}'")))?;
                let own = binary_precedence(op).unwrap_or(0);
                let wrap_left = infix_precedence(&left.node).is_some_and(|p| p < own);
                let wrap_right = infix_precedence(&right.node).is_some_and(|p| p <= own);
                self.operand(left, mode, wrap_left)?;
                self.write(" ");
                self.write(symbol);
                self.write(" ");
                self.operand(right, mode, wrap_right)
            }
        }
    }

    pub(super) fn compare(
        &mut self,
        left: &Spanned<Expr>,
        comparisons: &[(CompareOp, Spanned<Expr>)],
        mode: Mode,
    ) -> EmitResult {
        if mode == Mode::Plain {
            return Err(Untranslatable::unhandled("comparisons between plain values are not supported"));
        }
        let [(op, right)] = comparisons else {
            return Err(Untranslatable::unhandled(format!(
                "chained comparisons are not supported ({} operators)",
                comparisons.len()
            )));
        };
        let method = operators::dsl_method(op.operator_id())
            .ok_or_else(|| Untranslatable::unhandled(format!("no DSL method for comparison '{op}'")))?;
        self.dsl_call2(method, left, right)
    }

    fn operand(&mut self, expr: &Spanned<Expr>, mode: Mode, wrap: bool) -> EmitResult {
        if wrap {
            self.write("(");
            self.expr(expr, mode)?;
            self.write(")");
            Ok(())
        } else {
            self.expr(expr, mode)
        }
    }
}

/// Java precedence of a binary operator that plain mode writes infix (higher binds tighter).
fn binary_precedence(op: BinaryOp) -> Option<u8> {
    match op {
        BinaryOp::Add | BinaryOp::Sub => Some(1),
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => Some(2),
        _ => None,
    }
}

/// Precedence of `expr` if plain mode writes it as an infix operation.
fn infix_precedence(expr: &Expr) -> Option<u8> {
    match expr {
        Expr::Binary(_, op, _) => binary_precedence(*op),
        _ => None,
    }
}

/// `- -x` must not be written `--x`.
fn starts_with_same_prefix(symbol: &str, operand: &Expr) -> bool {
    match operand {
        Expr::Unary(inner, _) => {
            matches!(symbol, "-" | "+") && operators::java_prefix(inner.operator_id()) == Some(symbol)
        }
        _ => false,
    }
}
