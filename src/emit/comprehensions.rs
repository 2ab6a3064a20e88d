//! Emit the one list-comprehension shape test lines use.
//!
//! `[e for v in range(n)]` and `[e for v in range(a, b)]` become an integer stream:
//!
//! ```text
//! IntStream.range(0, n).boxed().map(v -> e).collect(Collectors.toList())
//! ```
//!
//! Any other comprehension (several generators, filters, tuple targets, a non-`range` iterable) is a hard failure.

use reqlgen_core::lang::{conventions, java};
use reqlgen_syntax::ast::{Argument, Comprehension, Expr, Spanned};

use super::{Emitter, Mode};
use crate::errors::{EmitResult, Untranslatable};

impl<'a> Emitter<'a> {
    pub(super) fn list_comp(
        &mut self,
        elt: &Spanned<Expr>,
        generators: &[Comprehension],
        mode: Mode,
    ) -> EmitResult {
        let [generator] = generators else {
            return Err(Untranslatable::unhandled(format!(
                "list comprehension with {} generators",
                generators.len()
            )));
        };
        if !generator.ifs.is_empty() {
            return Err(Untranslatable::unhandled("list comprehension filters are not supported"));
        }
        let Expr::Name(var) = &generator.target.node else {
            return Err(Untranslatable::unhandled(format!(
                "list comprehension target must be a name, found {}",
                generator.target.node.kind_name()
            )));
        };
        let (start, stop) = range_bounds(&generator.iter)?;

        self.write(java::RANGE_STREAM);
        self.write("(");
        match start {
            Some(start) => self.expr(start, Mode::Plain)?,
            None => self.write("0"),
        }
        self.write(", ");
        self.expr(stop, Mode::Plain)?;
        self.write(")");
        self.write(java::BOXED_SUFFIX);
        self.write(".map(");
        self.write(var);
        self.write(java::LAMBDA_ARROW);
        self.expr(elt, mode)?;
        self.write(")");
        self.write(java::COLLECT_SUFFIX);
        Ok(())
    }
}

/// Split `range(stop)` / `range(start, stop)` into its bounds.
fn range_bounds(iter: &Spanned<Expr>) -> EmitResult<(Option<&Spanned<Expr>>, &Spanned<Expr>)> {
    let Expr::Call(callee, args) = &iter.node else {
        return Err(not_a_range(&iter.node));
    };
    let Expr::Name(func) = &callee.node else {
        return Err(not_a_range(&iter.node));
    };
    if !func.ends_with(conventions::RANGE_CALL_SUFFIX) {
        return Err(not_a_range(&iter.node));
    }
    let positional: Vec<&Spanned<Expr>> = args
        .iter()
        .map(|arg| match arg {
            Argument::Positional(value) => Ok(value),
            _ => Err(Untranslatable::unhandled(format!("{func}() only takes positional arguments here"))),
        })
        .collect::<EmitResult<_>>()?;
    match positional.as_slice() {
        [stop] => Ok((None, stop)),
        [start, stop] => Ok((Some(start), stop)),
        other => Err(Untranslatable::unhandled(format!(
            "{func}() with {} arguments cannot be converted",
            other.len()
        ))),
    }
}

fn not_a_range(iter: &Expr) -> Untranslatable {
    Untranslatable::unhandled(format!(
        "list comprehension over {} cannot be converted; only range(...) is supported",
        iter.kind_name()
    ))
}
