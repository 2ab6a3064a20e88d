//! Emit Java source text from host test-line trees.
//!
//! This module defines [`Emitter`] and wires together the focused submodules that implement emission. The
//! per-node logic lives in those submodules; `mod.rs` holds the dispatch and the public entry points.
//!
//! ## Modes
//!
//! One emitter serves both renderings. [`Mode::Plain`] writes ordinary Java (infix operators, `x[0]`,
//! `a.b`); [`Mode::Dsl`] rewrites operators, comparisons, subscripts and member access into method chains on the
//! DSL root (`r.add(a, b)`, `x.bracket(0)`, `t.getAll(..)`). A subtree is rendered in the mode of the expression
//! it belongs to; only an assignment's right-hand side re-decides its mode, via [`crate::classify`].
//!
//! ## Notes
//! - Emission appends to a buffer owned by one [`Emitter`] and never touches shared state, so emitting the same
//!   tree twice yields identical text.
//! - Every `Expr` variant is matched exhaustively; a construct with no rewrite rule returns
//!   [`Untranslatable::Unhandled`] instead of writing something approximate.
//!
//! ## See also
//! - [`literals`]: literals and names
//! - [`calls`]: calls, collections and lambdas
//! - [`operators`]: unary, binary and comparison operators
//! - [`access`]: member access, subscripts and slices
//! - [`comprehensions`]: the `range` list-comprehension idiom

mod access;
mod calls;
mod comprehensions;
mod literals;
mod operators;

use reqlgen_syntax::ast::{Expr, Spanned, Statement};

use crate::classify::{DslVars, is_dsl_value};
use crate::config::ConvertConfig;
use crate::errors::{EmitResult, Untranslatable};

/// Which rewrite rules apply to the subtree being emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Ordinary Java values.
    Plain,
    /// DSL values: operators and access become method calls.
    Dsl,
}

impl Mode {
    /// The mode for an expression, as decided by the classifier.
    pub fn for_expr(expr: &Expr, vars: &DslVars) -> Self {
        if is_dsl_value(expr, vars) { Mode::Dsl } else { Mode::Plain }
    }
}

/// Emit Java source text for one statement or expression.
///
/// ## Notes
/// - The known-DSL set is read-only here; the batch driver decides when it grows.
pub struct Emitter<'a> {
    vars: &'a DslVars,
    config: &'a ConvertConfig,
    out: String,
}

impl<'a> Emitter<'a> {
    pub fn new(vars: &'a DslVars, config: &'a ConvertConfig) -> Self {
        Self {
            vars,
            config,
            out: String::new(),
        }
    }

    /// Text written so far (useful after a failure).
    pub fn partial(&self) -> &str {
        &self.out
    }

    /// Consume the emitter and return the emitted text.
    pub fn finish(self) -> String {
        self.out
    }

    /// Emit a statement.
    ///
    /// An assignment becomes a typed declaration. Its declared type and the mode of its right-hand side come
    /// from classifying the right-hand side; `mode` only applies to a bare expression.
    pub fn statement(&mut self, stmt: &Statement, mode: Mode) -> EmitResult {
        match stmt {
            Statement::Assign { targets, value } => {
                let [target] = targets.as_slice() else {
                    return Err(Untranslatable::unhandled(
                        "only assignment to a single variable is supported",
                    ));
                };
                let Expr::Name(name) = &target.node else {
                    return Err(Untranslatable::unhandled(format!(
                        "assignment target must be a name, found {}",
                        target.node.kind_name()
                    )));
                };
                let rhs_mode = Mode::for_expr(&value.node, self.vars);
                let config = self.config;
                let declared = match rhs_mode {
                    Mode::Dsl => &config.dsl_type,
                    Mode::Plain => &config.opaque_type,
                };
                self.write(declared);
                self.write(" ");
                self.write(name);
                self.write(" = ");
                self.expr(value, rhs_mode)?;
                self.write(";");
                Ok(())
            }
            Statement::Expr(expr) => self.expr(expr, mode),
        }
    }

    /// Emit an expression in the given mode.
    pub fn expr(&mut self, expr: &Spanned<Expr>, mode: Mode) -> EmitResult {
        match &expr.node {
            Expr::Literal(literal) => self.literal(literal),
            Expr::Name(name) => {
                self.name(name);
                Ok(())
            }
            Expr::Attribute(owner, member) => self.attribute(owner, member, mode),
            Expr::Call(callee, args) => self.call(callee, args, mode),
            Expr::Subscript(value, slice) => self.subscript(value, slice, mode),
            Expr::List(items) | Expr::Tuple(items) => self.sequence(items, mode),
            Expr::Dict(entries) => self.dict(entries, mode),
            Expr::Lambda(params, body) => self.lambda(params, body, mode),
            Expr::Unary(op, operand) => self.unary(*op, operand, mode),
            Expr::Binary(left, op, right) => self.binary(left, *op, right, mode),
            Expr::Compare(left, comparisons) => self.compare(left, comparisons, mode),
            Expr::ListComp(elt, generators) => self.list_comp(elt, generators, mode),
        }
    }

    fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Emit `items` separated by `sep`.
    fn join(&mut self, sep: &str, items: &[Spanned<Expr>], mode: Mode) -> EmitResult {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(sep);
            }
            self.expr(item, mode)?;
        }
        Ok(())
    }

    /// Emit `root.method(left, right)`.
    fn dsl_call2(&mut self, method: &str, left: &Spanned<Expr>, right: &Spanned<Expr>) -> EmitResult {
        let config = self.config;
        self.write(&config.dsl_root);
        self.write(".");
        self.write(method);
        self.write("(");
        self.expr(left, Mode::Dsl)?;
        self.write(", ");
        self.expr(right, Mode::Dsl)?;
        self.write(")");
        Ok(())
    }
}

/// Emit one statement to a string.
///
/// ## Errors
/// Returns the [`Untranslatable`] signal of the first node that could not be rendered. A hard failure is logged
/// at `error` together with the text emitted before it; a soft skip is logged at `debug`.
#[tracing::instrument(level = "trace", skip_all, fields(mode = ?mode))]
pub fn emit_statement(
    stmt: &Statement,
    mode: Mode,
    vars: &DslVars,
    config: &ConvertConfig,
) -> EmitResult<String> {
    let mut emitter = Emitter::new(vars, config);
    match emitter.statement(stmt, mode) {
        Ok(()) => Ok(emitter.finish()),
        Err(err) => {
            report(&err, emitter.partial());
            Err(err)
        }
    }
}

/// Emit one expression to a string. See [`emit_statement`].
#[tracing::instrument(level = "trace", skip_all, fields(mode = ?mode))]
pub fn emit_expr(expr: &Spanned<Expr>, mode: Mode, vars: &DslVars, config: &ConvertConfig) -> EmitResult<String> {
    let mut emitter = Emitter::new(vars, config);
    match emitter.expr(expr, mode) {
        Ok(()) => Ok(emitter.finish()),
        Err(err) => {
            report(&err, emitter.partial());
            Err(err)
        }
    }
}

fn report(err: &Untranslatable, partial: &str) {
    if err.is_hard() {
        tracing::error!(error = %err, got_as_far_as = partial, "could not translate expression");
    } else {
        tracing::debug!(reason = %err, "expression skipped for this target");
    }
}
