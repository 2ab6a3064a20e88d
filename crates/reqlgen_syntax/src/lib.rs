//! Host-expression frontend for reqlgen: lexer, parser, AST, diagnostics.
//!
//! Test lines are written in the host language's expression grammar. This crate turns one line into a
//! [`ast::Statement`] and nothing more: it has no notion of DSL values, Java, or emission.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: the supported subset is closed, and anything outside it is a
//!   [`diagnostics::CompileError`] rather than an approximate tree.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `reqlgen_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use reqlgen_syntax::ast::Statement;
//! use reqlgen_syntax::parse_line;
//!
//! let stmt = parse_line("t = r.table('x')").unwrap();
//! assert!(matches!(stmt, Statement::Assign { .. }));
//! ```
//!
//! ## See also
//! - `reqlgen_core::lang` for registry-backed vocabulary.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;

use ast::{Expr, Spanned, Statement};
use diagnostics::CompileError;

/// Lex and parse one test line into a statement.
///
/// ## Errors
/// Returns every lexer error, or the parser's errors if lexing succeeded.
pub fn parse_line(source: &str) -> Result<Statement, Vec<CompileError>> {
    let tokens = lexer::lex(source)?;
    parser::parse_statement(&tokens)
}

/// Lex and parse a single expression (no assignment).
pub fn parse_expr(source: &str) -> Result<Spanned<Expr>, Vec<CompileError>> {
    let tokens = lexer::lex(source)?;
    parser::parse_expression(&tokens)
}
