//! Parser for host test lines.
//!
//! Converts a token stream into a [`Statement`] using the host language's precedence ladder, restricted to the
//! expression subset that test lines use.
//!
//! ## Examples
//!
//! ```rust
//! use reqlgen_syntax::{lexer, parser};
//! use reqlgen_syntax::ast::{Expr, Statement};
//!
//! let tokens = lexer::lex("r.expr(1) + 2").unwrap();
//! let stmt = parser::parse_statement(&tokens).unwrap();
//! assert!(matches!(stmt, Statement::Expr(ref e) if matches!(e.node, Expr::Binary(..))));
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind};
use reqlgen_core::lang::keywords::KeywordId;
use reqlgen_core::lang::operators::OperatorId;
use reqlgen_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module while avoiding a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
