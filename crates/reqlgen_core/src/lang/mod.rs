//! Lexical vocabulary registries.
//!
//! Host-side tables (keywords, operators, constant spellings) describe what the frontend accepts. Target-side
//! tables (Java reserved words, DSL conventions) describe what the emitter must produce or avoid.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - Callers work with stable IDs (e.g. [`keywords::KeywordId`], [`operators::OperatorId`]) and look up
//!   spellings via the registry functions.
//!
//! ## Examples
//! ```rust
//! use reqlgen_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("**"), Some(OperatorId::StarStar));
//! assert_eq!(operators::dsl_method(OperatorId::Plus), Some("add"));
//! ```

pub mod constants;
pub mod conventions;
pub mod java;
pub mod keywords;
pub mod operators;
pub mod punctuation;
