#![forbid(unsafe_code)]
//! reqlgen: convert host-language driver tests into Java driver tests
//!
//! Test lines are host-language expressions (`r.expr([1, 2])[0]`, `t = r.table('x')`). This crate classifies
//! each line as a DSL value or a plain value and emits the matching Java: fluent method chains on the DSL root
//! (`r.expr(Arrays.asList(1, 2)).bracket(0)`) or ordinary Java values.
//!
//! The syntax frontend lives in `reqlgen_syntax`, and the lexical tables (operators, Java reserved words, naming
//! conventions) in `reqlgen_core`.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Untranslatable input**: never panics. Emission returns [`errors::Untranslatable`] and the driver turns it
//!   into a skip record.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod classify;
pub mod cli;
pub mod config;
pub mod convert;
pub mod emit;
pub mod errors;
pub mod items;
pub mod records;

pub use classify::{DslVars, is_dsl_value};
pub use config::ConvertConfig;
pub use convert::{Converter, FileOutput, convert_file, run_batch};
pub use emit::{Mode, emit_expr, emit_statement};
pub use errors::{ItemError, Untranslatable};
pub use items::{ItemReader, TestItem};
pub use records::{Provenance, Record, SkipCause, Version};
