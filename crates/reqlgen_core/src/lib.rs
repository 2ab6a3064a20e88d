//! Provide the fixed lexical tables shared by the reqlgen syntax frontend and emitter.
//!
//! Every table in this crate is part of the output contract: the Java test harness compiles what the emitter
//! writes, so spellings here must stay byte-for-byte stable.
//!
//! ## Notes
//!
//! - This is a pure vocabulary crate: **no IO**, no global mutable state, and no AST types.
//! - The syntax frontend uses [`lang::keywords`] and [`lang::operators`] for token identity; the emitter uses the
//!   target-side tables ([`lang::java`], [`naming`], [`strings`], [`types`]).
//!
//! ## Examples
//! ```rust
//! use reqlgen_core::naming::dromedary;
//!
//! assert_eq!(dromedary("to_iso8601"), "toIso8601");
//! ```

pub mod lang;
pub mod naming;
pub mod strings;
pub mod types;
