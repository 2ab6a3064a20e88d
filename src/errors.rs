//! Define the translatability signals and the file-terminating item error.
//!
//! Emission never panics or unwinds on input it cannot render. Instead it returns one of two
//! [`Untranslatable`] kinds, and the batch driver turns either into a skip record:
//!
//! - [`Untranslatable::Unhandled`]: no rewrite rule exists for the construct. This is a grammar gap and is
//!   logged at `error`.
//! - [`Untranslatable::Skip`]: the construct is recognized and deliberately excluded for the Java target. This is
//!   expected and logged at `debug` only.
//!
//! An [`ItemError`] is different: the upstream item stream broke its contract, and processing of the current
//! file stops.

use thiserror::Error;

/// Why an expression could not be emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Untranslatable {
    /// Hard failure: no rewrite rule for this construct.
    #[error("unhandled: {0}")]
    Unhandled(String),

    /// Soft skip: intentionally unsupported for this target.
    #[error("{0}")]
    Skip(String),
}

impl Untranslatable {
    pub fn unhandled(message: impl Into<String>) -> Self {
        Untranslatable::Unhandled(message.into())
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        Untranslatable::Skip(reason.into())
    }

    /// `true` for a grammar gap, `false` for a deliberate skip.
    pub fn is_hard(&self) -> bool {
        matches!(self, Untranslatable::Unhandled(_))
    }

    /// Prefix the message with where it happened (`runopt 'x': ...`).
    pub fn context(self, context: impl std::fmt::Display) -> Self {
        match self {
            Untranslatable::Unhandled(m) => Untranslatable::Unhandled(format!("{context}: {m}")),
            Untranslatable::Skip(m) => Untranslatable::Skip(format!("{context}: {m}")),
        }
    }
}

/// Result of emitting one node.
pub type EmitResult<T = ()> = Result<T, Untranslatable>;

/// Errors that terminate processing of one item stream.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("line {line}: malformed item: {message}")]
    Malformed { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
