//! Operator vocabulary and its two target renderings.
//!
//! Each operator has one host spelling and up to three target spellings:
//! - `java_infix`: the symbol used when both operands are plain Java values (`a + b`),
//! - `java_prefix`: the symbol used for the unary form (`-a`, `!a`),
//! - `dsl_method`: the method on the DSL root that replaces the operator for DSL values (`r.add(a, b)`).
//!
//! An operator with no rendering for the current mode is untranslatable; callers turn a `None` into a hard failure.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and only covers symbol spellings; word operators (`not`, `in`,
//!   `is`) come from [`crate::lang::keywords`] and are mapped by the parser.
//! - `**` has no infix form in Java. The emitter rewrites it as a call (see
//!   [`crate::lang::java::POW_FUNCTION`]).
//!
//! ## Examples
//! ```rust
//! use reqlgen_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::java_infix(OperatorId::Percent), Some("%"));
//! assert_eq!(operators::dsl_method(OperatorId::Pipe), Some("or"));
//! assert_eq!(operators::dsl_method(OperatorId::StarStar), None);
//! ```

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,
    At,

    // Bitwise
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    NotIn,
    Is,
    IsNot,

    // Logical
    Not,

    // Assignment
    Eq,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub java_infix: Option<&'static str>,
    pub java_prefix: Option<&'static str>,
    pub dsl_method: Option<&'static str>,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Plus, "+", Some("+"), Some("+"), Some("add")),
    op(OperatorId::Minus, "-", Some("-"), Some("-"), Some("sub")),
    op(OperatorId::Star, "*", Some("*"), None, Some("mul")),
    op(OperatorId::StarStar, "**", None, None, None),
    op(OperatorId::Slash, "/", Some("/"), None, Some("div")),
    op(OperatorId::SlashSlash, "//", None, None, None),
    op(OperatorId::Percent, "%", Some("%"), None, Some("mod")),
    op(OperatorId::At, "@", None, None, None),
    op(OperatorId::Amp, "&", None, None, Some("and")),
    op(OperatorId::Pipe, "|", None, None, Some("or")),
    op(OperatorId::Caret, "^", None, None, None),
    op(OperatorId::Tilde, "~", None, Some("~"), None),
    op(OperatorId::Shl, "<<", None, None, None),
    op(OperatorId::Shr, ">>", None, None, None),
    op(OperatorId::EqEq, "==", None, None, Some("eq")),
    op(OperatorId::NotEq, "!=", None, None, Some("ne")),
    op(OperatorId::Lt, "<", None, None, Some("lt")),
    op(OperatorId::LtEq, "<=", None, None, Some("le")),
    op(OperatorId::Gt, ">", None, None, Some("gt")),
    op(OperatorId::GtEq, ">=", None, None, Some("ge")),
    op(OperatorId::In, "in", None, None, None),
    op(OperatorId::NotIn, "not in", None, None, None),
    op(OperatorId::Is, "is", None, None, None),
    op(OperatorId::IsNot, "is not", None, None, None),
    op(OperatorId::Not, "not", None, Some("!"), None),
    op(OperatorId::Eq, "=", None, None, None),
];

/// Lookup metadata for an operator.
///
/// ## Notes
/// - Returns `None` only if [`OPERATORS`] is missing an entry for `id`.
pub fn info_for(id: OperatorId) -> Option<&'static OperatorInfo> {
    OPERATORS.iter().find(|o| o.id == id)
}

/// Resolve a symbol spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Return the host spelling of an operator (used in diagnostics).
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).map_or("?", |o| o.spelling)
}

/// Java infix symbol for plain-value operands, if Java has one.
pub fn java_infix(id: OperatorId) -> Option<&'static str> {
    info_for(id).and_then(|o| o.java_infix)
}

/// Java prefix symbol for the unary form, if Java has one.
pub fn java_prefix(id: OperatorId) -> Option<&'static str> {
    info_for(id).and_then(|o| o.java_prefix)
}

/// DSL root method replacing this operator for DSL operands.
pub fn dsl_method(id: OperatorId) -> Option<&'static str> {
    info_for(id).and_then(|o| o.dsl_method)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    java_infix: Option<&'static str>,
    java_prefix: Option<&'static str>,
    dsl_method: Option<&'static str>,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        java_infix,
        java_prefix,
        dsl_method,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_unique_ids_and_spellings() {
        for (i, a) in OPERATORS.iter().enumerate() {
            for b in &OPERATORS[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate id {:?}", a.id);
                assert_ne!(a.spelling, b.spelling, "duplicate spelling {}", a.spelling);
            }
        }
    }

    #[test]
    fn spelling_lookup_round_trips() {
        for o in OPERATORS {
            assert_eq!(from_str(o.spelling), Some(o.id));
            assert_eq!(as_str(o.id), o.spelling);
        }
    }

    #[test]
    fn dsl_arithmetic_and_bitwise_table() {
        let table = [
            (OperatorId::Plus, "add"),
            (OperatorId::Minus, "sub"),
            (OperatorId::Star, "mul"),
            (OperatorId::Slash, "div"),
            (OperatorId::Percent, "mod"),
            (OperatorId::Amp, "and"),
            (OperatorId::Pipe, "or"),
        ];
        for (id, method) in table {
            assert_eq!(dsl_method(id), Some(method));
        }
    }

    #[test]
    fn dsl_comparison_table() {
        let table = [
            (OperatorId::Lt, "lt"),
            (OperatorId::Gt, "gt"),
            (OperatorId::GtEq, "ge"),
            (OperatorId::LtEq, "le"),
            (OperatorId::EqEq, "eq"),
            (OperatorId::NotEq, "ne"),
        ];
        for (id, method) in table {
            assert_eq!(dsl_method(id), Some(method));
        }
        assert_eq!(dsl_method(OperatorId::In), None);
    }

    #[test]
    fn plain_tables_only_cover_java_operators() {
        assert_eq!(java_infix(OperatorId::Amp), None);
        assert_eq!(java_infix(OperatorId::SlashSlash), None);
        assert_eq!(java_prefix(OperatorId::Not), Some("!"));
        assert_eq!(java_prefix(OperatorId::Tilde), Some("~"));
        assert_eq!(java_prefix(OperatorId::Star), None);
    }
}
