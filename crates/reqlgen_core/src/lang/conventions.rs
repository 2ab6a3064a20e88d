//! DSL conventions (well-known identifiers and fixed method names).

/// Default DSL root variable.
pub const DEFAULT_DSL_ROOT: &str = "r";

/// Default declared type of a definition bound to a DSL value.
pub const DEFAULT_DSL_TYPE: &str = "ReqlAst";

/// Default declared type of a definition bound to a plain value.
pub const DEFAULT_OPAQUE_TYPE: &str = "Object";

/// DSL method for `value[index]`.
pub const BRACKET_METHOD: &str = "bracket";

/// DSL method for `value[lower:upper]`.
pub const SLICE_METHOD: &str = "slice";

/// Bound used when a slice omits its lower end.
pub const SLICE_DEFAULT_LOWER: i128 = 0;

/// Bound used when a slice omits its upper end.
pub const SLICE_DEFAULT_UPPER: i128 = -1;

/// Callee suffix identifying a range-like call in a list comprehension (`range`, `xrange`).
pub const RANGE_CALL_SUFFIX: &str = "range";

/// Host member names that clash with host keywords and carry a trailing underscore there.
///
/// Their Java names are fixed and bypass the naming transform.
pub const MEMBER_CLASHES: &[(&str, &str)] = &[("or_", "or"), ("and_", "and")];

/// Members of the DSL root the Java driver deliberately does not support.
pub const UNSUPPORTED_ROOT_MEMBERS: &[&str] = &["row"];

/// Resolve a host member name that has a fixed Java spelling.
pub fn clash_spelling(member: &str) -> Option<&'static str> {
    MEMBER_CLASHES.iter().find(|(host, _)| *host == member).map(|(_, java)| *java)
}

/// Check whether `root.member` is a deliberately unsupported accessor.
pub fn is_unsupported_root_member(member: &str) -> bool {
    UNSUPPORTED_ROOT_MEMBERS.contains(&member)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clash_table() {
        assert_eq!(clash_spelling("or_"), Some("or"));
        assert_eq!(clash_spelling("and_"), Some("and"));
        assert_eq!(clash_spelling("not_"), None);
    }

    #[test]
    fn row_is_unsupported() {
        assert!(is_unsupported_root_member("row"));
        assert!(!is_unsupported_root_member("table"));
    }
}
