//! Java target vocabulary: reserved words, inherited `Object` methods, and the fixed runtime spellings the
//! emitter writes.
//!
//! A DSL member name that collides with either [`JAVA_KEYWORDS`] or [`OBJECT_METHODS`] cannot be used as a method
//! name in the Java driver, so the driver appends [`ESCAPE_SUFFIX`] to it (`r.table(..).default_(..)`). The emitter
//! must do the same.
//!
//! ## Examples
//! ```rust
//! use reqlgen_core::lang::java;
//!
//! assert!(java::needs_escape("default"));
//! assert!(java::needs_escape("toString"));
//! assert_eq!(java::escape_member("do"), "do_");
//! assert_eq!(java::escape_member("filter"), "filter");
//! ```

/// Reserved words and literals of the Java language.
pub const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const", "continue", "default",
    "do", "double", "else", "enum", "extends", "final", "finally", "float", "for", "goto", "if", "implements",
    "import", "instanceof", "int", "interface", "long", "native", "new", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "false", "null", "true",
];

/// Methods every Java object inherits from `java.lang.Object`.
pub const OBJECT_METHODS: &[&str] = &[
    "clone",
    "equals",
    "finalize",
    "getClass",
    "hashCode",
    "notify",
    "notifyAll",
    "toString",
    "wait",
];

/// Suffix appended to member names that would clash in Java.
pub const ESCAPE_SUFFIX: &str = "_";

/// Largest value of a Java `int`; integer literals beyond it are widened.
pub const INT_MAX: i128 = 2_147_483_647;

/// Suffix that turns an integer literal into a `double` literal.
pub const WIDE_INT_SUFFIX: &str = ".0";

/// Fixed-size list constructor for list and tuple literals.
pub const LIST_CONSTRUCTOR: &str = "Arrays.asList";

/// Empty map seed for dict literals.
pub const MAP_CONSTRUCTOR: &str = "new MapObject()";

/// Builder method adding one entry to a [`MAP_CONSTRUCTOR`] chain.
pub const MAP_WITH_METHOD: &str = "with";

/// Trailer method carrying one keyword argument.
pub const OPT_ARG_METHOD: &str = "optArg";

/// Power function replacing `**`.
pub const POW_FUNCTION: &str = "Math.pow";

/// Suffix turning a string literal into UTF-8 bytes.
pub const BYTES_SUFFIX: &str = ".getBytes(StandardCharsets.UTF_8)";

/// Boxed integer range stream constructor used for `range` comprehensions.
pub const RANGE_STREAM: &str = "IntStream.range";

/// Call that boxes an [`RANGE_STREAM`] so it can be mapped to objects.
pub const BOXED_SUFFIX: &str = ".boxed()";

/// Terminal stream operation of a comprehension.
pub const COLLECT_SUFFIX: &str = ".collect(Collectors.toList())";

/// Lambda arrow, with surrounding spaces.
pub const LAMBDA_ARROW: &str = " -> ";

/// Check whether an identifier is a Java reserved word or literal.
pub fn is_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// Check whether an identifier names an inherited `Object` method.
pub fn is_object_method(name: &str) -> bool {
    OBJECT_METHODS.contains(&name)
}

/// Check whether a member name must be escaped.
pub fn needs_escape(name: &str) -> bool {
    is_keyword(name) || is_object_method(name)
}

/// Append [`ESCAPE_SUFFIX`] to `name` if it would clash in Java.
pub fn escape_member(name: &str) -> String {
    if needs_escape(name) {
        format!("{name}{ESCAPE_SUFFIX}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_dsl_clashes_are_escaped() {
        for name in ["default", "do", "or", "and", "not", "equals", "getClass"] {
            // `or`/`and`/`not` are not Java keywords
            let expected = if matches!(name, "or" | "and" | "not") {
                name.to_string()
            } else {
                format!("{name}_")
            };
            assert_eq!(escape_member(name), expected, "{name}");
        }
    }

    #[test]
    fn literals_count_as_keywords() {
        assert!(is_keyword("null"));
        assert!(is_keyword("true"));
        assert!(!is_keyword("None"));
    }
}
