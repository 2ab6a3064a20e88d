//! Boolean and null constant spellings.
//!
//! The host grammar spells its constants `True`, `False` and `None`; some producers also write `nil`. All of them
//! map to the Java literals `true`, `false` and `null`.

/// Host spelling to Java spelling, in lookup order.
pub const CONSTANT_SPELLINGS: &[(&str, &str)] = &[("True", "true"), ("False", "false"), ("None", "null"), ("nil", "null")];

/// Java spelling of `null`.
pub const JAVA_NULL: &str = "null";

/// Return the Java spelling of a host constant name, if `name` is one.
///
/// ## Examples
/// ```rust
/// use reqlgen_core::lang::constants::java_spelling;
///
/// assert_eq!(java_spelling("nil"), Some("null"));
/// assert_eq!(java_spelling("table"), None);
/// ```
pub fn java_spelling(name: &str) -> Option<&'static str> {
    CONSTANT_SPELLINGS.iter().find(|(host, _)| *host == name).map(|(_, java)| *java)
}

/// Return the Java spelling of a boolean.
pub fn java_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
