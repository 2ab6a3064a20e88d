//! Expected-result type table.
//!
//! Each query declares the host type of its expected result. The Java harness needs the boxed Java type it should
//! compare against.
//!
//! ## Examples
//! ```rust
//! use reqlgen_core::types::{self, ExpectedType};
//!
//! assert_eq!(types::from_host_name("dict"), Some(ExpectedType::Map));
//! assert_eq!(types::java_name(ExpectedType::Float), "Double");
//! ```

/// Stable identifier for an expected-result type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedType {
    Int,
    Float,
    Str,
    Bool,
    Null,
    Map,
    List,
}

/// Host spelling, Java spelling.
pub const EXPECTED_TYPES: &[(ExpectedType, &str, &str)] = &[
    (ExpectedType::Int, "int", "Integer"),
    (ExpectedType::Float, "float", "Double"),
    (ExpectedType::Str, "str", "String"),
    (ExpectedType::Bool, "bool", "Boolean"),
    (ExpectedType::Null, "NoneType", "Object"),
    (ExpectedType::Map, "dict", "Map"),
    (ExpectedType::List, "list", "List"),
];

/// Resolve a host type name.
pub fn from_host_name(name: &str) -> Option<ExpectedType> {
    EXPECTED_TYPES.iter().find(|(_, host, _)| *host == name).map(|(id, _, _)| *id)
}

/// Host spelling of an expected type.
pub fn host_name(ty: ExpectedType) -> &'static str {
    match ty {
        ExpectedType::Int => "int",
        ExpectedType::Float => "float",
        ExpectedType::Str => "str",
        ExpectedType::Bool => "bool",
        ExpectedType::Null => "NoneType",
        ExpectedType::Map => "dict",
        ExpectedType::List => "list",
    }
}

/// Java spelling of an expected type.
pub fn java_name(ty: ExpectedType) -> &'static str {
    match ty {
        ExpectedType::Int => "Integer",
        ExpectedType::Float => "Double",
        ExpectedType::Str => "String",
        ExpectedType::Bool => "Boolean",
        ExpectedType::Null => "Object",
        ExpectedType::Map => "Map",
        ExpectedType::List => "List",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_accessors() {
        for (id, host, java) in EXPECTED_TYPES {
            assert_eq!(from_host_name(host), Some(*id));
            assert_eq!(host_name(*id), *host);
            assert_eq!(java_name(*id), *java);
        }
    }

    #[test]
    fn unknown_host_type() {
        assert_eq!(from_host_name("set"), None);
    }
}
