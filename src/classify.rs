//! Decide whether an expression's result is a DSL value.
//!
//! The decision is structural and made once per top-level expression (a definition's right-hand side, a query,
//! an expected result). It picks which emission mode the whole subtree is rendered in.
//!
//! ## Rules
//!
//! - A bare name is a DSL value iff it is in the known set.
//! - A call is a DSL value iff its callee chain (through attributes, calls and subscripts) is rooted at a known
//!   name: `r.expr(1)`, `t.get(1).update(...)`.
//! - Attribute access, subscripts, binary operations and comparisons inherit DSL-ness from their owner or left
//!   operand: `r.minval`, `t[0]`, `r.expr(1) + 2`.
//! - Everything else (literals, collections, lambdas, unary operations, comprehensions) is plain.

use reqlgen_syntax::ast::Expr;

use crate::config::ConvertConfig;

/// Insertion-ordered set of names bound to DSL values.
///
/// ## Notes
/// - The set only grows. The batch driver owns one per file and adds a name after each definition that binds a
///   DSL value; classification and emission only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DslVars {
    names: Vec<String>,
}

impl DslVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// The starting set for one file: the DSL root plus configured table variables.
    pub fn for_file(config: &ConvertConfig) -> Self {
        let mut vars = Self::new();
        vars.insert(&config.dsl_root);
        for name in &config.table_var_names {
            vars.insert(name);
        }
        vars
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Add a name; returns `false` if it was already known.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for DslVars {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vars = Self::new();
        for name in iter {
            vars.insert(name.as_ref());
        }
        vars
    }
}

/// Return `true` if `expr` evaluates to a DSL value.
pub fn is_dsl_value(expr: &Expr, vars: &DslVars) -> bool {
    match expr {
        Expr::Name(name) => vars.contains(name),
        Expr::Call(callee, _) => root_name(&callee.node).is_some_and(|name| vars.contains(name)),
        Expr::Attribute(owner, _) | Expr::Subscript(owner, _) => is_dsl_value(&owner.node, vars),
        Expr::Binary(left, _, _) | Expr::Compare(left, _) => is_dsl_value(&left.node, vars),
        Expr::Literal(_)
        | Expr::List(_)
        | Expr::Tuple(_)
        | Expr::Dict(_)
        | Expr::Lambda(..)
        | Expr::Unary(..)
        | Expr::ListComp(..) => false,
    }
}

/// Follow a callee chain down to the name it starts from.
fn root_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Name(name) => Some(name),
        Expr::Attribute(owner, _) | Expr::Call(owner, _) | Expr::Subscript(owner, _) => root_name(&owner.node),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqlgen_syntax::parse_expr;

    fn classify(source: &str, vars: &[&str]) -> bool {
        let expr = parse_expr(source).unwrap();
        let vars: DslVars = vars.iter().collect();
        is_dsl_value(&expr.node, &vars)
    }

    #[test]
    fn names_follow_the_known_set() {
        assert!(classify("r", &["r"]));
        assert!(classify("tbl", &["r", "tbl"]));
        assert!(!classify("tbl", &["r"]));
    }

    #[test]
    fn calls_follow_their_root() {
        assert!(classify("r.expr(1)", &["r"]));
        assert!(classify("t.get(1).update({'a': 1})", &["t"]));
        assert!(classify("t[0].count()", &["t"]));
        assert!(!classify("len(x)", &["r"]));
        assert!(!classify("'abc'.upper()", &["r"]));
    }

    #[test]
    fn dsl_ness_propagates_left_to_right() {
        assert!(classify("r.expr(1) + 2", &["r"]));
        assert!(classify("r.expr(1) < 2", &["r"]));
        assert!(classify("r.expr([1, 2])[0]", &["r"]));
        assert!(classify("r.minval", &["r"]));
        assert!(!classify("1 + r.expr(2)", &["r"]));
    }

    #[test]
    fn literals_and_collections_are_plain() {
        for source in ["1", "'a'", "[r.expr(1)]", "{'a': r.expr(1)}", "lambda x: r.expr(x)", "-r.expr(1)"] {
            assert!(!classify(source, &["r"]), "{source}");
        }
    }

    #[test]
    fn set_is_insertion_ordered_and_monotonic() {
        let config = ConvertConfig::new().with_table_var_names(["tbl", "r", "tbl2"]);
        let mut vars = DslVars::for_file(&config);
        assert_eq!(vars.iter().collect::<Vec<_>>(), vec!["r", "tbl", "tbl2"]);
        assert!(vars.insert("t"));
        assert!(!vars.insert("t"));
        assert_eq!(vars.len(), 4);
    }
}
