//! Conversion configuration.
//!
//! Defaults reproduce the Java driver's generated test suite. Everything the emitter spells that depends on the
//! target driver (root variable, declared types) is read from here rather than hard-coded at the use site.

use reqlgen_core::lang::conventions::{DEFAULT_DSL_ROOT, DEFAULT_DSL_TYPE, DEFAULT_OPAQUE_TYPE};

/// Test files never converted: they only make sense for the host driver, run twice, or check arity that Java
/// enforces at compile time.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "regression/1133",
    "regression/767",
    "regression/1005",
    "changefeeds/squash",
    "arity",
];

/// Conversion configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// DSL root variable; always a known DSL value and the receiver of rewritten operators
    pub dsl_root: String,
    /// Declared type of definitions bound to DSL values
    pub dsl_type: String,
    /// Declared type of definitions bound to plain values
    pub opaque_type: String,
    /// Names bound to DSL tables before the first item of every file
    pub table_var_names: Vec<String>,
    /// Test file ids starting with any of these are skipped entirely
    pub exclusions: Vec<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            dsl_root: DEFAULT_DSL_ROOT.to_string(),
            dsl_type: DEFAULT_DSL_TYPE.to_string(),
            opaque_type: DEFAULT_OPAQUE_TYPE.to_string(),
            table_var_names: Vec::new(),
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ConvertConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the DSL root variable
    pub fn with_dsl_root(mut self, root: impl Into<String>) -> Self {
        self.dsl_root = root.into();
        self
    }

    /// Set the declared DSL and opaque types
    pub fn with_types(mut self, dsl_type: impl Into<String>, opaque_type: impl Into<String>) -> Self {
        self.dsl_type = dsl_type.into();
        self.opaque_type = opaque_type.into();
        self
    }

    /// Set the table variable names known to be DSL values up front
    pub fn with_table_var_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table_var_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the exclusion list
    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = exclusions.into_iter().map(Into::into).collect();
        self
    }

    /// Return `true` if a test file id starts with an exclusion.
    pub fn is_excluded(&self, file_id: &str) -> bool {
        self.exclusions.iter().any(|e| file_id.starts_with(e.as_str()))
    }

    /// Split a table-variable header, which may be space and/or comma separated (`"tbl, tbl2"`, `"a b"`).
    ///
    /// Duplicates are dropped; first occurrence wins.
    pub fn parse_table_var_names(raw: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in raw.split([',', ' ']).filter(|s| !s.is_empty()) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_java_driver() {
        let config = ConvertConfig::default();
        assert_eq!(config.dsl_root, "r");
        assert_eq!(config.dsl_type, "ReqlAst");
        assert_eq!(config.opaque_type, "Object");
        assert!(config.table_var_names.is_empty());
        assert_eq!(config.exclusions.len(), 5);
    }

    #[test]
    fn test_exclusions_match_prefixes() {
        let config = ConvertConfig::new();
        assert!(config.is_excluded("regression/1133"));
        assert!(config.is_excluded("arity/args"));
        assert!(!config.is_excluded("polyglot/arity"));
        assert!(!config.is_excluded("regression/1134"));
        assert!(!ConvertConfig::new().with_exclusions(Vec::<String>::new()).is_excluded("arity"));
    }

    #[test]
    fn test_parse_table_var_names() {
        assert_eq!(ConvertConfig::parse_table_var_names("tbl, tbl2"), vec!["tbl", "tbl2"]);
        assert_eq!(ConvertConfig::parse_table_var_names("a b,,c  a"), vec!["a", "b", "c"]);
        assert!(ConvertConfig::parse_table_var_names("").is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let config = ConvertConfig::new()
            .with_dsl_root("q")
            .with_types("Expr", "Any")
            .with_table_var_names(["t"]);
        assert_eq!(config.dsl_root, "q");
        assert_eq!(config.dsl_type, "Expr");
        assert_eq!(config.opaque_type, "Any");
        assert_eq!(config.table_var_names, vec!["t"]);
    }
}
