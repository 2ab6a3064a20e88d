//! Emission records: the output side of the batch driver.
//!
//! Every record keeps the original host line next to its Java rendering so the rendering collaborator can print
//! both (the original as a comment, the Java as code). Records serialize to JSON, one object per record, tagged
//! by `kind`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::Untranslatable;

/// A host line and its Java rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub original: String,
    pub java: String,
}

impl Version {
    pub fn new(original: impl Into<String>, java: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            java: java.into(),
        }
    }
}

/// Where an item came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(default)]
    pub testfile: String,
    #[serde(default)]
    pub test_num: u32,
}

/// Why an item ended up as a skip record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipCause {
    /// No rewrite rule for some construct in the item
    Unhandled,
    /// A construct deliberately unsupported for Java
    Unsupported,
    /// Flagged upstream, or rejected by the syntax frontend
    Preflagged,
}

impl From<&Untranslatable> for SkipCause {
    fn from(err: &Untranslatable) -> Self {
        match err {
            Untranslatable::Unhandled(_) => SkipCause::Unhandled,
            Untranslatable::Skip(_) => SkipCause::Unsupported,
        }
    }
}

/// One unit of converted output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    /// A variable definition, e.g. `ReqlAst t = r.table("x");`
    Def {
        line: Version,
        #[serde(flatten)]
        provenance: Provenance,
    },
    /// A query and the value it is expected to produce.
    Query {
        line: Version,
        expected_line: Version,
        /// Boxed Java type of the expected value
        expected_type: String,
        /// Upstream's evaluated expected value, passed through untouched
        expected_bif: serde_json::Value,
        /// Per-query run options rendered as plain Java values
        #[serde(skip_serializing_if = "Option::is_none")]
        runopts: Option<BTreeMap<String, String>>,
        #[serde(flatten)]
        provenance: Provenance,
    },
    /// Something that could not (or should not) be converted.
    Skip {
        line: String,
        reason: String,
        cause: SkipCause,
    },
}

impl Record {
    /// Skip record for an item that failed to emit.
    pub fn skipped(line: impl Into<String>, err: &Untranslatable) -> Self {
        Record::Skip {
            line: line.into(),
            reason: err.to_string(),
            cause: SkipCause::from(err),
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Record::Skip { .. })
    }

    /// Java text of a definition or query, if any.
    pub fn java(&self) -> Option<&str> {
        match self {
            Record::Def { line, .. } | Record::Query { line, .. } => Some(&line.java),
            Record::Skip { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn def_serializes_flat() {
        let record = Record::Def {
            line: Version::new("t = r.table('x')", "ReqlAst t = r.table(\"x\");"),
            provenance: Provenance {
                testfile: "sindex/api".to_string(),
                test_num: 3,
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "def");
        assert_eq!(json["line"]["java"], "ReqlAst t = r.table(\"x\");");
        assert_eq!(json["testfile"], "sindex/api");
        assert_eq!(json["test_num"], 3);
    }

    #[test]
    fn skip_records_name_their_cause() {
        let record = Record::skipped("r.row", &Untranslatable::skip("Java driver doesn't support r.row"));
        assert!(record.is_skip());
        assert_eq!(record.java(), None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["cause"], "unsupported");
        assert_eq!(json["reason"], "Java driver doesn't support r.row");
    }

    #[test]
    fn absent_runopts_are_omitted() {
        let record = Record::Query {
            line: Version::new("r.expr(1)", "r.expr(1)"),
            expected_line: Version::new("1", "1"),
            expected_type: "Integer".to_string(),
            expected_bif: serde_json::json!(1),
            runopts: None,
            provenance: Provenance::default(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("runopts").is_none());
        assert_eq!(json["expected_type"], "Integer");
    }
}
