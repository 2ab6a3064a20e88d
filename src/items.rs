//! Decode the structured test-item stream.
//!
//! Items arrive as JSON lines, one object per line, tagged by `kind`:
//!
//! ```text
//! {"kind": "def", "name": "t", "source": "t = r.table('x')", "testfile": "sindex/api", "test_num": 1}
//! {"kind": "query", "query": "t.count()", "expected": "0", "expected_type": "int", "expected_bif": 0}
//! {"kind": "skip", "line": "r.js('1')", "reason": "uses JavaScript"}
//! ```
//!
//! Every expression is parsed here, so the driver only ever sees trees. A line the syntax frontend rejects is not
//! a contract violation: it becomes a pre-flagged skip and the diagnostic is logged. A JSON line that is not one
//! of the three shapes, or names an unknown expected type, is [`ItemError::Malformed`] and ends the stream.

use std::collections::BTreeMap;
use std::io::BufRead;

use reqlgen_core::types::{self, ExpectedType};
use reqlgen_syntax::ast::{Expr, Spanned, Statement};
use reqlgen_syntax::diagnostics::{CompileError, format_error};
use reqlgen_syntax::{parse_expr, parse_line};
use serde::Deserialize;

use crate::errors::ItemError;
use crate::records::Provenance;

/// Wire shape of one item.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawItem {
    Def {
        /// Bound variable; taken from the assignment target when omitted
        #[serde(default)]
        name: Option<String>,
        source: String,
        #[serde(flatten)]
        provenance: Provenance,
    },
    Query {
        query: String,
        expected: String,
        expected_type: String,
        #[serde(default)]
        expected_bif: serde_json::Value,
        #[serde(default)]
        runopts: Option<BTreeMap<String, String>>,
        #[serde(flatten)]
        provenance: Provenance,
    },
    Skip {
        line: String,
        reason: String,
    },
}

/// A source line together with its parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpr {
    pub source: String,
    pub expr: Spanned<Expr>,
}

/// One decoded test item.
#[derive(Debug, Clone, PartialEq)]
pub enum TestItem {
    Def {
        /// Variable the definition binds; `None` when the assignment has no single name target, which the
        /// emitter refuses
        name: Option<String>,
        source: String,
        statement: Statement,
        provenance: Provenance,
    },
    Query {
        query: ParsedExpr,
        expected: ParsedExpr,
        expected_type: ExpectedType,
        expected_bif: serde_json::Value,
        runopts: Option<Vec<(String, ParsedExpr)>>,
        provenance: Provenance,
    },
    Skip {
        line: String,
        reason: String,
    },
}

/// Outcome of parsing one host line: the tree, or the skip item that replaces the whole test.
type Parsed<T> = Result<T, TestItem>;

impl TestItem {
    /// Parse the expressions of a raw item.
    ///
    /// `file_id` only labels diagnostics. `line` is the 1-based position of the item in its stream.
    pub fn from_raw(raw: RawItem, file_id: &str, line: usize) -> Result<TestItem, ItemError> {
        match raw {
            RawItem::Def {
                name,
                source,
                provenance,
            } => {
                let statement = match parse_line(&source) {
                    Ok(statement) => statement,
                    Err(errors) => return Ok(syntax_skip(file_id, &source, &errors)),
                };
                let (name, statement) =
                    bind_definition(name, statement).map_err(|message| ItemError::Malformed { line, message })?;
                Ok(TestItem::Def {
                    name,
                    source,
                    statement,
                    provenance,
                })
            }
            RawItem::Query {
                query,
                expected,
                expected_type,
                expected_bif,
                runopts,
                provenance,
            } => {
                let expected_type = types::from_host_name(&expected_type).ok_or_else(|| ItemError::Malformed {
                    line,
                    message: format!("unknown expected type `{expected_type}`"),
                })?;
                let query = QueryLines {
                    query,
                    expected,
                    runopts,
                };
                Ok(match query.parse(file_id) {
                    Ok((query, expected, runopts)) => TestItem::Query {
                        query,
                        expected,
                        expected_type,
                        expected_bif,
                        runopts,
                        provenance,
                    },
                    Err(skip) => skip,
                })
            }
            RawItem::Skip { line, reason } => Ok(TestItem::Skip { line, reason }),
        }
    }
}

/// The host lines of one query item.
struct QueryLines {
    query: String,
    expected: String,
    runopts: Option<BTreeMap<String, String>>,
}

type ParsedQuery = (ParsedExpr, ParsedExpr, Option<Vec<(String, ParsedExpr)>>);

impl QueryLines {
    fn parse(self, file_id: &str) -> Parsed<ParsedQuery> {
        let query = parse_one(file_id, self.query)?;
        let expected = parse_one(file_id, self.expected)?;
        let runopts = match self.runopts {
            Some(options) => Some(
                options
                    .into_iter()
                    .map(|(key, value)| Ok((key, parse_one(file_id, value)?)))
                    .collect::<Parsed<Vec<_>>>()?,
            ),
            None => None,
        };
        Ok((query, expected, runopts))
    }
}

fn parse_one(file_id: &str, source: String) -> Parsed<ParsedExpr> {
    match parse_expr(&source) {
        Ok(expr) => Ok(ParsedExpr { source, expr }),
        Err(errors) => Err(syntax_skip(file_id, &source, &errors)),
    }
}

fn syntax_skip(file_id: &str, source: &str, errors: &[CompileError]) -> TestItem {
    let rendered: String = errors.iter().map(|e| format_error(file_id, source, e)).collect();
    tracing::warn!(file = file_id, line = source, "could not parse test line\n{}", rendered.trim_end());
    let reason = errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "syntax error".to_string());
    TestItem::Skip {
        line: source.to_string(),
        reason,
    }
}

/// Pair a definition with the name it binds.
///
/// A bare expression is wrapped as an assignment to `name`. An assignment binds its own target, and an item
/// `name` that disagrees with it is malformed. Other assignment shapes (`a = b = x`, `x[0] = 1`) pass through
/// unbound so emission can refuse them item by item.
fn bind_definition(name: Option<String>, statement: Statement) -> Result<(Option<String>, Statement), String> {
    match statement {
        Statement::Assign { targets, value } => {
            let bound = match targets.as_slice() {
                [
                    Spanned {
                        node: Expr::Name(target),
                        ..
                    },
                ] => Some(target.clone()),
                _ => None,
            };
            if let (Some(name), Some(target)) = (&name, &bound) {
                if name != target {
                    return Err(format!("definition is named `{name}` but assigns `{target}`"));
                }
            }
            Ok((bound, Statement::Assign { targets, value }))
        }
        Statement::Expr(value) => {
            let Some(name) = name else {
                return Err("definition of a bare expression has no name".to_string());
            };
            let target = Spanned::new(Expr::Name(name.clone()), value.span);
            Ok((
                Some(name),
                Statement::Assign {
                    targets: vec![target],
                    value,
                },
            ))
        }
    }
}

/// Lazily decode a JSON-lines item stream.
///
/// Blank lines are ignored. The reader stops after the first error.
pub struct ItemReader<R> {
    file_id: String,
    lines: std::io::Lines<R>,
    line: usize,
    done: bool,
}

impl<R: BufRead> ItemReader<R> {
    pub fn new(file_id: impl Into<String>, reader: R) -> Self {
        Self {
            file_id: file_id.into(),
            lines: reader.lines(),
            line: 0,
            done: false,
        }
    }

    fn decode(&self, text: &str) -> Result<TestItem, ItemError> {
        let raw: RawItem = serde_json::from_str(text).map_err(|e| ItemError::Malformed {
            line: self.line,
            message: e.to_string(),
        })?;
        TestItem::from_raw(raw, &self.file_id, self.line)
    }
}

impl<R: BufRead> Iterator for ItemReader<R> {
    type Item = Result<TestItem, ItemError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => {
                    self.done = true;
                    return Some(Err(ItemError::Io(e)));
                }
            };
            self.line += 1;
            if text.trim().is_empty() {
                continue;
            }
            let item = self.decode(&text);
            self.done = item.is_err();
            return Some(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Vec<Result<TestItem, ItemError>> {
        ItemReader::new("test", input.as_bytes()).collect()
    }

    #[test]
    fn decodes_all_three_shapes() {
        let input = r#"
{"kind": "def", "source": "t = r.table('x')", "testfile": "a/b", "test_num": 1}
{"kind": "query", "query": "t.count()", "expected": "0", "expected_type": "int", "expected_bif": 0}

{"kind": "skip", "line": "r.js('1')", "reason": "no js"}
"#;
        let items = read(input);
        assert_eq!(items.len(), 3);
        let Ok(TestItem::Def { name, provenance, .. }) = &items[0] else {
            panic!("expected def, got {:?}", items[0]);
        };
        assert_eq!(name.as_deref(), Some("t"));
        assert_eq!(provenance.testfile, "a/b");
        let Ok(TestItem::Query {
            expected_type, runopts, ..
        }) = &items[1]
        else {
            panic!("expected query, got {:?}", items[1]);
        };
        assert_eq!(*expected_type, ExpectedType::Int);
        assert!(runopts.is_none());
        assert!(matches!(&items[2], Ok(TestItem::Skip { reason, .. }) if reason == "no js"));
    }

    #[test]
    fn bare_definition_binds_its_name() {
        let items = read(r#"{"kind": "def", "name": "tbl", "source": "r.db('test').table('t')"}"#);
        let Ok(TestItem::Def { name, statement, .. }) = &items[0] else {
            panic!("expected def, got {:?}", items[0]);
        };
        assert_eq!(name.as_deref(), Some("tbl"));
        let Statement::Assign { targets, .. } = statement else {
            panic!("expected assignment");
        };
        assert_eq!(targets[0].node, Expr::Name("tbl".to_string()));
    }

    #[test]
    fn syntax_errors_become_skips() {
        let items = read(r#"{"kind": "query", "query": "r.expr(1 if x else 2)", "expected": "1", "expected_type": "int"}"#);
        let Ok(TestItem::Skip { line, reason }) = &items[0] else {
            panic!("expected skip, got {:?}", items[0]);
        };
        assert_eq!(line, "r.expr(1 if x else 2)");
        assert!(reason.contains("not supported"), "{reason}");
    }

    #[test]
    fn malformed_line_ends_the_stream() {
        let input = "{\"kind\": \"bogus\"}\n{\"kind\": \"skip\", \"line\": \"x\", \"reason\": \"y\"}\n";
        let items = read(input);
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(ItemError::Malformed { line: 1, .. })));
    }

    #[test]
    fn unknown_expected_type_is_malformed() {
        let items = read(r#"{"kind": "query", "query": "r.expr(1)", "expected": "1", "expected_type": "set"}"#);
        assert!(matches!(&items[0], Err(ItemError::Malformed { message, .. }) if message.contains("set")));
    }

    #[test]
    fn unnamed_bare_definition_is_malformed() {
        let items = read(r#"{"kind": "def", "source": "r.expr(1)"}"#);
        assert!(matches!(items[0], Err(ItemError::Malformed { .. })));
    }

    #[test]
    fn name_must_match_assignment_target() {
        let items = read(r#"{"kind": "def", "name": "u", "source": "t = r.table('x')"}"#);
        assert!(
            matches!(&items[0], Err(ItemError::Malformed { line: 1, message }) if message.contains("`u`") && message.contains("`t`")),
            "{:?}",
            items[0]
        );

        let items = read(r#"{"kind": "def", "name": "t", "source": "t = r.table('x')"}"#);
        assert!(matches!(&items[0], Ok(TestItem::Def { name: Some(name), .. }) if name == "t"));
    }

    #[test]
    fn multi_target_assignment_stays_a_definition() {
        let input = r#"
{"kind": "def", "source": "a = b = r.table('x')"}
{"kind": "def", "name": "x", "source": "x[0] = 1"}
"#;
        let items = read(input);
        assert_eq!(items.len(), 2);
        for item in &items {
            assert!(matches!(item, Ok(TestItem::Def { name: None, .. })), "{item:?}");
        }
    }
}
