//! The batch driver: turn item streams into record streams.
//!
//! One [`Converter`] handles one file. It owns that file's [`DslVars`] and grows it after every definition whose
//! right-hand side is a DSL value, so later items see earlier bindings. Nothing else mutates the set.
//!
//! ## Failure granularity
//! - One definition, query or run option failing to emit turns only its own item into a skip record.
//! - An [`ItemError`] from the input stream ends the file; the converter yields it once and then fuses.

use std::collections::BTreeMap;
use std::time::Instant;

use reqlgen_core::types;

use crate::classify::DslVars;
use crate::config::ConvertConfig;
use crate::emit::{Mode, emit_expr, emit_statement};
use crate::errors::{EmitResult, ItemError, Untranslatable};
use crate::items::{ParsedExpr, TestItem};
use crate::records::{Record, SkipCause, Version};

/// Lazily convert one file's items.
pub struct Converter<'c, I> {
    items: I,
    vars: DslVars,
    config: &'c ConvertConfig,
    done: bool,
}

impl<'c, I> Converter<'c, I>
where
    I: Iterator<Item = Result<TestItem, ItemError>>,
{
    pub fn new(items: I, config: &'c ConvertConfig) -> Self {
        Self {
            items,
            vars: DslVars::for_file(config),
            config,
            done: false,
        }
    }

    /// The names known to be DSL values so far.
    pub fn vars(&self) -> &DslVars {
        &self.vars
    }

    /// Convert one item, updating the known-DSL set on a successful DSL definition.
    pub fn convert_item(&mut self, item: TestItem) -> Record {
        match item {
            TestItem::Def {
                name,
                source,
                statement,
                provenance,
            } => {
                let _span = tracing::debug_span!("def", line = %source).entered();
                let mode = Mode::for_expr(&statement.value().node, &self.vars);
                match emit_statement(&statement, mode, &self.vars, self.config) {
                    Ok(java) => {
                        if let (Mode::Dsl, Some(name)) = (mode, name.as_deref()) {
                            if self.vars.insert(name) {
                                tracing::debug!(name = %name, "bound DSL variable");
                            }
                        }
                        Record::Def {
                            line: Version::new(source, java),
                            provenance,
                        }
                    }
                    Err(err) => Record::skipped(source, &err),
                }
            }
            TestItem::Query {
                query,
                expected,
                expected_type,
                expected_bif,
                runopts,
                provenance,
            } => {
                let _span = tracing::debug_span!("query", line = %query.source).entered();
                let emitted = self.emit_query(&query, &expected, runopts.as_deref());
                match emitted {
                    Ok((java, expected_java, runopts)) => Record::Query {
                        line: Version::new(query.source, java),
                        expected_line: Version::new(expected.source, expected_java),
                        expected_type: types::java_name(expected_type).to_string(),
                        expected_bif,
                        runopts,
                        provenance,
                    },
                    Err(err) => Record::skipped(query.source, &err),
                }
            }
            TestItem::Skip { line, reason } => {
                tracing::debug!(line = %line, reason = %reason, "pre-flagged skip");
                Record::Skip {
                    line,
                    reason,
                    cause: SkipCause::Preflagged,
                }
            }
        }
    }

    /// The query is always a DSL value; the expected value is classified on its own.
    fn emit_query(
        &self,
        query: &ParsedExpr,
        expected: &ParsedExpr,
        runopts: Option<&[(String, ParsedExpr)]>,
    ) -> EmitResult<(String, String, Option<BTreeMap<String, String>>)> {
        let java = emit_expr(&query.expr, Mode::Dsl, &self.vars, self.config)?;
        let expected_mode = Mode::for_expr(&expected.expr.node, &self.vars);
        let expected_java = emit_expr(&expected.expr, expected_mode, &self.vars, self.config)?;
        let runopts = runopts.map(|options| self.emit_runopts(options)).transpose()?;
        Ok((java, expected_java, runopts))
    }

    /// Each option is a plain value; the first one that fails names itself in the error.
    fn emit_runopts(
        &self,
        options: &[(String, ParsedExpr)],
    ) -> EmitResult<BTreeMap<String, String>> {
        options
            .iter()
            .map(|(key, value)| {
                emit_expr(&value.expr, Mode::Plain, &self.vars, self.config)
                    .map(|java| (key.clone(), java))
                    .map_err(|err: Untranslatable| err.context(format_args!("runopt '{key}'")))
            })
            .collect()
    }
}

impl<I> Iterator for Converter<'_, I>
where
    I: Iterator<Item = Result<TestItem, ItemError>>,
{
    type Item = Result<Record, ItemError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.items.next()? {
            Ok(item) => Some(Ok(self.convert_item(item))),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Convert every item of one file.
///
/// ## Errors
/// Returns the first [`ItemError`] of the stream; records converted before it are discarded.
#[tracing::instrument(skip_all, fields(file = file_id))]
pub fn convert_file<I>(file_id: &str, items: I, config: &ConvertConfig) -> Result<Vec<Record>, ItemError>
where
    I: IntoIterator<Item = Result<TestItem, ItemError>>,
{
    let records = Converter::new(items.into_iter(), config).collect::<Result<Vec<_>, _>>()?;
    let skipped = records.iter().filter(|r| r.is_skip()).count();
    tracing::debug!(records = records.len(), skipped, "converted file");
    Ok(records)
}

/// Result of converting one file in a batch.
#[derive(Debug)]
pub struct FileOutput {
    pub file_id: String,
    pub records: Result<Vec<Record>, ItemError>,
}

/// Convert several files, one after another.
///
/// Excluded files are left out of the result. A file whose stream breaks is reported in its [`FileOutput`] and
/// does not stop the batch.
pub fn run_batch<F, I>(files: F, config: &ConvertConfig) -> Vec<FileOutput>
where
    F: IntoIterator<Item = (String, I)>,
    I: IntoIterator<Item = Result<TestItem, ItemError>>,
{
    let start = Instant::now();
    let mut outputs = Vec::new();
    for (file_id, items) in files {
        if config.is_excluded(&file_id) {
            tracing::info!("Skipping excluded file {file_id}");
            continue;
        }
        tracing::info!("Working on {file_id}");
        let records = convert_file(&file_id, items, config);
        if let Err(err) = &records {
            tracing::error!(file = %file_id, error = %err, "stopped converting file");
        }
        outputs.push(FileOutput { file_id, records });
    }
    tracing::info!("Finished in {:.3} seconds", start.elapsed().as_secs_f64());
    outputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemReader;

    fn convert(input: &str, config: &ConvertConfig) -> Vec<Record> {
        convert_file("test", ItemReader::new("test", input.as_bytes()), config).unwrap()
    }

    #[test]
    fn definitions_extend_the_dsl_set() {
        let config = ConvertConfig::new();
        let input = r#"
{"kind": "def", "source": "t = r.table('x')"}
{"kind": "def", "source": "n = 5"}
"#;
        let mut converter = Converter::new(ItemReader::new("test", input.as_bytes()), &config);
        let records: Vec<Record> = converter.by_ref().map(Result::unwrap).collect();
        assert_eq!(records[0].java(), Some("ReqlAst t = r.table(\"x\");"));
        assert_eq!(records[1].java(), Some("Object n = 5;"));
        assert!(converter.vars().contains("t"));
        assert!(!converter.vars().contains("n"));
    }

    #[test]
    fn failing_runopt_skips_only_its_query() {
        let input = r#"
{"kind": "query", "query": "r.expr(1)", "expected": "1", "expected_type": "int", "runopts": {"profile": "x < 1"}}
{"kind": "query", "query": "r.expr(2)", "expected": "2", "expected_type": "int", "runopts": {"profile": "True"}}
"#;
        let records = convert(input, &ConvertConfig::new());
        let Record::Skip { reason, cause, .. } = &records[0] else {
            panic!("expected skip, got {:?}", records[0]);
        };
        assert!(reason.contains("runopt 'profile'"), "{reason}");
        assert_eq!(*cause, SkipCause::Unhandled);
        let Record::Query { runopts, .. } = &records[1] else {
            panic!("expected query, got {:?}", records[1]);
        };
        assert_eq!(runopts.as_ref().and_then(|o| o.get("profile")).map(String::as_str), Some("true"));
    }

    #[test]
    fn stream_errors_fuse_the_converter() {
        let config = ConvertConfig::new();
        let items = vec![
            Err(ItemError::Malformed {
                line: 1,
                message: "bad".to_string(),
            }),
            Ok(TestItem::Skip {
                line: "x".to_string(),
                reason: "y".to_string(),
            }),
        ];
        let mut converter = Converter::new(items.into_iter(), &config);
        assert!(matches!(converter.next(), Some(Err(ItemError::Malformed { .. }))));
        assert!(converter.next().is_none());
    }

    #[test]
    fn batch_skips_excluded_files() {
        let config = ConvertConfig::new();
        let files = vec![
            ("regression/1133".to_string(), Vec::<Result<TestItem, ItemError>>::new()),
            ("math".to_string(), Vec::new()),
        ];
        let outputs = run_batch(files, &config);
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].file_id, "math");
        assert!(matches!(&outputs[0].records, Ok(records) if records.is_empty()));
    }
}
