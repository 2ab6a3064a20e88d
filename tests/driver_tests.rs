//! Batch driver tests
//!
//! These tests feed JSON-lines item streams through the reader and the converter and check the resulting records:
//! DSL-variable tracking across items, skip handling, run options, and exclusions.

use reqlgen::{ConvertConfig, ItemError, ItemReader, Record, SkipCause, convert_file, run_batch};

fn convert(input: &str, config: &ConvertConfig) -> Vec<Record> {
    convert_file("test", ItemReader::new("test", input.as_bytes()), config).expect("stream should decode")
}

fn java(record: &Record) -> &str {
    record.java().unwrap_or_else(|| panic!("expected emitted record, got {record:?}"))
}

#[test]
fn test_definition_makes_later_queries_dsl() {
    let input = r#"
{"kind": "def", "source": "t = r.table('x')", "testfile": "filter", "test_num": 1}
{"kind": "query", "query": "t.filter(lambda row: row['a'] == 1).count()", "expected": "1", "expected_type": "int", "expected_bif": 1, "testfile": "filter", "test_num": 2}
{"kind": "query", "query": "t[0]", "expected": "t[1]", "expected_type": "dict"}
"#;
    let records = convert(input, &ConvertConfig::new());
    assert_eq!(records.len(), 3);
    assert_eq!(java(&records[0]), r#"ReqlAst t = r.table("x");"#);
    assert_eq!(java(&records[1]), r#"t.filter(row -> r.eq(row.bracket("a"), 1)).count()"#);

    let Record::Query {
        expected_line,
        expected_type,
        expected_bif,
        provenance,
        ..
    } = &records[1]
    else {
        panic!("expected query, got {:?}", records[1]);
    };
    assert_eq!(expected_line.java, "1");
    assert_eq!(expected_type, "Integer");
    assert_eq!(expected_bif, &serde_json::json!(1));
    assert_eq!(provenance.test_num, 2);

    // Both sides see `t` as a DSL value.
    let Record::Query {
        line, expected_line, ..
    } = &records[2]
    else {
        panic!("expected query, got {:?}", records[2]);
    };
    assert_eq!(line.java, "t.bracket(0)");
    assert_eq!(expected_line.java, "t.bracket(1)");
}

#[test]
fn test_table_variables_are_known_up_front() {
    let input = r#"{"kind": "query", "query": "tbl2.count() + 1", "expected": "3", "expected_type": "int"}"#;
    let config = ConvertConfig::new().with_table_var_names(ConvertConfig::parse_table_var_names("tbl, tbl2"));
    let records = convert(input, &config);
    assert_eq!(java(&records[0]), "r.add(tbl2.count(), 1)");
}

#[test]
fn test_unknown_names_stay_plain() {
    let input = r#"
{"kind": "def", "source": "x = [1, 2]"}
{"kind": "query", "query": "r.expr(x)", "expected": "x[0]", "expected_type": "int"}
"#;
    let records = convert(input, &ConvertConfig::new());
    assert_eq!(java(&records[0]), "Object x = Arrays.asList(1, 2);");
    let Record::Query { expected_line, .. } = &records[1] else {
        panic!("expected query, got {:?}", records[1]);
    };
    assert_eq!(expected_line.java, "x[0]");
}

#[test]
fn test_row_skip_names_the_accessor() {
    let input = r#"
{"kind": "def", "source": "f = r.row['id']"}
{"kind": "query", "query": "r.expr([{'id': 1}]).filter(r.row['id'] == 1)", "expected": "[]", "expected_type": "list"}
{"kind": "query", "query": "r.expr(1)", "expected": "1", "expected_type": "int"}
"#;
    let records = convert(input, &ConvertConfig::new());
    assert_eq!(records.len(), 3);
    for record in &records[..2] {
        let Record::Skip { reason, cause, .. } = record else {
            panic!("expected skip, got {record:?}");
        };
        assert_eq!(reason, "Java driver doesn't support r.row");
        assert_eq!(*cause, SkipCause::Unsupported);
    }
    assert_eq!(java(&records[2]), "r.expr(1)");
}

#[test]
fn test_failed_definition_does_not_bind() {
    let input = r#"
{"kind": "def", "source": "t = r.table('x')[::2]"}
{"kind": "query", "query": "t.count()", "expected": "0", "expected_type": "int"}
"#;
    let records = convert(input, &ConvertConfig::new());
    assert!(matches!(&records[0], Record::Skip { cause: SkipCause::Unhandled, .. }));
    // Queries are always DSL-rooted, so `t` still emits as a chain.
    assert_eq!(java(&records[1]), "t.count()");
}

#[test]
fn test_multi_target_definition_is_skipped_and_file_continues() {
    let input = r#"
{"kind": "def", "source": "a = b = r.table('x')"}
{"kind": "def", "source": "x[0] = 1"}
{"kind": "query", "query": "r.expr(1)", "expected": "1", "expected_type": "int"}
"#;
    let records = convert(input, &ConvertConfig::new());
    assert_eq!(records.len(), 3);
    let Record::Skip { line, reason, cause } = &records[0] else {
        panic!("expected skip, got {:?}", records[0]);
    };
    assert_eq!(line, "a = b = r.table('x')");
    assert!(reason.contains("single variable"), "{reason}");
    assert_eq!(*cause, SkipCause::Unhandled);
    assert!(matches!(&records[1], Record::Skip { cause: SkipCause::Unhandled, .. }));
    assert_eq!(java(&records[2]), "r.expr(1)");
}

#[test]
fn test_definition_name_must_match_its_target() {
    let input = r#"
{"kind": "def", "name": "u", "source": "t = r.table('x')"}
{"kind": "query", "query": "u.count()", "expected": "t", "expected_type": "int"}
"#;
    let result = convert_file("test", ItemReader::new("test", input.as_bytes()), &ConvertConfig::new());
    assert!(
        matches!(&result, Err(ItemError::Malformed { line: 2, message }) if message.contains("`u`")),
        "{result:?}"
    );
}

#[test]
fn test_named_definition_binds_its_target() {
    let input = r#"
{"kind": "def", "name": "t", "source": "t = r.table('x')"}
{"kind": "query", "query": "r.expr(1)", "expected": "t[1]", "expected_type": "int"}
"#;
    let records = convert(input, &ConvertConfig::new());
    let Record::Query { expected_line, .. } = &records[1] else {
        panic!("expected query, got {:?}", records[1]);
    };
    assert_eq!(expected_line.java, "t.bracket(1)");
    assert_eq!(java(&records[0]), r#"ReqlAst t = r.table("x");"#);
}

#[test]
fn test_chained_comparison_is_a_skip() {
    let input = r#"{"kind": "query", "query": "r.expr(1) < 2 < 3", "expected": "True", "expected_type": "bool"}"#;
    let records = convert(input, &ConvertConfig::new());
    let Record::Skip { line, cause, .. } = &records[0] else {
        panic!("expected skip, got {:?}", records[0]);
    };
    assert_eq!(line, "r.expr(1) < 2 < 3");
    assert_eq!(*cause, SkipCause::Unhandled);
}

#[test]
fn test_runopts_are_plain_values() {
    let input = r#"{"kind": "query", "query": "r.expr(1)", "expected": "1", "expected_type": "int", "runopts": {"time_format": "'raw'", "max_batch_rows": "3"}}"#;
    let records = convert(input, &ConvertConfig::new());
    let Record::Query { runopts: Some(runopts), .. } = &records[0] else {
        panic!("expected query with runopts, got {:?}", records[0]);
    };
    assert_eq!(runopts.get("time_format").map(String::as_str), Some("\"raw\""));
    assert_eq!(runopts.get("max_batch_rows").map(String::as_str), Some("3"));
}

#[test]
fn test_preflagged_and_syntax_skips_pass_through() {
    let input = r#"
{"kind": "skip", "line": "r.js('1')", "reason": "uses JavaScript"}
{"kind": "query", "query": "r.expr(x or y)", "expected": "1", "expected_type": "int"}
"#;
    let records = convert(input, &ConvertConfig::new());
    assert!(records.iter().all(|r| matches!(r, Record::Skip { cause: SkipCause::Preflagged, .. })));
}

#[test]
fn test_malformed_item_stops_the_file() {
    let input = "{\"kind\": \"def\", \"source\": \"t = r.table('x')\"}\n{\"kind\": \"test\"}\n";
    let result = convert_file("test", ItemReader::new("test", input.as_bytes()), &ConvertConfig::new());
    assert!(matches!(result, Err(ItemError::Malformed { line: 2, .. })));
}

#[test]
fn test_batch_converts_files_independently() {
    let config = ConvertConfig::new();
    let files = vec![
        ("math/arith".to_string(), ItemReader::new("math/arith", &br#"{"kind": "def", "source": "t = r.table('x')"}"#[..])),
        ("math/other".to_string(), ItemReader::new("math/other", &br#"{"kind": "def", "source": "u = t"}"#[..])),
        ("arity/args".to_string(), ItemReader::new("arity/args", &b""[..])),
    ];
    let outputs = run_batch(files, &config);
    assert_eq!(outputs.len(), 2);
    // `t` was bound in the first file only.
    let Ok(records) = &outputs[1].records else {
        panic!("expected records");
    };
    assert_eq!(java(&records[0]), "Object u = t;");
}

#[test]
fn test_records_serialize_as_json_lines() {
    let input = r#"{"kind": "def", "source": "t = r.table('x')", "testfile": "sindex/api", "test_num": 4}"#;
    let records = convert(input, &ConvertConfig::new());
    let line = serde_json::to_string(&records[0]).unwrap();
    assert_eq!(
        line,
        r#"{"kind":"def","line":{"original":"t = r.table('x')","java":"ReqlAst t = r.table(\"x\");"},"testfile":"sindex/api","test_num":4}"#
    );
}
