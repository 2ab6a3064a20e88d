//! Property-based tests for reqlgen
//!
//! These tests use proptest to verify emission invariants across many randomly generated inputs: string literals
//! survive the trip into Java, wide integers never reach Java as `int`, arithmetic follows the operand's mode, and
//! emission is deterministic.

use proptest::prelude::*;
use reqlgen::{ConvertConfig, DslVars, Mode, emit_expr, emit_statement};
use reqlgen_core::strings::java_string_literal;
use reqlgen_syntax::{parse_expr, parse_line};

fn vars() -> DslVars {
    DslVars::for_file(&ConvertConfig::new())
}

fn dsl(source: &str) -> Result<String, reqlgen::Untranslatable> {
    let expr = parse_expr(source).expect("parse failed");
    emit_expr(&expr, Mode::Dsl, &vars(), &ConvertConfig::new())
}

/// Read a Java string literal back, following Java's escape rules (octal escapes included).
fn decode_java_literal(literal: &str) -> Option<String> {
    let body = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::new();
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            return None;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            d @ '0'..='7' => {
                let max_digits = if d <= '3' { 3 } else { 2 };
                let mut value = d.to_digit(8)?;
                for _ in 1..max_digits {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value)?);
            }
            _ => return None,
        }
    }
    Some(out)
}

/// Render a string as a host single-quoted literal.
fn host_literal(value: &str) -> String {
    let mut out = String::from("'");
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

// =============================================================================
// Literal Properties
// =============================================================================

proptest! {
    /// Property: a Java string literal decodes to the string it was rendered from
    #[test]
    fn string_literals_round_trip(value in any::<String>()) {
        let literal = java_string_literal(&value);
        prop_assert_eq!(decode_java_literal(&literal), Some(value));
    }

    /// Property: the literal never contains a raw line terminator or a `\u` escape trigger
    #[test]
    fn string_literals_stay_on_one_line(value in any::<String>()) {
        let literal = java_string_literal(&value);
        prop_assert!(!literal.contains('\n') && !literal.contains('\r'));
        let body = &literal[1..literal.len() - 1];
        prop_assert!(!body.replace("\\\\", "").contains("\\u"));
    }

    /// Property: host string literals reach Java with the same contents
    #[test]
    fn host_strings_survive_emission(value in "[ -~\\t\\n\\x01é]{0,24}") {
        let java = dsl(&format!("r.expr({})", host_literal(&value))).unwrap();
        let literal = java.strip_prefix("r.expr(").and_then(|s| s.strip_suffix(')')).unwrap();
        prop_assert_eq!(decode_java_literal(literal), Some(value));
    }

    /// Property: integers beyond Java's `int` range are widened, others are not
    #[test]
    fn wide_integers_are_widened(value in 0i128..=i128::from(u64::MAX)) {
        let java = dsl(&format!("r.expr({value})")).unwrap();
        if value > i128::from(i32::MAX) {
            prop_assert_eq!(java, format!("r.expr({value}.0)"));
        } else {
            prop_assert_eq!(java, format!("r.expr({value})"));
        }
    }
}

// =============================================================================
// Mode Properties
// =============================================================================

fn arith_op() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("+", "add")),
        Just(("-", "sub")),
        Just(("*", "mul")),
        Just(("/", "div")),
        Just(("%", "mod")),
    ]
}

proptest! {
    /// Property: arithmetic on a DSL value is a root method call, never infix
    #[test]
    fn dsl_arithmetic_uses_root_methods((symbol, method) in arith_op(), a in 0i64..1000, b in 0i64..1000) {
        let java = dsl(&format!("r.expr({a}) {symbol} {b}")).unwrap();
        prop_assert_eq!(java, format!("r.{method}(r.expr({a}), {b})"));
    }

    /// Property: arithmetic on plain values stays infix
    #[test]
    fn plain_arithmetic_stays_infix((symbol, method) in arith_op(), a in 0i64..1000, b in 0i64..1000) {
        let expr = parse_expr(&format!("{a} {symbol} {b}")).unwrap();
        let java = emit_expr(&expr, Mode::for_expr(&expr.node, &vars()), &vars(), &ConvertConfig::new()).unwrap();
        prop_assert_eq!(&java, &format!("{a} {symbol} {b}"));
        prop_assert!(!java.contains(method));
    }

    /// Property: omitted slice bounds default to 0 and -1; negative literals are folded
    #[test]
    fn slice_bounds_default(lower in proptest::option::of(-50i64..50), upper in proptest::option::of(-50i64..50)) {
        let show = |b: Option<i64>| b.map(|v| v.to_string()).unwrap_or_default();
        let java = dsl(&format!("r.expr([1, 2, 3])[{}:{}]", show(lower), show(upper))).unwrap();
        prop_assert_eq!(
            java,
            format!("r.expr(Arrays.asList(1, 2, 3)).slice({}, {})", lower.unwrap_or(0), upper.unwrap_or(-1))
        );
    }

    /// Property: chained comparisons are always refused
    #[test]
    fn chained_comparisons_are_skipped(ops in proptest::collection::vec(prop_oneof![Just("<"), Just("<="), Just("=="), Just("!=")], 2..5)) {
        let mut source = "r.expr(0)".to_string();
        for (i, op) in ops.iter().enumerate() {
            source.push_str(&format!(" {op} {i}"));
        }
        let err = dsl(&source).unwrap_err();
        prop_assert!(err.is_hard());
    }
}

// =============================================================================
// Determinism
// =============================================================================

proptest! {
    /// Property: emitting the same tree twice gives identical text
    #[test]
    fn emission_is_idempotent(
        table in "[a-z][a-z_]{0,8}",
        index in 0u32..100,
        key in "[a-z]{1,6}",
    ) {
        let source = format!("t = r.table('{table}').get_all({index}, index='{key}')[0]");
        let statement = parse_line(&source).unwrap();
        let config = ConvertConfig::new();
        let first = emit_statement(&statement, Mode::Dsl, &vars(), &config).unwrap();
        let second = emit_statement(&statement, Mode::Dsl, &vars(), &config).unwrap();
        prop_assert_eq!(first, second);
    }
}
