//! Diagnostics for host-line syntax errors.
//!
//! Errors carry a byte span into the original line so callers can render them with a caret underline. Rendering
//! returns a `String` (no terminal colors) because reports end up in log records, not on a TTY.

use std::fmt::Write as _;

use crate::ast::Span;

/// A syntax error with location information
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Error,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Syntax,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    /// A construct that is valid host syntax but outside the supported expression subset.
    pub fn unsupported(construct: &str, span: Span) -> Self {
        Self::syntax(format!("{construct} are not supported"), span)
            .with_note("only the expression subset used by test lines can be converted")
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Error,
    Syntax,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Error => write!(f, "error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// Render an error with source context.
///
/// ```text
/// syntax error: conditional expressions are not supported
///   --> sindex/api:1:10
///   |
/// 1 | r.expr(1 if x else 2)
///   |          ^^
///   = note: ...
/// ```
pub fn format_error(file_name: &str, source: &str, error: &CompileError) -> String {
    let (line_num, col_num, line_text) = get_line_info(source, error.span.start);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}: {}", error.kind, error.message);
    let _ = writeln!(out, "  --> {file_name}:{line_num}:{col_num}");

    let width = line_num.to_string().len();
    let _ = writeln!(out, "  {:>width$} |", "");
    let _ = writeln!(out, "  {line_num:>width$} | {line_text}");

    let underline_len = if error.span.end > error.span.start {
        let line_start = error.span.start + 1 - col_num;
        let end_in_line = (error.span.end - line_start).min(line_text.len());
        end_in_line.saturating_sub(col_num - 1).max(1)
    } else {
        1
    };
    let _ = writeln!(
        out,
        "  {:>width$} | {}{}",
        "",
        " ".repeat(col_num - 1),
        "^".repeat(underline_len)
    );

    for note in &error.notes {
        let _ = writeln!(out, "  = note: {note}");
    }
    for hint in &error.hints {
        let _ = writeln!(out, "  = hint: {hint}");
    }
    out
}

/// Get line number, column number, and line text for a byte offset
fn get_line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let line_text = &source[line_start..line_end];
    let col_num = offset - line_start + 1;

    (line_num, col_num, line_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_caret_under_span() {
        let err = CompileError::syntax("unexpected token".to_string(), Span::new(4, 6));
        let rendered = format_error("t", "r.a(1 2)", &err);
        assert_eq!(
            rendered,
            "syntax error: unexpected token\n  --> t:1:5\n    |\n  1 | r.a(1 2)\n    |     ^^\n"
        );
    }

    #[test]
    fn second_line_offsets() {
        let source = "x\ny = )";
        let err = CompileError::syntax("boom".to_string(), Span::new(6, 7));
        let rendered = format_error("f", source, &err);
        assert!(rendered.contains("--> f:2:5"), "{rendered}");
        assert!(rendered.contains("2 | y = )"), "{rendered}");
    }
}
