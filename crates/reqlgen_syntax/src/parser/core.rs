/// Parser core types and entrypoints.
///
/// This chunk defines the [`Parser`] type and its two entrypoints, one for a full test line (which may be an
/// assignment) and one for a lone expression.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module.
/// - A test line is a single statement, so there is no error recovery: the first syntax error ends parsing.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `reqlgen_syntax::lexer` (must end with `Eof`).
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse one statement: `target = ... = value` or a bare expression.
    pub fn parse_statement(mut self) -> Result<Statement, CompileError> {
        self.skip_newlines();
        let stmt = self.statement()?;
        self.finish()?;
        Ok(stmt)
    }

    /// Parse one expression; an assignment is an error.
    pub fn parse_expression(mut self) -> Result<Spanned<Expr>, CompileError> {
        self.skip_newlines();
        let expr = self.testlist()?;
        self.finish()?;
        Ok(expr)
    }

    fn statement(&mut self) -> Result<Statement, CompileError> {
        let mut targets = Vec::new();
        let mut value = self.testlist()?;
        while self.match_op(OperatorId::Eq) {
            Self::check_target(&value)?;
            targets.push(value);
            value = self.testlist()?;
        }
        if targets.is_empty() {
            Ok(Statement::Expr(value))
        } else {
            Ok(Statement::Assign { targets, value })
        }
    }

    /// Assignment targets are names, attributes, subscripts, or sequences of those.
    fn check_target(target: &Spanned<Expr>) -> Result<(), CompileError> {
        match &target.node {
            Expr::Name(_) | Expr::Attribute(..) | Expr::Subscript(..) => Ok(()),
            Expr::Tuple(items) | Expr::List(items) => items.iter().try_for_each(Self::check_target),
            other => Err(CompileError::syntax(
                format!("cannot assign to {}", other.kind_name()),
                target.span,
            )),
        }
    }

    /// Require that only trailing newlines remain.
    fn finish(&mut self) -> Result<(), CompileError> {
        self.skip_newlines();
        if self.is_at_end() {
            Ok(())
        } else {
            Err(CompileError::syntax(
                format!("expected end of line, found {}", self.peek().kind.describe()),
                self.peek().span,
            ))
        }
    }
}
