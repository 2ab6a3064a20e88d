/// Parse a token stream into one [`Statement`].
///
/// This is the main public entrypoint for parsing a test line.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `reqlgen_syntax::lexer`.
///
/// ## Errors
/// Returns `Err(Vec<CompileError>)` (currently always a single error) if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_statement(tokens: &[Token]) -> Result<Statement, Vec<CompileError>> {
    if tokens.is_empty() {
        return Err(vec![CompileError::syntax("empty token stream".to_string(), Span::default())]);
    }
    Parser::new(tokens).parse_statement().map_err(|e| vec![e])
}

/// Parse a token stream into one expression.
///
/// ## Errors
/// Returns `Err(Vec<CompileError>)` if parsing fails or the tokens form an assignment.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_expression(tokens: &[Token]) -> Result<Spanned<Expr>, Vec<CompileError>> {
    if tokens.is_empty() {
        return Err(vec![CompileError::syntax("empty token stream".to_string(), Span::default())]);
    }
    Parser::new(tokens).parse_expression().map_err(|e| vec![e])
}
