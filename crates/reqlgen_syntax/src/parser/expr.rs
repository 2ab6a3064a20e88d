/// Expression parsing.
///
/// The ladder, loosest first:
///
/// ```text
/// testlist    := test (',' test)* [',']
/// test        := lambda | or_test            ('x if c else y' is rejected)
/// or_test     := and_test                    ('or' is rejected)
/// and_test    := not_test                    ('and' is rejected)
/// not_test    := 'not' not_test | comparison
/// comparison  := bitor (comp_op bitor)*
/// bitor       := bitxor ('|' bitxor)*
/// bitxor      := bitand ('^' bitand)*
/// bitand      := shift ('&' shift)*
/// shift       := arith (('<<' | '>>') arith)*
/// arith       := term (('+' | '-') term)*
/// term        := factor (('*' | '/' | '//' | '%' | '@') factor)*
/// factor      := ('+' | '-' | '~') factor | power
/// power       := postfix ['**' factor]
/// postfix     := atom (call | subscript | '.' NAME)*
/// ```
type ExprResult = Result<Spanned<Expr>, CompileError>;

impl<'a> Parser<'a> {
    /// A comma-separated list; more than one item (or a trailing comma) makes a tuple.
    fn testlist(&mut self) -> ExprResult {
        let first = self.test()?;
        if !self.check_punct(PunctuationId::Comma) {
            return Ok(first);
        }
        let start = first.span;
        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if !self.is_at_expr_start() {
                break;
            }
            items.push(self.test()?);
        }
        Ok(Spanned::new(Expr::Tuple(items), self.span_from(start)))
    }

    fn test(&mut self) -> ExprResult {
        if self.check_keyword(KeywordId::Lambda) {
            return self.lambda();
        }
        let expr = self.or_test()?;
        if self.check_keyword(KeywordId::If) {
            return Err(CompileError::unsupported("conditional expressions", self.peek().span));
        }
        Ok(expr)
    }

    fn or_test(&mut self) -> ExprResult {
        let expr = self.and_test()?;
        if self.check_keyword(KeywordId::Or) {
            return Err(CompileError::unsupported("boolean operators", self.peek().span)
                .with_hint("use the DSL's `|` or `.or_()` instead of `or`"));
        }
        Ok(expr)
    }

    fn and_test(&mut self) -> ExprResult {
        let expr = self.not_test()?;
        if self.check_keyword(KeywordId::And) {
            return Err(CompileError::unsupported("boolean operators", self.peek().span)
                .with_hint("use the DSL's `&` or `.and_()` instead of `and`"));
        }
        Ok(expr)
    }

    fn not_test(&mut self) -> ExprResult {
        let start = self.peek().span;
        if self.match_keyword(KeywordId::Not) {
            let operand = self.not_test()?;
            return Ok(Spanned::new(
                Expr::Unary(UnaryOp::Not, Box::new(operand)),
                self.span_from(start),
            ));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> ExprResult {
        let left = self.bitor()?;
        let start = left.span;
        let mut comparators = Vec::new();
        while let Some(op) = self.comp_op() {
            comparators.push((op, self.bitor()?));
        }
        if comparators.is_empty() {
            Ok(left)
        } else {
            Ok(Spanned::new(
                Expr::Compare(Box::new(left), comparators),
                self.span_from(start),
            ))
        }
    }

    /// Consume a comparison operator, including the two-word forms `not in` and `is not`.
    fn comp_op(&mut self) -> Option<CompareOp> {
        if let Some(op) = self.peek().operator_id().and_then(CompareOp::from_operator_id) {
            self.advance();
            return Some(op);
        }
        if self.match_keyword(KeywordId::In) {
            return Some(CompareOp::In);
        }
        if self.check_keyword(KeywordId::Not) && self.peek_next().is_keyword(KeywordId::In) {
            self.advance();
            self.advance();
            return Some(CompareOp::NotIn);
        }
        if self.match_keyword(KeywordId::Is) {
            if self.match_keyword(KeywordId::Not) {
                return Some(CompareOp::IsNot);
            }
            return Some(CompareOp::Is);
        }
        None
    }

    fn bitor(&mut self) -> ExprResult {
        self.binary_level(&[OperatorId::Pipe], Self::bitxor)
    }

    fn bitxor(&mut self) -> ExprResult {
        self.binary_level(&[OperatorId::Caret], Self::bitand)
    }

    fn bitand(&mut self) -> ExprResult {
        self.binary_level(&[OperatorId::Amp], Self::shift)
    }

    fn shift(&mut self) -> ExprResult {
        self.binary_level(&[OperatorId::Shl, OperatorId::Shr], Self::arith)
    }

    fn arith(&mut self) -> ExprResult {
        self.binary_level(&[OperatorId::Plus, OperatorId::Minus], Self::term)
    }

    fn term(&mut self) -> ExprResult {
        self.binary_level(
            &[
                OperatorId::Star,
                OperatorId::Slash,
                OperatorId::SlashSlash,
                OperatorId::Percent,
                OperatorId::At,
            ],
            Self::factor,
        )
    }

    /// One left-associative precedence level.
    fn binary_level(&mut self, ops: &[OperatorId], next: fn(&mut Self) -> ExprResult) -> ExprResult {
        let mut left = next(self)?;
        loop {
            let Some(op) = self
                .peek()
                .operator_id()
                .filter(|id| ops.contains(id))
                .and_then(BinaryOp::from_operator_id)
            else {
                break;
            };
            self.advance();
            let right = next(self)?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }
        Ok(left)
    }

    fn factor(&mut self) -> ExprResult {
        let start = self.peek().span;
        let op = match self.peek().operator_id() {
            Some(OperatorId::Minus) => Some(UnaryOp::Neg),
            Some(OperatorId::Plus) => Some(UnaryOp::Pos),
            Some(OperatorId::Tilde) => Some(UnaryOp::Invert),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.factor()?;
            return Ok(Spanned::new(Expr::Unary(op, Box::new(operand)), self.span_from(start)));
        }
        self.power()
    }

    fn power(&mut self) -> ExprResult {
        let base = self.postfix()?;
        if self.match_op(OperatorId::StarStar) {
            let exponent = self.factor()?;
            let span = base.span.merge(exponent.span);
            return Ok(Spanned::new(
                Expr::Binary(Box::new(base), BinaryOp::Pow, Box::new(exponent)),
                span,
            ));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> ExprResult {
        let mut expr = self.atom()?;
        loop {
            let start = expr.span;
            if self.match_punct(PunctuationId::LParen) {
                let args = self.call_args()?;
                expr = Spanned::new(Expr::Call(Box::new(expr), args), self.span_from(start));
            } else if self.match_punct(PunctuationId::LBracket) {
                let slice = self.subscript()?;
                expr = Spanned::new(Expr::Subscript(Box::new(expr), Box::new(slice)), self.span_from(start));
            } else if self.match_punct(PunctuationId::Dot) {
                let member = self.expect_ident("expected attribute name after '.'")?;
                expr = Spanned::new(Expr::Attribute(Box::new(expr), member), self.span_from(start));
            } else {
                return Ok(expr);
            }
        }
    }

    fn atom(&mut self) -> ExprResult {
        let start = self.peek().span;
        let node = match self.peek().kind.clone() {
            TokenKind::Int(value) => {
                self.advance();
                Expr::Literal(Literal::Int(value))
            }
            TokenKind::Float(value) => {
                self.advance();
                Expr::Literal(Literal::Float(value))
            }
            TokenKind::String(_) | TokenKind::Bytes(_) => self.string_literals()?,
            TokenKind::Ident(name) => {
                self.advance();
                Expr::Name(name)
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Expr::Literal(Literal::Bool(true))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Expr::Literal(Literal::Bool(false))
            }
            TokenKind::Keyword(KeywordId::None) => {
                self.advance();
                Expr::Literal(Literal::None)
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                return self.paren(start);
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                self.list_display()?
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => {
                self.advance();
                self.dict_display()?
            }
            _ => return Err(self.error_here("expected expression")),
        };
        Ok(Spanned::new(node, self.span_from(start)))
    }

    /// Adjacent string literals concatenate; text and bytes cannot be mixed.
    fn string_literals(&mut self) -> Result<Expr, CompileError> {
        let mut text: Option<String> = None;
        let mut bytes: Option<Vec<u8>> = None;
        loop {
            match &self.peek().kind {
                TokenKind::String(s) if bytes.is_none() => text.get_or_insert_with(String::new).push_str(s),
                TokenKind::Bytes(b) if text.is_none() => bytes.get_or_insert_with(Vec::new).extend_from_slice(b),
                TokenKind::String(_) | TokenKind::Bytes(_) => {
                    return Err(CompileError::syntax(
                        "cannot mix bytes and nonbytes literals".to_string(),
                        self.peek().span,
                    ));
                }
                _ => break,
            }
            self.advance();
        }
        Ok(match bytes {
            Some(b) => Expr::Literal(Literal::Bytes(b)),
            None => Expr::Literal(Literal::Str(text.unwrap_or_default())),
        })
    }

    /// After `(`: unit tuple, parenthesized expression, or tuple.
    fn paren(&mut self, start: Span) -> ExprResult {
        if self.match_punct(PunctuationId::RParen) {
            return Ok(Spanned::new(Expr::Tuple(Vec::new()), self.span_from(start)));
        }
        let first = self.test()?;
        if self.check_keyword(KeywordId::For) {
            return Err(CompileError::unsupported("generator expressions", self.peek().span));
        }
        if !self.check_punct(PunctuationId::Comma) {
            self.expect_punct(PunctuationId::RParen, "expected ')'")?;
            return Ok(Spanned::new(first.node, self.span_from(start)));
        }
        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if self.check_punct(PunctuationId::RParen) {
                break;
            }
            items.push(self.test()?);
        }
        self.expect_punct(PunctuationId::RParen, "expected ')' after tuple")?;
        Ok(Spanned::new(Expr::Tuple(items), self.span_from(start)))
    }

    /// After `[`: list literal or list comprehension.
    fn list_display(&mut self) -> Result<Expr, CompileError> {
        if self.match_punct(PunctuationId::RBracket) {
            return Ok(Expr::List(Vec::new()));
        }
        let first = self.test()?;
        if self.check_keyword(KeywordId::For) {
            let generators = self.comprehension_clauses()?;
            self.expect_punct(PunctuationId::RBracket, "expected ']' after list comprehension")?;
            return Ok(Expr::ListComp(Box::new(first), generators));
        }
        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if self.check_punct(PunctuationId::RBracket) {
                break;
            }
            items.push(self.test()?);
        }
        self.expect_punct(PunctuationId::RBracket, "expected ']' after list elements")?;
        Ok(Expr::List(items))
    }

    /// `for target in iter [if cond]*`, repeated.
    fn comprehension_clauses(&mut self) -> Result<Vec<Comprehension>, CompileError> {
        let mut generators = Vec::new();
        while self.match_keyword(KeywordId::For) {
            let target = self.target_list()?;
            self.expect_keyword(KeywordId::In, "expected 'in' in comprehension")?;
            let iter = self.or_test()?;
            let mut ifs = Vec::new();
            while self.match_keyword(KeywordId::If) {
                ifs.push(self.or_test()?);
            }
            generators.push(Comprehension { target, iter, ifs });
        }
        Ok(generators)
    }

    /// Comprehension target: one or more `bitor`-level expressions (so `in` is not consumed).
    fn target_list(&mut self) -> ExprResult {
        let first = self.bitor()?;
        if !self.check_punct(PunctuationId::Comma) {
            Self::check_target(&first)?;
            return Ok(first);
        }
        let start = first.span;
        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if self.check_keyword(KeywordId::In) {
                break;
            }
            items.push(self.bitor()?);
        }
        let target = Spanned::new(Expr::Tuple(items), self.span_from(start));
        Self::check_target(&target)?;
        Ok(target)
    }

    /// After `{`: dict literal. Sets and dict comprehensions are rejected.
    fn dict_display(&mut self) -> Result<Expr, CompileError> {
        let mut entries = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) {
            if self.match_op(OperatorId::StarStar) {
                let value = self.bitor()?;
                entries.push(DictEntry { key: None, value });
            } else {
                let key = self.test()?;
                if !self.match_punct(PunctuationId::Colon) {
                    return Err(CompileError::unsupported("set literals", key.span));
                }
                let value = self.test()?;
                if self.check_keyword(KeywordId::For) {
                    return Err(CompileError::unsupported("dict comprehensions", self.peek().span));
                }
                entries.push(DictEntry { key: Some(key), value });
            }
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBrace, "expected '}' after dict entries")?;
        Ok(Expr::Dict(entries))
    }

    /// After `(` of a call.
    fn call_args(&mut self) -> Result<Vec<Argument>, CompileError> {
        let mut args = Vec::new();
        let mut seen_keyword = false;
        while !self.check_punct(PunctuationId::RParen) {
            let arg = if self.match_op(OperatorId::Star) {
                Argument::Starred(self.test()?)
            } else if self.match_op(OperatorId::StarStar) {
                seen_keyword = true;
                Argument::DoubleStarred(self.test()?)
            } else if matches!(self.peek().kind, TokenKind::Ident(_)) && self.peek_next().kind.is_operator(OperatorId::Eq)
            {
                let name = self.expect_ident("expected keyword argument name")?;
                self.advance();
                seen_keyword = true;
                Argument::Keyword(name, self.test()?)
            } else {
                let value = self.test()?;
                if self.check_keyword(KeywordId::For) {
                    return Err(CompileError::unsupported("generator expressions", self.peek().span));
                }
                if seen_keyword {
                    return Err(CompileError::syntax(
                        "positional argument follows keyword argument".to_string(),
                        value.span,
                    ));
                }
                Argument::Positional(value)
            };
            args.push(arg);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RParen, "expected ')' after arguments")?;
        Ok(args)
    }

    /// After `[` of a subscript.
    fn subscript(&mut self) -> Result<Slice, CompileError> {
        let start = self.peek().span;
        let first = self.slice_item()?;
        if !self.check_punct(PunctuationId::Comma) {
            self.expect_punct(PunctuationId::RBracket, "expected ']' after subscript")?;
            return Ok(first);
        }
        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if self.check_punct(PunctuationId::RBracket) {
                break;
            }
            items.push(self.slice_item()?);
        }
        self.expect_punct(PunctuationId::RBracket, "expected ']' after subscript")?;
        let span = self.span_from(start);

        if items.iter().any(|item| matches!(item, Slice::Range { .. })) {
            return Ok(Slice::Extended(items));
        }
        let elements = items
            .into_iter()
            .filter_map(|item| match item {
                Slice::Index(expr) => Some(expr),
                _ => None,
            })
            .collect();
        Ok(Slice::Index(Spanned::new(Expr::Tuple(elements), span)))
    }

    /// One dimension: `expr` or `[lower]:[upper][:[step]]`.
    fn slice_item(&mut self) -> Result<Slice, CompileError> {
        let lower = if self.check_punct(PunctuationId::Colon) {
            None
        } else {
            let expr = self.test()?;
            if !self.check_punct(PunctuationId::Colon) {
                return Ok(Slice::Index(expr));
            }
            Some(expr)
        };
        self.expect_punct(PunctuationId::Colon, "expected ':' in slice")?;
        let upper = self.optional_slice_bound()?;
        let step = if self.match_punct(PunctuationId::Colon) {
            self.optional_slice_bound()?
        } else {
            None
        };
        Ok(Slice::Range { lower, upper, step })
    }

    fn optional_slice_bound(&mut self) -> Result<Option<Spanned<Expr>>, CompileError> {
        if self.check_punct(PunctuationId::Colon)
            || self.check_punct(PunctuationId::Comma)
            || self.check_punct(PunctuationId::RBracket)
        {
            Ok(None)
        } else {
            self.test().map(Some)
        }
    }

    /// `lambda [a, b, ...]: body`
    fn lambda(&mut self) -> ExprResult {
        let start = self.peek().span;
        self.expect_keyword(KeywordId::Lambda, "expected 'lambda'")?;
        let mut params = Vec::new();
        while !self.check_punct(PunctuationId::Colon) {
            if self.check_op(OperatorId::Star) || self.check_op(OperatorId::StarStar) {
                return Err(CompileError::unsupported("variadic lambda parameters", self.peek().span));
            }
            params.push(self.expect_ident("expected lambda parameter name")?);
            if self.check_op(OperatorId::Eq) {
                return Err(CompileError::unsupported("lambda default values", self.peek().span));
            }
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::Colon, "expected ':' after lambda parameters")?;
        let body = self.test()?;
        Ok(Spanned::new(Expr::Lambda(params, Box::new(body)), self.span_from(start)))
    }
}
