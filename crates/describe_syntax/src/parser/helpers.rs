/// Token-stream helpers and error recovery.
impl<'a> Parser<'a> {
    /// Return the current token without consuming it.
    ///
    /// An empty token slice behaves like a lone `Eof`.
    fn peek(&self) -> Token {
        match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some(token) => token.clone(),
            None => Token::new(TokenKind::Eof, Span::default()),
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Advance past the current token and return it.
    fn advance(&mut self) -> Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume a string literal or record `expected` as an error.
    fn expect_string(&mut self, what: &str) -> Result<Spanned<String>, SyntaxError> {
        let token = self.peek();
        match token.kind {
            TokenKind::String(value) => {
                self.advance();
                Ok(Spanned::new(value, token.span))
            }
            other => Err(SyntaxError::new(
                format!("expected {what}, found {}", other.describe()),
                token.span,
            )),
        }
    }

    /// Skip to a point where parsing can resume: the next keyword or `}` at the current nesting depth.
    ///
    /// Braced bodies that belong to the broken construct are skipped whole so their `}` does not close the
    /// enclosing block early.
    fn synchronize(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek().kind {
                TokenKind::Eof => return,
                TokenKind::Keyword(_) if depth == 0 => return,
                TokenKind::RBrace if depth == 0 => return,
                TokenKind::RBrace => depth -= 1,
                TokenKind::LBrace => depth += 1,
                _ => {}
            }
            self.advance();
        }
    }

    fn error(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }
}
