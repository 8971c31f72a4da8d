/// Directive parsing.
impl<'a> Parser<'a> {
    /// Parse items until `}` or end of file. The terminator is left for the caller.
    fn items(&mut self, enclosing: Option<BlockKind>) -> Vec<Spanned<Item>> {
        let mut items = Vec::new();

        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::RBrace if enclosing.is_some() => break,
                TokenKind::RBrace => {
                    self.error(SyntaxError::new("unmatched `}`", token.span));
                    self.advance();
                }
                TokenKind::Keyword(id) => match self.item(id, enclosing) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        self.error(e);
                        self.synchronize();
                    }
                },
                TokenKind::Word(word) => {
                    self.error(
                        SyntaxError::new(format!("unknown directive `{word}`"), token.span).with_hint(format!(
                            "expected one of: {}",
                            keywords::KEYWORDS
                                .iter()
                                .map(|k| k.canonical)
                                .collect::<Vec<_>>()
                                .join(", ")
                        )),
                    );
                    self.advance();
                    self.synchronize();
                }
                other => {
                    self.error(SyntaxError::new(
                        format!("expected a directive, found {}", other.describe()),
                        token.span,
                    ));
                    self.advance();
                    self.synchronize();
                }
            }
        }

        items
    }

    /// Parse one directive starting at keyword `id`.
    fn item(&mut self, id: KeywordId, enclosing: Option<BlockKind>) -> Result<Spanned<Item>, SyntaxError> {
        match id {
            KeywordId::Describe => self.block(BlockKind::Describe, enclosing),
            KeywordId::Context => self.block(BlockKind::Context, enclosing),
            KeywordId::It => self.block(BlockKind::It, enclosing),
            KeywordId::Pass => {
                let keyword = self.advance();
                self.check_assertion_placement(id, keyword.span, enclosing);
                Ok(Spanned::new(Item::Pass, keyword.span))
            }
            KeywordId::Fail => {
                let keyword = self.advance();
                let message = self.expect_string("a failure message string after `fail`")?;
                self.check_assertion_placement(id, keyword.span, enclosing);
                Ok(Spanned::new(Item::Fail(message.node), keyword.span.merge(message.span)))
            }
            KeywordId::Abort => {
                let keyword = self.advance();
                let message = self.expect_string("a message string after `abort`")?;
                Ok(Spanned::new(Item::Abort(message.node), keyword.span.merge(message.span)))
            }
        }
    }

    /// Parse `<kind> "label" { items }`.
    fn block(&mut self, kind: BlockKind, enclosing: Option<BlockKind>) -> Result<Spanned<Item>, SyntaxError> {
        let keyword = self.advance();
        let spelling = keywords::as_str(kind.keyword());

        let label = self.expect_string(&format!("a label string after `{spelling}`"))?;
        let header = keyword.span.merge(label.span);

        let open = self.peek();
        if !matches!(open.kind, TokenKind::LBrace) {
            return Err(SyntaxError::new(
                format!("expected `{{` to open the `{spelling}` block, found {}", open.kind.describe()),
                open.span,
            ));
        }
        self.advance();

        if let Some(parent) = enclosing.filter(|p| !p.allows_nesting()) {
            self.error(SyntaxError::new(
                format!(
                    "`{spelling}` cannot be nested inside an `{}` block",
                    keywords::as_str(parent.keyword())
                ),
                header,
            )
            .with_hint("close the example before opening another block"));
        }

        let body = self.items(Some(kind));

        let close = self.peek();
        if matches!(close.kind, TokenKind::RBrace) {
            self.advance();
        } else {
            self.error(
                SyntaxError::new(format!("unclosed `{spelling}` block \"{}\"", label.node), header)
                    .with_hint("add a matching `}`"),
            );
        }

        Ok(Spanned::new(
            Item::Block(Block {
                kind,
                label: label.node,
                body,
            }),
            header,
        ))
    }

    fn check_assertion_placement(&mut self, id: KeywordId, span: Span, enclosing: Option<BlockKind>) {
        if enclosing != Some(BlockKind::It) {
            self.error(
                SyntaxError::new(
                    format!("`{}` is only allowed inside an `it` block", keywords::as_str(id)),
                    span,
                )
                .with_hint("wrap the assertion in `it \"...\" { ... }`"),
            );
        }
    }
}
