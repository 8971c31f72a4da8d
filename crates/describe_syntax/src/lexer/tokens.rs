//! Token types for the suite-script lexer.
//!
//! Reserved words are lexed straight to `Keyword(KeywordId)` through the `describe_core` registry, so the
//! parser never compares spellings.

use crate::ast::Span;
use describe_core::lang::keywords::{self, KeywordId};

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(KeywordId),
    /// A bare word that is not reserved; always a parse error, kept for the message.
    Word(String),
    String(String),
    LBrace,
    RBrace,
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Short human description used in "expected ..., found ..." messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(id) => format!("`{}`", keywords::as_str(*id)),
            TokenKind::Word(w) => format!("`{w}`"),
            TokenKind::String(_) => "a string".to_string(),
            TokenKind::LBrace => "`{`".to_string(),
            TokenKind::RBrace => "`}`".to_string(),
            TokenKind::Eof => "end of file".to_string(),
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
