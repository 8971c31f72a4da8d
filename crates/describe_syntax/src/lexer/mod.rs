//! Lexer for suite scripts
//!
//! Handles tokenization including:
//! - Keywords (`describe`, `context`, `it`, `pass`, `fail`, `abort`) and bare words
//! - Double-quoted string literals with `\"`, `\\`, `\n`, `\t` escapes
//! - Braces delimiting block bodies
//! - `#` line comments
//!
//! Layout is insignificant: newlines and indentation are plain whitespace.

mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::ast::Span;
use crate::diagnostics::SyntaxError;
use describe_core::lang::keywords;

/// Lexer for suite-script source.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The token stream always ends with an `Eof` token. Scanning continues past errors so every bad string or
    /// stray character is reported at once.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<SyntaxError>> {
        while let Some(c) = self.advance() {
            let start = self.current_pos - c.len_utf8();
            self.scan_token(c, start);
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        Some(c)
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn scan_token(&mut self, c: char, start: usize) {
        match c {
            c if c.is_whitespace() => {}
            '#' => self.skip_comment(),
            '{' => self.add_token(TokenKind::LBrace, start),
            '}' => self.add_token(TokenKind::RBrace, start),
            '"' => self.scan_string(start),
            c if is_word_start(c) => self.scan_word(start),
            other => self.errors.push(SyntaxError::new(
                format!("unexpected character `{other}`"),
                Span::new(start, self.current_pos),
            )),
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn scan_word(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_word_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];
        match keywords::from_str(spelling) {
            Some(id) => self.add_token(TokenKind::Keyword(id), start),
            None => self.add_token(TokenKind::Word(spelling.to_string()), start),
        }
    }
}

/// Check if a character can start a word (ASCII-only).
fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue a word (ASCII-only).
fn is_word_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Convenience function to lex a source string.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use describe_core::lang::keywords::{KeywordId, KEYWORDS};

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keyword_registry_parity() {
        for k in KEYWORDS {
            let tokens = lex(k.canonical).unwrap();
            assert!(tokens[0].kind.is_keyword(k.id), "{} did not lex as a keyword", k.canonical);
        }
    }

    #[test]
    fn test_block_header() {
        assert_eq!(
            kinds("describe \"Adder\" {"),
            vec![
                TokenKind::Keyword(KeywordId::Describe),
                TokenKind::String("Adder".into()),
                TokenKind::LBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_and_whitespace_are_skipped() {
        assert_eq!(
            kinds("# heading\n  pass # trailing\n}"),
            vec![TokenKind::Keyword(KeywordId::Pass), TokenKind::RBrace, TokenKind::Eof]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""say \"hi\"\n\tdone\\""#),
            vec![TokenKind::String("say \"hi\"\n\tdone\\".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = lex("it \"é\" {").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(3, 7));
        assert_eq!(tokens[2].span, Span::new(8, 9));
    }

    #[test]
    fn test_unknown_word_is_kept() {
        assert_eq!(kinds("expect"), vec![TokenKind::Word("expect".into()), TokenKind::Eof]);
    }

    #[test]
    fn test_unterminated_string_reports_error() {
        let errs = lex("fail \"oops").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("unterminated"));
        assert_eq!(errs[0].span, Span::new(5, 10));
    }

    #[test]
    fn test_all_errors_are_collected() {
        let errs = lex("pass @ fail \"a\\q\" $").unwrap_err();
        assert_eq!(errs.len(), 3, "{errs:?}");
        assert!(errs[0].message.contains('@'));
        assert!(errs[1].message.contains("escape"));
        assert!(errs[2].message.contains('$'));
    }
}
