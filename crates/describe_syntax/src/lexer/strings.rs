//! String literal scanning.

use super::{Lexer, TokenKind};
use crate::ast::Span;
use crate::diagnostics::SyntaxError;

impl<'a> Lexer<'a> {
    /// Scan a double-quoted string. The opening quote has already been consumed.
    pub(super) fn scan_string(&mut self, start: usize) {
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('"') => {
                    self.add_token(TokenKind::String(value), start);
                    return;
                }
                Some('\\') => {
                    let escape_start = self.current_pos - 1;
                    match self.advance() {
                        Some('"') => value.push('"'),
                        Some('\\') => value.push('\\'),
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some(other) => {
                            self.errors.push(
                                SyntaxError::new(
                                    format!("unknown escape sequence `\\{other}`"),
                                    Span::new(escape_start, self.current_pos),
                                )
                                .with_hint("supported escapes are \\\" \\\\ \\n \\t"),
                            );
                        }
                        None => break,
                    }
                }
                Some(c) => value.push(c),
                None => break,
            }
        }

        self.errors.push(
            SyntaxError::new("unterminated string literal", Span::new(start, self.current_pos))
                .with_hint("close the string with `\"`"),
        );
    }
}
