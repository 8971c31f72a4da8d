//! Syntax frontend for describe suite scripts: lexer, parser, AST, diagnostics.
//!
//! A suite script declares nested `describe` / `context` / `it` blocks and the recorded outcome of each assertion
//! (`pass`, `fail "<message>"`). This crate only turns text into a checked [`ast::Script`]; running it is the
//! runner's job.
//!
//! ## Notes
//! - Vocabulary identity (keywords, block kinds) comes from `describe_core::lang`.
//! - Errors are collected, not short-circuited: one pass reports every problem in a file.
//!
//! ## Examples
//! ```rust
//! use describe_syntax::ast::Item;
//!
//! let script = describe_syntax::parse_source("describe \"Adder\" {\n  it \"adds\" { pass }\n}\n").unwrap();
//! assert_eq!(script.items.len(), 1);
//! assert!(matches!(script.items[0].node, Item::Block(_)));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;

use ast::Script;
use diagnostics::SyntaxError;

/// Lex and parse a whole script.
///
/// ## Errors
/// Returns every lexer error if lexing fails, otherwise every parser error.
pub fn parse_source(source: &str) -> Result<Script, Vec<SyntaxError>> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens)
}
