//! Parser for suite scripts
//!
//! Converts a token stream into a [`Script`], enforcing the placement rules the lexer cannot see:
//! - `pass` / `fail` only inside an `it` block,
//! - no blocks nested inside an `it` block,
//! - every block has a label string and a braced body.
//!
//! ## Examples
//!
//! ```rust
//! use describe_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("describe \"Adder\" {\n  it \"adds\" {\n    pass\n  }\n}\n").unwrap();
//! let script = parser::parse(&tokens).unwrap();
//! assert_eq!(script.assertion_count(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::SyntaxError;
use crate::lexer::{Token, TokenKind};
use describe_core::lang::blocks::BlockKind;
use describe_core::lang::keywords::{self, KeywordId};

// NOTE: split across files with `include!` so every parser method stays in one module.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/items.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
