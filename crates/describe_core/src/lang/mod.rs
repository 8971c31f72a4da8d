//! Suite-script vocabulary registries.
//!
//! Callers work with stable IDs (`KeywordId`, `BlockKind`) and look up spellings through the registry tables
//! instead of comparing strings across the codebase.
//!
//! ## Examples
//! ```rust
//! use describe_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("describe"), Some(KeywordId::Describe));
//! assert_eq!(keywords::as_str(KeywordId::Fail), "fail");
//! ```

pub mod blocks;
pub mod keywords;
