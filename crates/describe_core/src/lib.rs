//! Provide the canonical lifecycle vocabulary shared by the describe engine, its script syntax, and its writers.
//!
//! This crate is intentionally small and dependency-free. It contains:
//! - the closed event protocol (`events`): event kinds, syntax tags, assertion outcomes,
//! - the suite-script keyword registry (`lang`),
//! - the naming conventions that tie suites to files on disk (`conventions`).
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no runner-specific types.
//! - Every tag is a closed enum so dispatch over it is exhaustive at build time. String spellings exist only at
//!   the boundaries (diagnostics, reports, external emitters) and are looked up through registry tables.

pub mod conventions;
pub mod events;
pub mod lang;

pub use events::{AssertionEvent, Event, EventKind, Syntax, SyntaxEvent};
