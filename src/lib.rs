#![forbid(unsafe_code)]
//! describe: a behavior-driven test execution engine
//!
//! Suites are named directories of `*.<suffix>.bdd` scripts. The runner visits each configured suite in order,
//! binds that suite's listeners to an [`EventBus`], runs the suite's files (which publish describe/context/it
//! boundaries and assertion outcomes on the bus), and unbinds again. Listeners turn events into [`Writer`] calls,
//! attaching a [`TraceRecord`] to every outcome.
//!
//! ## Modules
//!
//! - `bus` - publish/subscribe channel and the RAII `Subscription`
//! - `config` - `describe.toml`, environment and flag layering
//! - `files` - suite discovery and script execution
//! - `runner` - `SuiteRunner`, `SuiteExecutor`, `RunTally`
//! - `tracer` - frame stack and `StackTracer`
//! - `writer` - console, JSON, and fan-out writers
//! - `cli` - the `describe` binary's commands
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod bus;
pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod runner;
pub mod script;
pub mod tracer;
pub mod writer;

pub use bus::{EventBus, Handler, ListenerId, Subscription};
pub use config::{ConfigError, ConfigLoader, GlobalOptions, SuiteConfig};
pub use error::{DescribeError, Result, ScriptReport};
pub use files::{ScriptFiles, SuiteFiles};
pub use runner::{RunTally, Runner, SuiteExecutor, SuiteRunner, SuiteServices};
pub use tracer::{FrameTracer, StackTracer, TraceContext, TraceFrame, TraceRecord};
pub use writer::{ConsoleWriter, JsonReportWriter, Writer, Writers};

pub use describe_core::{AssertionEvent, Event, EventKind, Syntax, SyntaxEvent};
