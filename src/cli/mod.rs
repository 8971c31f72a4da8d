//! CLI module for the describe test runner
//!
//! ## Commands
//!
//! - `run` - Execute the configured suites (default when no subcommand is given)
//! - `list` - Show each selected suite and the files it would run
//! - `check` - Parse every suite file and report syntax errors without executing
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::error::DescribeError;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a library error with its diagnostic context.
    pub fn diagnostic(error: impl Into<DescribeError>) -> Self {
        let report = miette::Report::new(error.into());
        Self::failure(format!("{report:?}"))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<DescribeError> for CliError {
    fn from(error: DescribeError) -> Self {
        Self::diagnostic(error)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Behavior-driven test runner for `.bdd` suite scripts
#[derive(Parser, Debug)]
#[command(name = "describe")]
#[command(version = VERSION)]
#[command(about = "Behavior-driven test runner for .bdd suite scripts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Which configuration to load and which suites to keep.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionArgs {
    /// Configuration file (default: nearest describe.toml upwards from the working directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory suite directories are resolved against
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Middle tag of suite file names (`<name>.<suffix>.bdd`)
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Only these suites (repeatable; configuration order is kept)
    #[arg(long = "suite", value_name = "NAME")]
    pub suites: Vec<String>,
}

/// Options that only affect `run`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Also write a JSON report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Disable ANSI colors (also honored: NO_COLOR)
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the configured suites
    Run(RunArgs),

    /// List suites and their discovered files
    List(SelectionArgs),

    /// Check suite files for syntax errors without running them
    Check(SelectionArgs),
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Some(Command::Run(args)) => commands::run_suites(&args),
        Some(Command::List(selection)) => commands::list_suites(&selection),
        Some(Command::Check(selection)) => commands::check_suites(&selection),
        None => commands::run_suites(&RunArgs::default()),
    }
}

// ============================================================================
// Tests
// ============================================================================
