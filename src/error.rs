//! Error types for the describe engine.
//!
//! [`DescribeError`] is the single library error. Syntax errors from `describe_syntax` are lifted into
//! [`ScriptReport`], a `miette` diagnostic that carries the script source so the CLI can render labelled spans.

use std::path::{Path, PathBuf};

use describe_syntax::diagnostics::SyntaxError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::config::ConfigError;

/// Result alias used across the engine.
pub type Result<T, E = DescribeError> = std::result::Result<T, E>;

#[derive(Debug, Error, Diagnostic)]
pub enum DescribeError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(describe::io))]
    Io(#[from] std::io::Error),

    #[error("failed to walk suite directory: {0}")]
    #[diagnostic(code(describe::walk))]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Script(#[from] ScriptReport),

    /// A suite file stopped itself with `abort`.
    #[error("{}:{line}: aborted: {message}", .path.display())]
    #[diagnostic(code(describe::aborted))]
    Aborted {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("failed to write report: {0}")]
    #[diagnostic(code(describe::report))]
    Report(#[from] serde_json::Error),
}

/// One syntax error, positioned in its script.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(describe::syntax))]
pub struct ScriptError {
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
    #[help]
    pub help: Option<String>,
}

/// Every syntax error found in one suite file.
#[derive(Debug, Error, Diagnostic)]
#[error("{} syntax error(s) in {}", .errors.len(), .path.display())]
#[diagnostic(code(describe::script), help("run `describe check` to list problems without executing"))]
pub struct ScriptReport {
    pub path: PathBuf,
    #[related]
    pub errors: Vec<ScriptError>,
}

impl ScriptReport {
    pub fn new(path: &Path, source: &str, errors: Vec<SyntaxError>) -> Self {
        let name = path.display().to_string();
        let errors = errors
            .into_iter()
            .map(|error| ScriptError {
                src: NamedSource::new(&name, source.to_string()),
                span: (error.span.start, error.span.len()).into(),
                help: (!error.hints.is_empty()).then(|| error.hints.join("; ")),
                message: error.message,
            })
            .collect();
        Self {
            path: path.to_path_buf(),
            errors,
        }
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }
}
