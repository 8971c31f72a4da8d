//! Naming conventions that tie configured suites to files on disk.
//!
//! A suite file is named `<anything>.<suffix>.<SUITE_FILE_EXTENSION>`, e.g. `adder.spec.bdd` for the default
//! suffix. The suffix doubles as the stack-trace marker: frames from files carrying it are the ones worth
//! showing next to a result.
//!
//! ## Examples
//! ```rust
//! use describe_core::conventions;
//!
//! assert_eq!(conventions::file_pattern("spec"), ".spec.bdd");
//! assert!(conventions::is_suite_file("adder.spec.bdd", ".spec.bdd"));
//! assert!(!conventions::is_suite_file(".spec.bdd", ".spec.bdd"));
//! ```

/// Suffix used when configuration does not set one.
pub const DEFAULT_SUFFIX: &str = "spec";

/// Fixed extension of suite script files.
pub const SUITE_FILE_EXTENSION: &str = "bdd";

/// Configuration file searched for from the working directory upwards.
pub const CONFIG_FILE_NAME: &str = "describe.toml";

/// Context key under which a failure message is attached to a trace request.
pub const MESSAGE_CONTEXT_KEY: &str = "message";

/// Filename pattern for a suffix: `.<suffix>.<extension>`.
pub fn file_pattern(suffix: &str) -> String {
    format!(".{suffix}.{SUITE_FILE_EXTENSION}")
}

/// Fragment a file name must contain to count as a suite file for trace filtering.
pub fn marker_fragment(marker: &str) -> String {
    format!(".{marker}.")
}

/// Whether `file_name` matches `pattern` and has a non-empty stem before it.
pub fn is_suite_file(file_name: &str, pattern: &str) -> bool {
    file_name.len() > pattern.len() && file_name.ends_with(pattern)
}

/// Informational notice printed when a suite has no files.
pub fn no_files_notice(suite_name: &str) -> String {
    format!("No test files detected for {suite_name} test suite.")
}
