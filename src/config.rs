//! Run configuration: suites, working directory, and file suffix.
//!
//! Sources, lowest precedence first:
//! 1. `describe.toml`, given explicitly or found by walking up from the working directory
//! 2. Environment variables (`DESCRIBE_SUFFIX`, `DESCRIBE_CWD`)
//! 3. CLI flags (applied by the caller through [`GlobalOptions::with_suffix`], [`GlobalOptions::with_cwd`] and
//!    [`GlobalOptions::select`])
//!
//! Call [`GlobalOptions::validate`] once every layer is applied.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use describe_core::conventions::{self, CONFIG_FILE_NAME, DEFAULT_SUFFIX};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SUFFIX_ENV: &str = "DESCRIBE_SUFFIX";
pub const CWD_ENV: &str = "DESCRIBE_CWD";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("no describe.toml found in {} or any parent directory", .0.display())]
    #[diagnostic(code(describe::config::not_found), help("create one with at least one [[suites]] entry"))]
    NotFound(PathBuf),

    #[error("failed to read configuration file {}: {error}", .file.display())]
    #[diagnostic(code(describe::config::io))]
    Io { file: PathBuf, error: std::io::Error },

    #[error("invalid TOML in {}: {error}", .file.display())]
    #[diagnostic(code(describe::config::toml))]
    Toml { file: PathBuf, error: toml::de::Error },

    #[error("invalid configuration: {0}")]
    #[diagnostic(code(describe::config::invalid))]
    Invalid(String),

    #[error("unknown suite `{name}` (configured: {})", .available.join(", "))]
    #[diagnostic(code(describe::config::unknown_suite))]
    UnknownSuite { name: String, available: Vec<String> },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// One named suite and the directory (relative to the run's cwd) holding its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    pub name: String,
    pub directory: String,
}

impl SuiteConfig {
    pub fn new(name: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
        }
    }
}

/// On-disk shape of `describe.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    suffix: Option<String>,
    cwd: Option<PathBuf>,
    #[serde(default)]
    suites: Vec<SuiteConfig>,
}

/// Everything a run reads; never mutated once the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    pub cwd: PathBuf,
    pub suffix: String,
    pub suites: Vec<SuiteConfig>,
}

impl GlobalOptions {
    pub fn new(cwd: impl Into<PathBuf>, suites: Vec<SuiteConfig>) -> Self {
        Self {
            cwd: cwd.into(),
            suffix: DEFAULT_SUFFIX.to_string(),
            suites,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// `cwd/<suite.directory>`
    pub fn suite_directory(&self, suite: &SuiteConfig) -> PathBuf {
        self.cwd.join(&suite.directory)
    }

    /// File name ending that marks a suite file, e.g. `.spec.bdd`.
    pub fn file_pattern(&self) -> String {
        conventions::file_pattern(&self.suffix)
    }

    /// Keep only the named suites, in configuration order. An empty `names` keeps everything.
    ///
    /// ## Errors
    /// [`ConfigError::UnknownSuite`] for the first name that matches no configured suite.
    pub fn select(mut self, names: &[String]) -> ConfigResult<Self> {
        if names.is_empty() {
            return Ok(self);
        }
        if let Some(missing) = names
            .iter()
            .find(|name| !self.suites.iter().any(|suite| &suite.name == *name))
        {
            return Err(ConfigError::UnknownSuite {
                name: missing.clone(),
                available: self.suites.iter().map(|s| s.name.clone()).collect(),
            });
        }
        self.suites.retain(|suite| names.contains(&suite.name));
        Ok(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.suffix.is_empty() {
            return Err(ConfigError::Invalid("suffix must not be empty".into()));
        }
        if self.suffix.contains(['.', '/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "suffix `{}` must not contain dots or path separators",
                self.suffix
            )));
        }
        if self.suites.is_empty() {
            return Err(ConfigError::Invalid("at least one suite is required".into()));
        }

        let mut seen = HashSet::new();
        for suite in &self.suites {
            if suite.name.trim().is_empty() {
                return Err(ConfigError::Invalid("suite names must not be empty".into()));
            }
            if !seen.insert(suite.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate suite name `{}`", suite.name)));
            }
            if suite.directory.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "suite `{}` has an empty directory",
                    suite.name
                )));
            }
            if Path::new(&suite.directory).is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "suite `{}` directory `{}` must be relative to cwd",
                    suite.name, suite.directory
                )));
            }
        }
        Ok(())
    }
}

/// Values taken from `DESCRIBE_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub suffix: Option<String>,
    pub cwd: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            suffix: env::var(SUFFIX_ENV).ok().filter(|s| !s.is_empty()),
            cwd: env::var_os(CWD_ENV)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Finds, parses, and layers configuration.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    overrides: EnvOverrides,
}

impl ConfigLoader {
    /// A loader that ignores the environment.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(overrides: EnvOverrides) -> Self {
        Self { overrides }
    }

    /// Walk up from `start_dir` to the first directory containing `describe.toml` and load it.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<GlobalOptions> {
        let mut current = start_dir;
        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return self.load_from_file(&candidate);
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => return Err(ConfigError::NotFound(start_dir.to_path_buf())),
            }
        }
    }

    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<GlobalOptions> {
        let text = fs::read_to_string(config_path).map_err(|error| ConfigError::Io {
            file: config_path.to_path_buf(),
            error,
        })?;
        let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
        let options = self.parse_str(&text, base_dir, config_path)?;
        tracing::debug!(
            path = %config_path.display(),
            suites = options.suites.len(),
            "loaded configuration"
        );
        Ok(options)
    }

    /// Parse `text` as `describe.toml`. A relative `cwd` resolves against `base_dir`; `origin` names the file in
    /// errors.
    pub fn parse_str(&self, text: &str, base_dir: &Path, origin: &Path) -> ConfigResult<GlobalOptions> {
        let file: ConfigFile = toml::from_str(text).map_err(|error| ConfigError::Toml {
            file: origin.to_path_buf(),
            error,
        })?;

        let cwd = match file.cwd {
            Some(cwd) => base_dir.join(cwd),
            None => base_dir.to_path_buf(),
        };
        let mut options = GlobalOptions::new(cwd, file.suites);
        if let Some(suffix) = file.suffix {
            options.suffix = suffix;
        }
        Ok(self.apply_env_overrides(options))
    }

    fn apply_env_overrides(&self, mut options: GlobalOptions) -> GlobalOptions {
        if let Some(suffix) = &self.overrides.suffix {
            options.suffix = suffix.clone();
        }
        if let Some(cwd) = &self.overrides.cwd {
            options.cwd = cwd.clone();
        }
        options
    }
}
