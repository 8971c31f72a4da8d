//! Locating suite files on disk and running them.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use describe_core::conventions;
use describe_syntax::ast::Script;
use walkdir::{DirEntry, WalkDir};

use crate::bus::EventBus;
use crate::error::{Result, ScriptReport};
use crate::script::ScriptRun;
use crate::tracer::FrameStack;

/// Find and execute suite files.
///
/// The runner only sees this trait, so discovery and execution can be replaced (tests use a scripted double).
pub trait SuiteFiles {
    /// Files under `directory` whose names end with `pattern`, in execution order.
    fn find(&self, directory: &Path, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Load and run one file in this process. Lifecycle events are published on the bus while it runs.
    fn execute(&self, path: &Path) -> Result<()>;
}

/// Recursively list suite files under `directory`.
///
/// Entries are visited in file-name order, depth first; hidden files and directories are skipped. A missing
/// directory yields no files.
pub fn discover(directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        tracing::warn!(directory = %directory.display(), "suite directory does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(directory)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| conventions::is_suite_file(name, pattern))
        {
            files.push(entry.into_path());
        }
    }
    tracing::debug!(directory = %directory.display(), pattern, count = files.len(), "discovered suite files");
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Read and parse one suite file.
///
/// ## Errors
/// I/O failures, or a [`ScriptReport`] holding every syntax error in the file.
pub fn load(path: &Path) -> Result<(String, Script)> {
    let source = fs::read_to_string(path)?;
    match describe_syntax::parse_source(&source) {
        Ok(script) => Ok((source, script)),
        Err(errors) => Err(ScriptReport::new(path, &source, errors).into()),
    }
}

/// Filesystem-backed [`SuiteFiles`] for `.bdd` suite scripts.
pub struct ScriptFiles {
    bus: Rc<EventBus>,
    frames: Rc<FrameStack>,
}

impl ScriptFiles {
    pub fn new(bus: Rc<EventBus>, frames: Rc<FrameStack>) -> Self {
        Self { bus, frames }
    }
}

impl SuiteFiles for ScriptFiles {
    fn find(&self, directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        discover(directory, pattern)
    }

    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    fn execute(&self, path: &Path) -> Result<()> {
        let (source, script) = load(path)?;
        tracing::debug!(assertions = script.assertion_count(), "running suite file");
        ScriptRun::new(path, &source, &self.bus, &self.frames).run(&script)
    }
}
