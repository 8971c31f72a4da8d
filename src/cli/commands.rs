//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::env;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::bus::EventBus;
use crate::config::{ConfigLoader, EnvOverrides, GlobalOptions};
use crate::error::{DescribeError, ScriptReport};
use crate::files;
use crate::runner::{RunTally, Runner, SuiteRunner, SuiteServices};
use crate::writer::{self, ConsoleWriter, JsonReportWriter, Palette, SharedWriter, Writers};

use super::{CliError, CliResult, ExitCode, RunArgs, SelectionArgs};

// ============================================================================
// Configuration
// ============================================================================

/// Load `describe.toml` and apply environment and flag overrides, then validate.
pub fn load_options(selection: &SelectionArgs) -> CliResult<GlobalOptions> {
    let loader = ConfigLoader::with_env(EnvOverrides::from_env());
    let options = match &selection.config {
        Some(path) => loader.load_from_file(path),
        None => {
            let start = env::current_dir()
                .map_err(|e| CliError::failure(format!("Error: cannot read working directory: {e}")))?;
            loader.load_from_directory(&start)
        }
    }
    .map_err(CliError::diagnostic)?;

    let options = apply_selection(options, selection).map_err(CliError::diagnostic)?;
    options.validate().map_err(CliError::diagnostic)?;
    Ok(options)
}

/// Flag overrides, applied last.
pub fn apply_selection(
    mut options: GlobalOptions,
    selection: &SelectionArgs,
) -> Result<GlobalOptions, crate::config::ConfigError> {
    if let Some(suffix) = &selection.suffix {
        options = options.with_suffix(suffix.clone());
    }
    if let Some(cwd) = &selection.cwd {
        options = options.with_cwd(cwd.clone());
    }
    options.select(&selection.suites)
}

// ============================================================================
// run
// ============================================================================

pub fn run_suites(args: &RunArgs) -> CliResult<ExitCode> {
    let options = load_options(&args.selection)?;
    let palette = Palette::for_stdout(args.no_color);
    run_with(options, palette, args.report.clone())
}

/// Run `options` to stdout (plus an optional JSON report) and map the outcome to an exit code.
pub fn run_with(options: GlobalOptions, palette: Palette, report: Option<PathBuf>) -> CliResult<ExitCode> {
    let bus = EventBus::shared();
    let mut outputs = Writers::new();
    outputs.push(writer::shared(ConsoleWriter::stdout(palette)));
    if let Some(path) = report {
        outputs.push(writer::shared(JsonReportWriter::new(path)));
    }
    let sink: SharedWriter = writer::shared(outputs);

    let tally = RunTally::attach(&bus);
    let mut runner = SuiteRunner::new(options, SuiteServices::scripted(bus, sink));
    runner.bind();
    runner.run()?;

    if tally.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

// ============================================================================
// list
// ============================================================================

pub fn list_suites(selection: &SelectionArgs) -> CliResult<ExitCode> {
    let options = load_options(selection)?;
    print!("{}", render_listing(&options)?);
    Ok(ExitCode::SUCCESS)
}

/// One block per suite: the name and directory, then each discovered file.
pub fn render_listing(options: &GlobalOptions) -> CliResult<String> {
    let pattern = options.file_pattern();
    let mut out = String::new();
    for suite in &options.suites {
        let directory = options.suite_directory(suite);
        let found = files::discover(&directory, &pattern)?;
        let _ = writeln!(out, "{} ({})", suite.name, directory.display());
        if found.is_empty() {
            let _ = writeln!(out, "  (no files)");
        }
        for file in found {
            let _ = writeln!(out, "  {}", file.display());
        }
    }
    Ok(out)
}

// ============================================================================
// check
// ============================================================================

pub fn check_suites(selection: &SelectionArgs) -> CliResult<ExitCode> {
    let options = load_options(selection)?;
    let (checked, reports) = check_files(&options)?;

    if reports.is_empty() {
        println!("✓ {checked} file(s) parsed cleanly");
        return Ok(ExitCode::SUCCESS);
    }

    let failed = reports.len();
    for report in reports {
        eprintln!("{:?}", miette::Report::new(report));
    }
    Err(CliError::failure(format!(
        "\n{failed} of {checked} file(s) have syntax errors"
    )))
}

/// Parse every discovered file. Returns how many files were checked and the reports of those that failed.
pub fn check_files(options: &GlobalOptions) -> CliResult<(usize, Vec<ScriptReport>)> {
    let pattern = options.file_pattern();
    let mut checked = 0;
    let mut reports = Vec::new();
    for suite in &options.suites {
        for path in files::discover(&options.suite_directory(suite), &pattern)? {
            checked += 1;
            match files::load(&path) {
                Ok(_) => {}
                Err(DescribeError::Script(report)) => reports.push(report),
                Err(other) => return Err(other.into()),
            }
        }
    }
    Ok((checked, reports))
}
