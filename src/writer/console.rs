//! Terminal rendering: an indented tree per suite and a summary line at the end.

use std::env;
use std::io::{self, IsTerminal, Write};

use super::{Counts, Writer};
use crate::error::Result;
use crate::tracer::TraceRecord;

/// ANSI escapes used by [`ConsoleWriter`]; all empty for plain output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bold: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const fn ansi() -> Self {
        Self {
            bold: "\x1b[1m",
            green: "\x1b[32m",
            red: "\x1b[31m",
            dim: "\x1b[2m",
            reset: "\x1b[0m",
        }
    }

    pub const fn plain() -> Self {
        Self {
            bold: "",
            green: "",
            red: "",
            dim: "",
            reset: "",
        }
    }

    /// Color only for a terminal stdout, unless disabled by flag or `NO_COLOR`.
    pub fn for_stdout(no_color: bool) -> Self {
        if no_color || env::var_os("NO_COLOR").is_some() || !io::stdout().is_terminal() {
            Self::plain()
        } else {
            Self::ansi()
        }
    }
}

pub struct ConsoleWriter<W: Write> {
    out: W,
    palette: Palette,
    depth: usize,
    suite: Counts,
    totals: Counts,
}

impl ConsoleWriter<io::Stdout> {
    pub fn stdout(palette: Palette) -> Self {
        Self::new(io::stdout(), palette)
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self {
            out,
            palette,
            depth: 0,
            suite: Counts::default(),
            totals: Counts::default(),
        }
    }

    /// Counts across every suite written so far.
    pub fn totals(&self) -> Counts {
        self.totals
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }

    fn open(&mut self, label: &str) -> Result<()> {
        writeln!(self.out, "{}{label}", self.indent())?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn location(&self, trace: &TraceRecord) -> String {
        let Palette { dim, reset, .. } = self.palette;
        trace
            .origin()
            .map(|frame| format!(" {dim}({}){reset}", frame.location()))
            .unwrap_or_default()
    }
}

impl<W: Write> Writer for ConsoleWriter<W> {
    fn open_suite(&mut self, name: &str) -> Result<()> {
        let Palette { bold, reset, .. } = self.palette;
        writeln!(self.out, "{bold}{name}{reset}")?;
        self.depth = 1;
        self.suite = Counts::default();
        Ok(())
    }

    fn close_suite(&mut self, _name: &str) -> Result<()> {
        let Counts { passed, failed } = self.suite;
        writeln!(self.out, "  {passed} passed, {failed} failed")?;
        writeln!(self.out)?;
        self.depth = 0;
        Ok(())
    }

    fn open_describe(&mut self, label: &str) -> Result<()> {
        self.open(label)
    }

    fn close_describe(&mut self, _label: &str) -> Result<()> {
        self.close()
    }

    fn open_context(&mut self, label: &str) -> Result<()> {
        self.open(label)
    }

    fn close_context(&mut self, _label: &str) -> Result<()> {
        self.close()
    }

    fn open_it(&mut self, label: &str) -> Result<()> {
        self.open(label)
    }

    fn close_it(&mut self, _label: &str) -> Result<()> {
        self.close()
    }

    fn output_before(&mut self) -> Result<()> {
        Ok(())
    }

    fn output_success(&mut self, trace: &TraceRecord) -> Result<()> {
        self.suite.passed += 1;
        self.totals.passed += 1;
        let Palette { green, reset, .. } = self.palette;
        let location = self.location(trace);
        writeln!(self.out, "{}{green}✓ passed{reset}{location}", self.indent())?;
        Ok(())
    }

    fn output_failure(&mut self, trace: &TraceRecord) -> Result<()> {
        self.suite.failed += 1;
        self.totals.failed += 1;
        let Palette { red, reset, .. } = self.palette;
        let message = trace.message().unwrap_or("failed");
        let location = self.location(trace);
        writeln!(self.out, "{}{red}✗ {message}{reset}{location}", self.indent())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let Counts { passed, failed } = self.totals;
        let Palette { bold, reset, .. } = self.palette;
        let color = if failed > 0 { self.palette.red } else { self.palette.green };
        writeln!(
            self.out,
            "{bold}{color}====== {passed} passed, {failed} failed ======{reset}"
        )?;
        self.out.flush()?;
        Ok(())
    }
}
