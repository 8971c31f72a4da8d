//! Structured output sinks.
//!
//! ## Writer Trait
//!
//! A [`Writer`] receives paired open/close calls for every nesting level (suite, describe, context, it) and
//! one leaf call per assertion outcome. Implementations:
//!
//! - [`ConsoleWriter`]: indented terminal tree with a final summary line
//! - [`JsonReportWriter`]: serializable report written to a file at the end of the run
//! - [`Writers`]: fan-out to several writers in order

mod console;
mod json;

pub use console::{ConsoleWriter, Palette};
pub use json::{AssertionOutcome, JsonReportWriter, Report, ReportNode, SuiteReport};

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::tracer::TraceRecord;

pub trait Writer {
    fn open_suite(&mut self, name: &str) -> Result<()>;
    fn close_suite(&mut self, name: &str) -> Result<()>;

    fn open_describe(&mut self, label: &str) -> Result<()>;
    fn close_describe(&mut self, label: &str) -> Result<()>;

    fn open_context(&mut self, label: &str) -> Result<()>;
    fn close_context(&mut self, label: &str) -> Result<()>;

    fn open_it(&mut self, label: &str) -> Result<()>;
    fn close_it(&mut self, label: &str) -> Result<()>;

    /// An assertion is about to report.
    fn output_before(&mut self) -> Result<()>;
    fn output_success(&mut self, trace: &TraceRecord) -> Result<()>;
    fn output_failure(&mut self, trace: &TraceRecord) -> Result<()>;

    /// Called once after the last suite.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A writer shared between the runner, its executors, and whoever built it.
pub type SharedWriter = Rc<RefCell<dyn Writer>>;

pub fn shared<W: Writer + 'static>(writer: W) -> Rc<RefCell<W>> {
    Rc::new(RefCell::new(writer))
}

/// Passed/failed counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub passed: usize,
    pub failed: usize,
}

impl Counts {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

/// Forwards every call to each writer in turn; the first error stops the call.
#[derive(Default)]
pub struct Writers {
    writers: Vec<SharedWriter>,
}

impl Writers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, writer: SharedWriter) {
        self.writers.push(writer);
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }

    fn each(&mut self, mut call: impl FnMut(&mut dyn Writer) -> Result<()>) -> Result<()> {
        for writer in &self.writers {
            call(&mut *writer.borrow_mut())?;
        }
        Ok(())
    }
}

impl Writer for Writers {
    fn open_suite(&mut self, name: &str) -> Result<()> {
        self.each(|w| w.open_suite(name))
    }

    fn close_suite(&mut self, name: &str) -> Result<()> {
        self.each(|w| w.close_suite(name))
    }

    fn open_describe(&mut self, label: &str) -> Result<()> {
        self.each(|w| w.open_describe(label))
    }

    fn close_describe(&mut self, label: &str) -> Result<()> {
        self.each(|w| w.close_describe(label))
    }

    fn open_context(&mut self, label: &str) -> Result<()> {
        self.each(|w| w.open_context(label))
    }

    fn close_context(&mut self, label: &str) -> Result<()> {
        self.each(|w| w.close_context(label))
    }

    fn open_it(&mut self, label: &str) -> Result<()> {
        self.each(|w| w.open_it(label))
    }

    fn close_it(&mut self, label: &str) -> Result<()> {
        self.each(|w| w.close_it(label))
    }

    fn output_before(&mut self) -> Result<()> {
        self.each(|w| w.output_before())
    }

    fn output_success(&mut self, trace: &TraceRecord) -> Result<()> {
        self.each(|w| w.output_success(trace))
    }

    fn output_failure(&mut self, trace: &TraceRecord) -> Result<()> {
        self.each(|w| w.output_failure(trace))
    }

    fn finish(&mut self) -> Result<()> {
        self.each(|w| w.finish())
    }
}
