//! Suite orchestration.
//!
//! [`SuiteRunner`] walks the configured suites in order. For each one it announces the change on the bus and
//! hands over to a [`SuiteExecutor`], which binds the suite's listeners, runs its files, and unbinds again
//! before the next suite starts.

mod suite;
mod tally;

pub use suite::{SuiteExecutor, SuiteHandlers};
pub use tally::{RunTally, SuiteTally};

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use describe_core::Event;

use crate::bus::EventBus;
use crate::config::GlobalOptions;
use crate::error::Result;
use crate::files::{ScriptFiles, SuiteFiles};
use crate::tracer::{FrameStack, FrameTracer, StackTracer};
use crate::writer::SharedWriter;

/// Where informational notices go (stdout by default).
pub type NoticeSink = Rc<RefCell<dyn Write>>;

/// Collaborators shared by the runner and every executor it builds.
#[derive(Clone)]
pub struct SuiteServices {
    pub bus: Rc<EventBus>,
    pub files: Rc<dyn SuiteFiles>,
    pub writer: SharedWriter,
    pub tracer: Rc<dyn StackTracer>,
    pub notices: NoticeSink,
}

impl SuiteServices {
    pub fn new(
        bus: Rc<EventBus>,
        files: Rc<dyn SuiteFiles>,
        writer: SharedWriter,
        tracer: Rc<dyn StackTracer>,
    ) -> Self {
        Self {
            bus,
            files,
            writer,
            tracer,
            notices: Rc::new(RefCell::new(io::stdout())),
        }
    }

    /// Filesystem scripts traced through one shared frame stack.
    pub fn scripted(bus: Rc<EventBus>, writer: SharedWriter) -> Self {
        let frames = FrameStack::shared();
        let files = Rc::new(ScriptFiles::new(Rc::clone(&bus), Rc::clone(&frames)));
        let tracer = Rc::new(FrameTracer::new(frames));
        Self::new(bus, files, writer, tracer)
    }

    pub fn with_notices(mut self, notices: NoticeSink) -> Self {
        self.notices = notices;
        self
    }
}

pub trait Runner {
    /// Register run-wide listeners before `run`. Nothing by default.
    fn bind(&mut self) {}

    fn run(&mut self) -> Result<()>;
}

pub struct SuiteRunner {
    options: GlobalOptions,
    services: SuiteServices,
}

impl SuiteRunner {
    pub fn new(options: GlobalOptions, services: SuiteServices) -> Self {
        Self { options, services }
    }

    pub fn options(&self) -> &GlobalOptions {
        &self.options
    }

    /// Executors in configuration order.
    pub fn executors(&self) -> impl Iterator<Item = SuiteExecutor> + '_ {
        self.options
            .suites
            .iter()
            .map(|suite| SuiteExecutor::new(&self.options, suite, self.services.clone()))
    }
}

impl Runner for SuiteRunner {
    #[tracing::instrument(skip_all, fields(suites = self.options.suites.len()))]
    fn run(&mut self) -> Result<()> {
        for executor in self.executors() {
            self.services
                .bus
                .emit(&Event::SuiteChanged(executor.name().to_string()))?;
            executor.execute()?;
        }
        self.services.writer.borrow_mut().finish()
    }
}
