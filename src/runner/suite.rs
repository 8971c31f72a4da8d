//! One suite's execution: bind listeners, run its files, unbind.

use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use describe_core::conventions;
use describe_core::{AssertionEvent, Event, EventKind, Syntax, SyntaxEvent};

use super::SuiteServices;
use crate::bus::Subscription;
use crate::config::{GlobalOptions, SuiteConfig};
use crate::error::Result;
use crate::tracer::{StackTracer, failure_context};
use crate::writer::SharedWriter;

/// Routes lifecycle events to the writer and tracer for one suite.
///
/// Cloned into each bus listener, so it only holds shared handles.
#[derive(Clone)]
pub struct SuiteHandlers {
    writer: SharedWriter,
    tracer: Rc<dyn StackTracer>,
    marker: String,
}

impl SuiteHandlers {
    pub fn new(writer: SharedWriter, tracer: Rc<dyn StackTracer>, marker: impl Into<String>) -> Self {
        Self {
            writer,
            tracer,
            marker: marker.into(),
        }
    }

    pub fn syntax(&self, event: &SyntaxEvent) -> Result<()> {
        let mut writer = self.writer.borrow_mut();
        let label = event.message.as_str();
        match event.statement {
            Syntax::DescribeStart => writer.open_describe(label),
            Syntax::DescribeEnd => writer.close_describe(label),
            Syntax::ContextStart => writer.open_context(label),
            Syntax::ContextEnd => writer.close_context(label),
            Syntax::ItStart => writer.open_it(label),
            Syntax::ItEnd => writer.close_it(label),
        }
    }

    /// Dispatch a spelled tag, as an external emitter would send it. Unknown tags are ignored.
    pub fn syntax_named(&self, statement: &str, message: &str) -> Result<()> {
        match SyntaxEvent::from_name(statement, message) {
            Some(event) => self.syntax(&event),
            None => {
                tracing::debug!(statement, "ignoring unknown syntax tag");
                Ok(())
            }
        }
    }

    pub fn before(&self) -> Result<()> {
        self.writer.borrow_mut().output_before()
    }

    pub fn success(&self) -> Result<()> {
        let trace = self.tracer.trace(&self.marker, None);
        self.writer.borrow_mut().output_success(&trace)
    }

    pub fn failure(&self, message: &str) -> Result<()> {
        let trace = self.tracer.trace(&self.marker, Some(&failure_context(message)));
        self.writer.borrow_mut().output_failure(&trace)
    }

    /// Register on the bus for `SYNTAX`, `BEFORE`, `SUCCESS` and `FAILURE`.
    pub fn bind(&self, services: &SuiteServices) -> Subscription {
        let mut subscription = Subscription::new(Rc::clone(&services.bus));

        let handlers = self.clone();
        subscription.on(EventKind::Syntax, move |event| match event {
            Event::Syntax(syntax) => handlers.syntax(syntax),
            _ => Ok(()),
        });
        let handlers = self.clone();
        subscription.on(EventKind::Before, move |_| handlers.before());
        let handlers = self.clone();
        subscription.on(EventKind::Success, move |_| handlers.success());
        let handlers = self.clone();
        subscription.on(EventKind::Failure, move |event| match event {
            Event::Assertion(AssertionEvent::Failure { message }) => handlers.failure(message),
            _ => Ok(()),
        });

        subscription
    }
}

/// Executes one configured suite.
pub struct SuiteExecutor {
    name: String,
    directory: PathBuf,
    suffix: String,
    services: SuiteServices,
}

impl SuiteExecutor {
    pub fn new(options: &GlobalOptions, suite: &SuiteConfig, services: SuiteServices) -> Self {
        Self {
            name: suite.name.clone(),
            directory: options.suite_directory(suite),
            suffix: options.suffix.clone(),
            services,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &std::path::Path {
        &self.directory
    }

    pub fn handlers(&self) -> SuiteHandlers {
        SuiteHandlers::new(
            Rc::clone(&self.services.writer),
            Rc::clone(&self.services.tracer),
            self.suffix.clone(),
        )
    }

    /// Listeners stay bound until the returned guard drops.
    pub fn bind(&self) -> Subscription {
        let subscription = self.handlers().bind(&self.services);
        tracing::debug!(suite = %self.name, listeners = subscription.len(), "bound suite listeners");
        subscription
    }

    /// Open the suite, run every matching file, close the suite.
    ///
    /// ## Errors
    /// Discovery, file, and writer errors propagate unchanged. The suite's listeners are unbound on every path.
    #[tracing::instrument(skip_all, fields(suite = %self.name))]
    pub fn execute(&self) -> Result<()> {
        let _subscription = self.bind();

        self.services.writer.borrow_mut().open_suite(&self.name)?;

        let pattern = conventions::file_pattern(&self.suffix);
        let files = self.services.files.find(&self.directory, &pattern)?;
        if files.is_empty() {
            self.notice(&conventions::no_files_notice(&self.name))?;
        }
        for file in &files {
            self.services.files.execute(file)?;
        }

        self.services.writer.borrow_mut().close_suite(&self.name)?;
        tracing::debug!(suite = %self.name, files = files.len(), "suite finished");
        Ok(())
    }

    fn notice(&self, text: &str) -> Result<()> {
        let mut sink = self.services.notices.borrow_mut();
        writeln!(sink, "{text}")?;
        Ok(())
    }
}
