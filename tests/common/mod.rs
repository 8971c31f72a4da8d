//! Recording doubles shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use describe::bus::EventBus;
use describe::runner::SuiteServices;
use describe::tracer::{StackTracer, TraceContext, TraceRecord};
use describe::writer::{SharedWriter, Writer};
use describe::{DescribeError, Event, Result, SuiteFiles};

/// Everything a writer can be asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OpenSuite(String),
    CloseSuite(String),
    OpenDescribe(String),
    CloseDescribe(String),
    OpenContext(String),
    CloseContext(String),
    OpenIt(String),
    CloseIt(String),
    Before,
    Success(TraceRecord),
    Failure(TraceRecord),
    Finish,
}

impl Call {
    /// Short name without payload, for order assertions.
    pub fn name(&self) -> &'static str {
        match self {
            Call::OpenSuite(_) => "open_suite",
            Call::CloseSuite(_) => "close_suite",
            Call::OpenDescribe(_) => "open_describe",
            Call::CloseDescribe(_) => "close_describe",
            Call::OpenContext(_) => "open_context",
            Call::CloseContext(_) => "close_context",
            Call::OpenIt(_) => "open_it",
            Call::CloseIt(_) => "close_it",
            Call::Before => "output_before",
            Call::Success(_) => "output_success",
            Call::Failure(_) => "output_failure",
            Call::Finish => "finish",
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub calls: Vec<Call>,
}

impl RecordingWriter {
    pub fn names(&self) -> Vec<&'static str> {
        self.calls.iter().map(Call::name).collect()
    }
}

impl Writer for RecordingWriter {
    fn open_suite(&mut self, name: &str) -> Result<()> {
        self.calls.push(Call::OpenSuite(name.into()));
        Ok(())
    }
    fn close_suite(&mut self, name: &str) -> Result<()> {
        self.calls.push(Call::CloseSuite(name.into()));
        Ok(())
    }
    fn open_describe(&mut self, label: &str) -> Result<()> {
        self.calls.push(Call::OpenDescribe(label.into()));
        Ok(())
    }
    fn close_describe(&mut self, label: &str) -> Result<()> {
        self.calls.push(Call::CloseDescribe(label.into()));
        Ok(())
    }
    fn open_context(&mut self, label: &str) -> Result<()> {
        self.calls.push(Call::OpenContext(label.into()));
        Ok(())
    }
    fn close_context(&mut self, label: &str) -> Result<()> {
        self.calls.push(Call::CloseContext(label.into()));
        Ok(())
    }
    fn open_it(&mut self, label: &str) -> Result<()> {
        self.calls.push(Call::OpenIt(label.into()));
        Ok(())
    }
    fn close_it(&mut self, label: &str) -> Result<()> {
        self.calls.push(Call::CloseIt(label.into()));
        Ok(())
    }
    fn output_before(&mut self) -> Result<()> {
        self.calls.push(Call::Before);
        Ok(())
    }
    fn output_success(&mut self, trace: &TraceRecord) -> Result<()> {
        self.calls.push(Call::Success(trace.clone()));
        Ok(())
    }
    fn output_failure(&mut self, trace: &TraceRecord) -> Result<()> {
        self.calls.push(Call::Failure(trace.clone()));
        Ok(())
    }
    fn finish(&mut self) -> Result<()> {
        self.calls.push(Call::Finish);
        Ok(())
    }
}

/// Returns a numbered record per request and remembers what was asked.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    pub requests: RefCell<Vec<(String, Option<TraceContext>)>>,
}

impl StackTracer for RecordingTracer {
    fn trace(&self, marker: &str, context: Option<&TraceContext>) -> TraceRecord {
        let mut requests = self.requests.borrow_mut();
        requests.push((marker.to_string(), context.cloned()));
        let mut record_context = context.cloned().unwrap_or_default();
        record_context.insert("request".into(), requests.len().to_string());
        TraceRecord {
            marker: marker.to_string(),
            frames: Vec::new(),
            context: record_context,
        }
    }
}

/// What a scripted file does when executed.
#[derive(Debug, Clone)]
pub enum Script {
    Emit(Vec<Event>),
    /// Emit, then fail with an abort.
    EmitThenAbort(Vec<Event>, String),
}

/// In-memory locator/executor: directories map to files, files map to event scripts.
pub struct ScriptedFiles {
    bus: Rc<EventBus>,
    directories: HashMap<PathBuf, Vec<PathBuf>>,
    scripts: HashMap<PathBuf, Script>,
    pub finds: RefCell<Vec<(PathBuf, String)>>,
    pub executed: RefCell<Vec<PathBuf>>,
    /// Listener count observed on the bus at the start of each execution.
    pub listeners_seen: RefCell<Vec<usize>>,
}

impl ScriptedFiles {
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            bus,
            directories: HashMap::new(),
            scripts: HashMap::new(),
            finds: RefCell::new(Vec::new()),
            executed: RefCell::new(Vec::new()),
            listeners_seen: RefCell::new(Vec::new()),
        }
    }

    pub fn file(mut self, directory: impl Into<PathBuf>, name: &str, script: Script) -> Self {
        let directory = directory.into();
        let path = directory.join(name);
        self.directories.entry(directory).or_default().push(path.clone());
        self.scripts.insert(path, script);
        self
    }
}

impl SuiteFiles for ScriptedFiles {
    fn find(&self, directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        self.finds
            .borrow_mut()
            .push((directory.to_path_buf(), pattern.to_string()));
        Ok(self.directories.get(directory).cloned().unwrap_or_default())
    }

    fn execute(&self, path: &Path) -> Result<()> {
        self.executed.borrow_mut().push(path.to_path_buf());
        self.listeners_seen.borrow_mut().push(self.bus.total_listeners());
        let (events, abort) = match self.scripts.get(path) {
            Some(Script::Emit(events)) => (events.clone(), None),
            Some(Script::EmitThenAbort(events, message)) => (events.clone(), Some(message.clone())),
            None => (Vec::new(), None),
        };
        for event in &events {
            self.bus.emit(event)?;
        }
        match abort {
            Some(message) => Err(DescribeError::Aborted {
                path: path.to_path_buf(),
                line: 1,
                message,
            }),
            None => Ok(()),
        }
    }
}

/// A wired test harness: bus, recording writer and tracer, scripted files, captured notices.
pub struct Harness {
    pub bus: Rc<EventBus>,
    pub writer: Rc<RefCell<RecordingWriter>>,
    pub tracer: Rc<RecordingTracer>,
    pub files: Rc<ScriptedFiles>,
    pub notices: Rc<RefCell<Vec<u8>>>,
}

impl Harness {
    pub fn new(configure: impl FnOnce(ScriptedFiles) -> ScriptedFiles) -> Self {
        let bus = EventBus::shared();
        let files = Rc::new(configure(ScriptedFiles::new(Rc::clone(&bus))));
        Self {
            bus,
            writer: Rc::new(RefCell::new(RecordingWriter::default())),
            tracer: Rc::new(RecordingTracer::default()),
            files,
            notices: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn services(&self) -> SuiteServices {
        let writer: SharedWriter = self.writer.clone();
        SuiteServices::new(
            Rc::clone(&self.bus),
            self.files.clone(),
            writer,
            self.tracer.clone(),
        )
        .with_notices(self.notices.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.writer.borrow().calls.clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.writer.borrow().names()
    }

    pub fn notices(&self) -> String {
        String::from_utf8(self.notices.borrow().clone()).unwrap()
    }
}
