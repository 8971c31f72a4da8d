//! Diagnostic frames attached to assertion results.
//!
//! Script execution keeps a [`FrameStack`] of the blocks and directives currently running. A [`StackTracer`]
//! turns that into a [`TraceRecord`] when an assertion reports, so writers can point at the line that produced
//! the outcome.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use describe_core::conventions::{self, MESSAGE_CONTEXT_KEY};
use serde::Serialize;

/// Extra key/value data requested alongside a trace (e.g. the failure message).
pub type TraceContext = BTreeMap<String, String>;

/// One script location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceFrame {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub label: String,
}

impl TraceFrame {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize, label: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            label: label.into(),
        }
    }

    /// `file:line`
    pub fn location(&self) -> String {
        format!("{}:{}", self.file.display(), self.line)
    }
}

/// Frames (innermost first) plus the context the trace was requested with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TraceRecord {
    pub marker: String,
    pub frames: Vec<TraceFrame>,
    pub context: TraceContext,
}

impl TraceRecord {
    /// The failure message, if the trace was requested for a failure.
    pub fn message(&self) -> Option<&str> {
        self.context.get(MESSAGE_CONTEXT_KEY).map(String::as_str)
    }

    /// Innermost frame: the directive that reported.
    pub fn origin(&self) -> Option<&TraceFrame> {
        self.frames.first()
    }
}

/// Context map carrying just a failure message.
pub fn failure_context(message: &str) -> TraceContext {
    TraceContext::from([(MESSAGE_CONTEXT_KEY.to_string(), message.to_string())])
}

pub trait StackTracer {
    /// Capture the current frames belonging to files tagged with `marker`.
    fn trace(&self, marker: &str, context: Option<&TraceContext>) -> TraceRecord;
}

/// Frames of the script code currently executing, outermost at the bottom.
#[derive(Debug, Default)]
pub struct FrameStack {
    frames: RefCell<Vec<TraceFrame>>,
}

impl FrameStack {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Push `frame` for as long as the returned guard lives.
    pub fn enter(self: &Rc<Self>, frame: TraceFrame) -> FrameGuard {
        self.frames.borrow_mut().push(frame);
        FrameGuard {
            stack: Rc::clone(self),
        }
    }

    /// Copy of the stack, innermost frame first.
    pub fn snapshot(&self) -> Vec<TraceFrame> {
        self.frames.borrow().iter().rev().cloned().collect()
    }

    pub fn depth(&self) -> usize {
        self.frames.borrow().len()
    }
}

/// Pops its frame on drop.
#[must_use = "the frame is popped as soon as the guard is dropped"]
pub struct FrameGuard {
    stack: Rc<FrameStack>,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        self.stack.frames.borrow_mut().pop();
    }
}

/// [`StackTracer`] over a shared [`FrameStack`], keeping frames whose file name contains `.<marker>.`.
#[derive(Debug, Clone)]
pub struct FrameTracer {
    stack: Rc<FrameStack>,
}

impl FrameTracer {
    pub fn new(stack: Rc<FrameStack>) -> Self {
        Self { stack }
    }
}

impl StackTracer for FrameTracer {
    fn trace(&self, marker: &str, context: Option<&TraceContext>) -> TraceRecord {
        let fragment = conventions::marker_fragment(marker);
        let frames = self
            .stack
            .snapshot()
            .into_iter()
            .filter(|frame| {
                frame
                    .file
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.contains(&fragment))
            })
            .collect();
        TraceRecord {
            marker: marker.to_string(),
            frames,
            context: context.cloned().unwrap_or_default(),
        }
    }
}
