//! Running a parsed suite script by publishing its lifecycle events.

use std::path::Path;
use std::rc::Rc;

use describe_core::lang::keywords;
use describe_core::{AssertionEvent, Event};
use describe_syntax::ast::{Item, Script, Span, Spanned};
use describe_syntax::diagnostics::line_col;

use crate::bus::EventBus;
use crate::error::{DescribeError, Result};
use crate::tracer::{FrameStack, TraceFrame};

/// One execution of one script.
///
/// Each block publishes its start tag, runs its body, then publishes its end tag; `pass` and `fail` publish
/// `Before` followed by their outcome. While an item runs, its frame sits on the shared [`FrameStack`].
pub struct ScriptRun<'a> {
    path: &'a Path,
    source: &'a str,
    bus: &'a EventBus,
    frames: &'a Rc<FrameStack>,
}

impl<'a> ScriptRun<'a> {
    pub fn new(path: &'a Path, source: &'a str, bus: &'a EventBus, frames: &'a Rc<FrameStack>) -> Self {
        Self {
            path,
            source,
            bus,
            frames,
        }
    }

    /// ## Errors
    /// - the first listener error, unchanged
    /// - [`DescribeError::Aborted`] when an `abort` directive is reached
    pub fn run(&self, script: &Script) -> Result<()> {
        self.items(&script.items)
    }

    fn items(&self, items: &[Spanned<Item>]) -> Result<()> {
        for item in items {
            let _frame = self.frames.enter(self.frame(item));
            match &item.node {
                Item::Block(block) => {
                    self.bus.emit(&Event::syntax(block.kind.start(), &block.label))?;
                    self.items(&block.body)?;
                    self.bus.emit(&Event::syntax(block.kind.end(), &block.label))?;
                }
                Item::Pass => {
                    self.bus.emit(&AssertionEvent::Before.into())?;
                    self.bus.emit(&AssertionEvent::Success.into())?;
                }
                Item::Fail(message) => {
                    self.bus.emit(&AssertionEvent::Before.into())?;
                    self.bus.emit(&Event::failure(message))?;
                }
                Item::Abort(message) => {
                    let (line, _) = self.position(item.span);
                    return Err(DescribeError::Aborted {
                        path: self.path.to_path_buf(),
                        line,
                        message: message.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn frame(&self, item: &Spanned<Item>) -> TraceFrame {
        let (line, column) = self.position(item.span);
        let label = match &item.node {
            Item::Block(block) => block.label.clone(),
            Item::Pass => keywords::as_str(keywords::KeywordId::Pass).to_string(),
            Item::Fail(_) => keywords::as_str(keywords::KeywordId::Fail).to_string(),
            Item::Abort(_) => keywords::as_str(keywords::KeywordId::Abort).to_string(),
        };
        TraceFrame::new(self.path, line, column, label)
    }

    fn position(&self, span: Span) -> (usize, usize) {
        line_col(self.source, span.start)
    }
}
