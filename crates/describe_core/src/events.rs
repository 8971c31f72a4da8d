//! The lifecycle event protocol.
//!
//! Suite scripts (or any other emitter) publish [`Event`]s on the runner's event bus. Listeners register per
//! [`EventKind`]; the payload travels in the event itself.
//!
//! ## Notes
//! - [`Syntax`] and [`AssertionEvent`] are closed sets. An unknown tag cannot be constructed in-process; only
//!   [`Syntax::from_name`] sees arbitrary spellings, and it answers `None` for them.
//! - Spellings (`as_str`) are stable and used in JSON reports and diagnostics.
//!
//! ## Examples
//! ```rust
//! use describe_core::events::{Event, EventKind, Syntax, SyntaxEvent};
//!
//! let event = Event::Syntax(SyntaxEvent::new(Syntax::DescribeStart, "Adder"));
//! assert_eq!(event.kind(), EventKind::Syntax);
//! assert_eq!(Syntax::from_name("describe_start"), Some(Syntax::DescribeStart));
//! assert_eq!(Syntax::from_name("describe_middle"), None);
//! ```

use std::fmt;

use crate::lang::blocks::BlockKind;

/// Registration key on the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// The runner moved on to another suite.
    SuiteChanged,
    /// A describe/context/it boundary.
    Syntax,
    /// An assertion is about to be evaluated.
    Before,
    /// An assertion held.
    Success,
    /// An assertion did not hold.
    Failure,
}

/// Every event kind, in protocol order.
pub const EVENT_KINDS: &[EventKind] = &[
    EventKind::SuiteChanged,
    EventKind::Syntax,
    EventKind::Before,
    EventKind::Success,
    EventKind::Failure,
];

impl EventKind {
    /// Stable spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::SuiteChanged => "suite_changed",
            EventKind::Syntax => "syntax",
            EventKind::Before => "before",
            EventKind::Success => "success",
            EventKind::Failure => "failure",
        }
    }

    /// Lookup by spelling.
    pub fn from_name(name: &str) -> Option<EventKind> {
        EVENT_KINDS.iter().copied().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural boundary tag carried by a syntax event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    DescribeStart,
    DescribeEnd,
    ContextStart,
    ContextEnd,
    ItStart,
    ItEnd,
}

/// Every syntax tag, starts before ends per block kind.
pub const SYNTAX_TAGS: &[Syntax] = &[
    Syntax::DescribeStart,
    Syntax::DescribeEnd,
    Syntax::ContextStart,
    Syntax::ContextEnd,
    Syntax::ItStart,
    Syntax::ItEnd,
];

impl Syntax {
    /// Stable spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Syntax::DescribeStart => "describe_start",
            Syntax::DescribeEnd => "describe_end",
            Syntax::ContextStart => "context_start",
            Syntax::ContextEnd => "context_end",
            Syntax::ItStart => "it_start",
            Syntax::ItEnd => "it_end",
        }
    }

    /// Lookup by spelling; `None` for anything outside the closed set.
    pub fn from_name(name: &str) -> Option<Syntax> {
        SYNTAX_TAGS.iter().copied().find(|s| s.as_str() == name)
    }

    /// The block kind this tag belongs to.
    pub fn block(self) -> BlockKind {
        match self {
            Syntax::DescribeStart | Syntax::DescribeEnd => BlockKind::Describe,
            Syntax::ContextStart | Syntax::ContextEnd => BlockKind::Context,
            Syntax::ItStart | Syntax::ItEnd => BlockKind::It,
        }
    }

    /// Whether this tag opens a block.
    pub fn is_start(self) -> bool {
        matches!(self, Syntax::DescribeStart | Syntax::ContextStart | Syntax::ItStart)
    }

    /// The matching end tag for a start tag.
    pub fn closing(self) -> Option<Syntax> {
        if self.is_start() { Some(self.block().end()) } else { None }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A syntax tag paired with the block's human-readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxEvent {
    pub statement: Syntax,
    pub message: String,
}

impl SyntaxEvent {
    pub fn new(statement: Syntax, message: impl Into<String>) -> Self {
        Self {
            statement,
            message: message.into(),
        }
    }

    /// Build from a spelled tag, as received from an external emitter.
    ///
    /// ## Returns
    /// - `None` when `statement` is not a known tag; such events carry no output.
    pub fn from_name(statement: &str, message: impl Into<String>) -> Option<Self> {
        Syntax::from_name(statement).map(|s| Self::new(s, message))
    }
}

/// Per-assertion outcome marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionEvent {
    Before,
    Success,
    Failure { message: String },
}

impl AssertionEvent {
    pub fn failure(message: impl Into<String>) -> Self {
        AssertionEvent::Failure {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            AssertionEvent::Before => EventKind::Before,
            AssertionEvent::Success => EventKind::Success,
            AssertionEvent::Failure { .. } => EventKind::Failure,
        }
    }
}

/// Anything published on the event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SuiteChanged(String),
    Syntax(SyntaxEvent),
    Assertion(AssertionEvent),
}

impl Event {
    /// The bus key listeners register under.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::SuiteChanged(_) => EventKind::SuiteChanged,
            Event::Syntax(_) => EventKind::Syntax,
            Event::Assertion(assertion) => assertion.kind(),
        }
    }

    pub fn syntax(statement: Syntax, message: impl Into<String>) -> Self {
        Event::Syntax(SyntaxEvent::new(statement, message))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Event::Assertion(AssertionEvent::failure(message))
    }
}

impl From<SyntaxEvent> for Event {
    fn from(event: SyntaxEvent) -> Self {
        Event::Syntax(event)
    }
}

impl From<AssertionEvent> for Event {
    fn from(event: AssertionEvent) -> Self {
        Event::Assertion(event)
    }
}
