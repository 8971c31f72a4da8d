//! Property-based tests for the describe engine
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

mod common;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use common::{Call, Harness, RecordingWriter, Script};
use describe::bus::EventBus;
use describe::config::{GlobalOptions, SuiteConfig};
use describe::runner::{Runner, SuiteExecutor, SuiteRunner, SuiteServices};
use describe::script::ScriptRun;
use describe::tracer::{FrameStack, FrameTracer};
use describe::writer::SharedWriter;
use describe::{AssertionEvent, Event, SuiteFiles, Syntax};
use describe_core::lang::blocks::BlockKind;
use describe_core::lang::keywords;
use proptest::prelude::*;

// =============================================================================
// Generated suite scripts
// =============================================================================

#[derive(Debug, Clone)]
enum Node {
    Block(BlockKind, String, Vec<Node>),
    Pass,
    Fail(String),
}

fn label() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,8}"
}

fn assertion() -> impl Strategy<Value = Node> {
    prop_oneof![Just(Node::Pass), label().prop_map(Node::Fail)]
}

fn it_block() -> impl Strategy<Value = Node> {
    (label(), prop::collection::vec(assertion(), 0..4)).prop_map(|(l, body)| Node::Block(BlockKind::It, l, body))
}

fn block() -> impl Strategy<Value = Node> {
    it_block().prop_recursive(3, 24, 4, |inner| {
        (
            prop_oneof![Just(BlockKind::Describe), Just(BlockKind::Context)],
            label(),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(kind, l, body)| Node::Block(kind, l, body))
    })
}

fn render(nodes: &[Node], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            Node::Block(kind, label, body) => {
                out.push_str(&format!("{indent}{} \"{label}\" {{\n", keywords::as_str(kind.keyword())));
                render(body, depth + 1, out);
                out.push_str(&format!("{indent}}}\n"));
            }
            Node::Pass => out.push_str(&format!("{indent}pass\n")),
            Node::Fail(message) => out.push_str(&format!("{indent}fail \"{message}\"\n")),
        }
    }
}

fn expected_calls(nodes: &[Node], out: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Block(kind, label, body) => {
                out.push(format!("open_{}({label})", keywords::as_str(kind.keyword())));
                expected_calls(body, out);
                out.push(format!("close_{}({label})", keywords::as_str(kind.keyword())));
            }
            Node::Pass => out.extend(["output_before".to_string(), "output_success".to_string()]),
            Node::Fail(message) => out.extend(["output_before".to_string(), format!("output_failure({message})")]),
        }
    }
}

fn describe_call(call: &Call) -> String {
    match call {
        Call::OpenSuite(l) | Call::CloseSuite(l) => format!("{}({l})", call.name()),
        Call::OpenDescribe(l) | Call::CloseDescribe(l) => format!("{}({l})", call.name()),
        Call::OpenContext(l) | Call::CloseContext(l) => format!("{}({l})", call.name()),
        Call::OpenIt(l) | Call::CloseIt(l) => format!("{}({l})", call.name()),
        Call::Failure(trace) => format!("output_failure({})", trace.message().unwrap_or_default()),
        other => other.name().to_string(),
    }
}

/// One in-memory suite file, parsed and run like a file on disk.
struct MemoryScript {
    path: PathBuf,
    source: String,
    bus: Rc<EventBus>,
    frames: Rc<FrameStack>,
}

impl SuiteFiles for MemoryScript {
    fn find(&self, _directory: &Path, _pattern: &str) -> describe::Result<Vec<PathBuf>> {
        Ok(vec![self.path.clone()])
    }

    fn execute(&self, path: &Path) -> describe::Result<()> {
        let script = describe_syntax::parse_source(&self.source)
            .map_err(|errors| describe::ScriptReport::new(path, &self.source, errors))?;
        ScriptRun::new(path, &self.source, &self.bus, &self.frames).run(&script)
    }
}

proptest! {
    /// Property: every generated script parses, and the writer sees exactly its tree, bracketed by one
    /// open_suite/close_suite pair, with a located trace on every outcome.
    #[test]
    fn writer_calls_mirror_the_script(nodes in prop::collection::vec(block(), 0..4)) {
        let mut source = String::new();
        render(&nodes, 0, &mut source);

        let bus = EventBus::shared();
        let frames = FrameStack::shared();
        let writer = Rc::new(RefCell::new(RecordingWriter::default()));
        let shared: SharedWriter = writer.clone();
        let files = Rc::new(MemoryScript {
            path: PathBuf::from("mem.spec.bdd"),
            source: source.clone(),
            bus: Rc::clone(&bus),
            frames: Rc::clone(&frames),
        });
        let services = SuiteServices::new(Rc::clone(&bus), files, shared, Rc::new(FrameTracer::new(frames)));
        let options = GlobalOptions::new(".", vec![SuiteConfig::new("Gen", "gen")]);

        SuiteExecutor::new(&options, &options.suites[0], services).execute().unwrap();

        let mut expected = vec!["open_suite(Gen)".to_string()];
        expected_calls(&nodes, &mut expected);
        expected.push("close_suite(Gen)".to_string());

        let calls = writer.borrow().calls.clone();
        let actual: Vec<String> = calls.iter().map(describe_call).collect();
        prop_assert_eq!(actual, expected);

        for call in &calls {
            if let Call::Success(trace) | Call::Failure(trace) = call {
                let origin = trace.origin().unwrap();
                prop_assert!(origin.line >= 1);
                prop_assert!(origin.label == "pass" || origin.label == "fail");
            }
        }
        prop_assert_eq!(bus.total_listeners(), 0);
    }

    /// Property: whatever the suite layout and wherever a file aborts, suites run in order, nothing after the
    /// abort runs, and no listener outlives its suite.
    #[test]
    fn suites_run_in_order_and_always_unbind(
        layout in prop::collection::vec(0usize..3, 1..6),
        abort_at in prop::option::of((0usize..6, 0usize..3)),
    ) {
        let success_file = vec![
            Event::syntax(Syntax::ItStart, "x"),
            AssertionEvent::Before.into(),
            AssertionEvent::Success.into(),
            Event::syntax(Syntax::ItEnd, "x"),
        ];
        let harness = Harness::new(|mut files| {
            for (suite, count) in layout.iter().enumerate() {
                for file in 0..*count {
                    let script = if abort_at == Some((suite, file)) {
                        Script::EmitThenAbort(success_file.clone(), "stop".into())
                    } else {
                        Script::Emit(success_file.clone())
                    };
                    files = files.file(format!("/p/s{suite}"), &format!("f{file}.spec.bdd"), script);
                }
            }
            files
        });
        let suites = (0..layout.len()).map(|i| SuiteConfig::new(format!("S{i}"), format!("s{i}"))).collect();
        let mut runner = SuiteRunner::new(GlobalOptions::new("/p", suites), harness.services());

        let result = runner.run();

        let aborted = abort_at.filter(|(suite, file)| layout.get(*suite).is_some_and(|count| file < count));
        prop_assert_eq!(result.is_err(), aborted.is_some());
        prop_assert_eq!(harness.bus.total_listeners(), 0);

        let opened: Vec<String> = harness
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::OpenSuite(name) => Some(name),
                _ => None,
            })
            .collect();
        let last_suite = aborted.map_or(layout.len() - 1, |(suite, _)| suite);
        let expected: Vec<String> = (0..=last_suite).map(|i| format!("S{i}")).collect();
        prop_assert_eq!(opened, expected);

        for seen in harness.files.listeners_seen.borrow().iter() {
            prop_assert_eq!(*seen, 4);
        }
    }

    /// Property: the frontend never panics, and every reported span lies within the source.
    #[test]
    fn frontend_is_total(source in "(describe|context|it|pass|fail|abort|\"[a-z]*\"|[{}#\\n ]|[a-z]+){0,40}") {
        if let Err(errors) = describe_syntax::parse_source(&source) {
            prop_assert!(!errors.is_empty());
            for error in errors {
                prop_assert!(error.span.start <= error.span.end);
                prop_assert!(error.span.end <= source.len());
            }
        }
    }

    #[test]
    fn frontend_survives_arbitrary_text(source in any::<String>()) {
        let _ = describe_syntax::parse_source(&source);
    }
}
