//! Machine-readable run report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use describe_core::lang::blocks::BlockKind;
use describe_core::lang::keywords;
use serde::Serialize;

use super::Writer;
use crate::error::Result;
use crate::tracer::TraceRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionOutcome {
    Passed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportNode {
    Block {
        kind: &'static str,
        label: String,
        children: Vec<ReportNode>,
    },
    Assertion {
        outcome: AssertionOutcome,
        trace: TraceRecord,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    pub name: String,
    pub passed: usize,
    pub failed: usize,
    pub nodes: Vec<ReportNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Report {
    pub passed: usize,
    pub failed: usize,
    pub suites: Vec<SuiteReport>,
}

/// Block still being filled in.
struct OpenBlock {
    kind: BlockKind,
    label: String,
    children: Vec<ReportNode>,
}

/// Collects the run as a [`Report`] and writes it as pretty JSON on [`Writer::finish`].
pub struct JsonReportWriter {
    path: Option<PathBuf>,
    report: Report,
    open: Vec<OpenBlock>,
}

impl JsonReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            report: Report::default(),
            open: Vec::new(),
        }
    }

    /// Collect only; `finish` writes nothing.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            report: Report::default(),
            open: Vec::new(),
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.report)?)
    }

    fn push_node(&mut self, node: ReportNode) {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(node);
        } else if let Some(suite) = self.report.suites.last_mut() {
            suite.nodes.push(node);
        }
    }

    fn open_block(&mut self, kind: BlockKind, label: &str) -> Result<()> {
        self.open.push(OpenBlock {
            kind,
            label: label.to_string(),
            children: Vec::new(),
        });
        Ok(())
    }

    fn close_block(&mut self) -> Result<()> {
        if let Some(block) = self.open.pop() {
            self.push_node(ReportNode::Block {
                kind: keywords::as_str(block.kind.keyword()),
                label: block.label,
                children: block.children,
            });
        }
        Ok(())
    }

    fn record(&mut self, outcome: AssertionOutcome, trace: &TraceRecord) {
        let report = &mut self.report;
        let (total, suite) = match outcome {
            AssertionOutcome::Passed => (&mut report.passed, report.suites.last_mut().map(|s| &mut s.passed)),
            AssertionOutcome::Failed => (&mut report.failed, report.suites.last_mut().map(|s| &mut s.failed)),
        };
        *total += 1;
        if let Some(count) = suite {
            *count += 1;
        }
        self.push_node(ReportNode::Assertion {
            outcome,
            trace: trace.clone(),
        });
    }
}

impl Writer for JsonReportWriter {
    fn open_suite(&mut self, name: &str) -> Result<()> {
        self.open.clear();
        self.report.suites.push(SuiteReport {
            name: name.to_string(),
            passed: 0,
            failed: 0,
            nodes: Vec::new(),
        });
        Ok(())
    }

    fn close_suite(&mut self, _name: &str) -> Result<()> {
        // Blocks left open by an aborted file still belong to the suite.
        while !self.open.is_empty() {
            self.close_block()?;
        }
        Ok(())
    }

    fn open_describe(&mut self, label: &str) -> Result<()> {
        self.open_block(BlockKind::Describe, label)
    }

    fn close_describe(&mut self, _label: &str) -> Result<()> {
        self.close_block()
    }

    fn open_context(&mut self, label: &str) -> Result<()> {
        self.open_block(BlockKind::Context, label)
    }

    fn close_context(&mut self, _label: &str) -> Result<()> {
        self.close_block()
    }

    fn open_it(&mut self, label: &str) -> Result<()> {
        self.open_block(BlockKind::It, label)
    }

    fn close_it(&mut self, _label: &str) -> Result<()> {
        self.close_block()
    }

    fn output_before(&mut self) -> Result<()> {
        Ok(())
    }

    fn output_success(&mut self, trace: &TraceRecord) -> Result<()> {
        self.record(AssertionOutcome::Passed, trace);
        Ok(())
    }

    fn output_failure(&mut self, trace: &TraceRecord) -> Result<()> {
        self.record(AssertionOutcome::Failed, trace);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, &self.report)?;
        writeln!(out)?;
        out.flush()?;
        tracing::debug!(path = %path.display(), suites = self.report.suites.len(), "wrote JSON report");
        Ok(())
    }
}
