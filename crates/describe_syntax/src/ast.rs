//! Abstract syntax tree for suite scripts.

use describe_core::lang::blocks::BlockKind;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A parsed suite script: top-level items in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub items: Vec<Spanned<Item>>,
}

/// One directive. The span covers the keyword and its label, not a block's body.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Block(Block),
    Pass,
    Fail(String),
    Abort(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub label: String,
    pub body: Vec<Spanned<Item>>,
}

impl Script {
    /// Number of `pass`/`fail` directives anywhere in the script.
    pub fn assertion_count(&self) -> usize {
        fn count(items: &[Spanned<Item>]) -> usize {
            items
                .iter()
                .map(|item| match &item.node {
                    Item::Block(block) => count(&block.body),
                    Item::Pass | Item::Fail(_) => 1,
                    Item::Abort(_) => 0,
                })
                .sum()
        }
        count(&self.items)
    }
}
