//! Block kinds and their lifecycle boundary tags.
//!
//! Each `describe`/`context`/`it` block is bracketed by a start and an end [`Syntax`] tag. Keeping the pairing
//! here means the script interpreter and any other emitter agree on it.

use super::keywords::KeywordId;
use crate::events::Syntax;

/// The three nestable block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Describe,
    Context,
    It,
}

impl BlockKind {
    /// The tag emitted when the block is entered.
    pub fn start(self) -> Syntax {
        match self {
            BlockKind::Describe => Syntax::DescribeStart,
            BlockKind::Context => Syntax::ContextStart,
            BlockKind::It => Syntax::ItStart,
        }
    }

    /// The tag emitted when the block is left.
    pub fn end(self) -> Syntax {
        match self {
            BlockKind::Describe => Syntax::DescribeEnd,
            BlockKind::Context => Syntax::ContextEnd,
            BlockKind::It => Syntax::ItEnd,
        }
    }

    /// The keyword that opens this block.
    pub fn keyword(self) -> KeywordId {
        match self {
            BlockKind::Describe => KeywordId::Describe,
            BlockKind::Context => KeywordId::Context,
            BlockKind::It => KeywordId::It,
        }
    }

    /// Map a keyword to a block kind, if it opens a block.
    pub fn from_keyword(id: KeywordId) -> Option<BlockKind> {
        match id {
            KeywordId::Describe => Some(BlockKind::Describe),
            KeywordId::Context => Some(BlockKind::Context),
            KeywordId::It => Some(BlockKind::It),
            KeywordId::Pass | KeywordId::Fail | KeywordId::Abort => None,
        }
    }

    /// Whether blocks of this kind may contain nested blocks.
    pub fn allows_nesting(self) -> bool {
        !matches!(self, BlockKind::It)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_tags_pair_up() {
        for kind in [BlockKind::Describe, BlockKind::Context, BlockKind::It] {
            assert_eq!(kind.start().closing(), Some(kind.end()));
            assert!(kind.start().is_start());
            assert!(!kind.end().is_start());
        }
    }

    #[test]
    fn keyword_mapping_is_inverse() {
        for kind in [BlockKind::Describe, BlockKind::Context, BlockKind::It] {
            assert_eq!(BlockKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(BlockKind::from_keyword(KeywordId::Pass), None);
    }
}
