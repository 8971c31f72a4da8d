//! Define the reserved words of the suite-script language.
//!
//! This module is the single source of truth for script keywords: a stable identifier ([`KeywordId`]) plus a
//! const metadata table ([`KEYWORDS`]) recording canonical spellings, aliases, and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - The registry is pure; the parser owns placement rules (e.g. `pass` only inside `it`).
//!
//! ## Examples
//! ```rust
//! use describe_core::lang::keywords::{self, KeywordCategory, KeywordId};
//!
//! assert_eq!(keywords::from_str("specify"), Some(KeywordId::It)); // alias
//! assert_eq!(keywords::category(KeywordId::Pass), KeywordCategory::Assertion);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Blocks
    Describe,
    Context,
    It,

    // Recorded outcomes
    Pass,
    Fail,

    // Control
    Abort,
}

/// High-level grouping for diagnostics and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Opens a labelled `{ ... }` block.
    Block,
    /// Records the outcome of one assertion.
    Assertion,
    /// Alters the execution of the file itself.
    Control,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: KeywordCategory,
    /// Whether the keyword must be followed by a string literal.
    pub takes_label: bool,
    pub description: &'static str,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(
        KeywordId::Describe,
        "describe",
        &[],
        KeywordCategory::Block,
        true,
        "Groups examples under a subject.",
    ),
    info(
        KeywordId::Context,
        "context",
        &["when"],
        KeywordCategory::Block,
        true,
        "Narrows a describe block to one situation.",
    ),
    info(
        KeywordId::It,
        "it",
        &["specify"],
        KeywordCategory::Block,
        true,
        "Declares one example; holds the assertions.",
    ),
    info(
        KeywordId::Pass,
        "pass",
        &[],
        KeywordCategory::Assertion,
        false,
        "Records a passing assertion.",
    ),
    info(
        KeywordId::Fail,
        "fail",
        &[],
        KeywordCategory::Assertion,
        true,
        "Records a failing assertion with its message.",
    ),
    info(
        KeywordId::Abort,
        "abort",
        &[],
        KeywordCategory::Control,
        true,
        "Stops the file with an execution error.",
    ),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Whether the keyword expects a string literal after it.
pub fn takes_label(id: KeywordId) -> bool {
    info_for(id).takes_label
}

/// Full metadata.
///
/// ## Notes
/// - Every [`KeywordId`] has exactly one entry; `keyword_registry_is_complete` guards this.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    match KEYWORDS.iter().find(|k| k.id == id) {
        Some(info) => info,
        None => &KEYWORDS[0],
    }
}

/// Lookup by spelling (canonical or alias).
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved, `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    if let Some(k) = KEYWORDS.iter().find(|k| k.canonical == s) {
        return Some(k.id);
    }
    KEYWORDS.iter().find(|k| k.aliases.contains(&s)).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    category: KeywordCategory,
    takes_label: bool,
    description: &'static str,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        aliases,
        category,
        takes_label,
        description,
    }
}
