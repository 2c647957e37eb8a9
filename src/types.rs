//! Canonical data model for hover documentation entries.
//!
//! Every payload shape accepted by [`crate::payload`] is resolved into these types
//! once at load time, so the indexes and the router only ever see one representation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// JSON pointer (relative to `hover`) of the text both search strategies match against.
pub const HOVER_TEXT_POINTER: &str = "/contents/value";

/// A zero-based line/character position in a source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// A span in a source document. Missing endpoints default to the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// Source location a hover applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub uri: String,
    #[serde(default)]
    pub range: Range,
}

/// Identifies a source document, optionally with extra metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDocumentIdentifier {
    pub uri: String,
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, Value>,
}

/// One documentation unit for a symbol occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Structured documentation payload; only `contents.value` is interpreted.
    pub hover: Value,
    pub definition: Definition,
    /// Opaque cross-reference identifier, carried through untouched.
    #[serde(default)]
    pub moniker: Value,
    #[serde(default)]
    pub root_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<TextDocumentIdentifier>,
}

impl Entry {
    /// The indexed hover text, or `None` when the entry has nothing matchable.
    pub fn hover_text(&self) -> Option<&str> {
        self.hover.pointer(HOVER_TEXT_POINTER)?.as_str()
    }
}

/// Entries belonging to one source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub document: Option<TextDocumentIdentifier>,
    pub entries: Vec<Arc<Entry>>,
}

/// All pages ingested for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub project_id: String,
    pub pages: Vec<Page>,
}

/// A normalized search hit: the matched entry and its score.
///
/// Exact mode always scores `0.0`; fuzzy mode scores `0.0` for a perfect match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredHit {
    pub hit: Arc<Entry>,
    pub score: f64,
}

/// Normalized results for one query, as published to the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ScoredHit>,
}
