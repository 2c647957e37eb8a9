//! Wire shapes of the hovercraft payload.
//!
//! Producers emit several layouts for the same data. They are modelled here as
//! untagged variants and flattened into the canonical [`crate::types`] model by
//! [`crate::store::EntryStore::from_payload`].

use crate::types::{Entry, TextDocumentIdentifier};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level payload, bundled or fetched from `GET /hovercraft`.
///
/// Variant order matters: an array is tried as bare entries before pages, and an
/// object is tried as a single hovercraft before a project mapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// A bare array of entries (single project, no project dimension).
    Entries(Vec<Entry>),
    /// A single hovercraft without an outer project mapping.
    Hovercraft(RawHovercraft),
    /// Project id → hovercraft.
    Projects(BTreeMap<String, RawHovercraft>),
}

/// One project's pages, in either of the two observed layouts.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawHovercraft {
    /// Shape A: `{ projectId, pages: [...] }`.
    Nested {
        #[serde(default, rename = "projectId")]
        project_id: Option<String>,
        pages: Vec<RawPage>,
    },
    /// Shape B: `[ { document, entries }, ... ]`.
    Flat(Vec<RawPage>),
}

impl RawHovercraft {
    /// Splits into the embedded project id (if any) and the pages.
    pub fn into_parts(self) -> (Option<String>, Vec<RawPage>) {
        match self {
            Self::Nested { project_id, pages } => (project_id, pages),
            Self::Flat(pages) => (None, pages),
        }
    }
}

/// A page as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub document: Option<TextDocumentIdentifier>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Payload {
    /// Parses a payload from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
