//! Forward-tokenized inverted index for exact-mode search.

use crate::types::Entry;
use ahash::{AHashMap, AHashSet};
use std::sync::Arc;

use super::tokenize::{Encoder, WhitespaceEncoder, forward_prefixes};

/// Dense document identifier, assigned in ingestion order and valid for one build.
pub type DocId = usize;

/// A document as stored by the exact index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedDocument {
    pub id: DocId,
    pub contents: Arc<Entry>,
}

/// Prefix-searchable inverted index over entry hover text.
///
/// Every prefix of every token is a key, so a query token matches any indexed token
/// it is a prefix of. Posting lists are kept sorted by document id.
#[derive(Debug)]
pub struct ExactIndex<E = WhitespaceEncoder> {
    encoder: E,
    /// Map from token prefix to ascending list of documents containing it
    postings: AHashMap<String, Vec<DocId>>,
    documents: AHashMap<DocId, IndexedDocument>,
}

impl Default for ExactIndex<WhitespaceEncoder> {
    fn default() -> Self {
        Self::with_encoder(WhitespaceEncoder)
    }
}

impl ExactIndex<WhitespaceEncoder> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Encoder> ExactIndex<E> {
    /// Create an empty index that encodes documents and queries with `encoder`.
    pub fn with_encoder(encoder: E) -> Self {
        Self {
            encoder,
            postings: AHashMap::new(),
            documents: AHashMap::new(),
        }
    }

    /// Inserts one document. Ids must be unique within a build.
    ///
    /// Documents without hover text are kept for enrichment but can never match.
    pub fn add(&mut self, document: IndexedDocument) {
        let id = document.id;

        if let Some(text) = document.contents.hover_text() {
            let tokens = self.encoder.encode(text);
            let prefixes: AHashSet<&str> = tokens
                .iter()
                .flat_map(|token| forward_prefixes(token))
                .collect();

            for prefix in prefixes {
                let list = self.postings.entry(prefix.to_string()).or_default();
                let pos = list.partition_point(|&existing| existing < id);
                if list.get(pos) != Some(&id) {
                    list.insert(pos, id);
                }
            }
        }

        self.documents.insert(id, document);
    }

    /// Returns ids of documents where every query token prefixes some document token.
    ///
    /// Results are in ascending id order, i.e. ingestion order. An empty query
    /// matches nothing.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<DocId> {
        let mut tokens = self.encoder.encode(query);
        tokens.sort_unstable();
        tokens.dedup();

        let mut lists = Vec::with_capacity(tokens.len());
        for token in &tokens {
            match self.postings.get(token) {
                Some(list) => lists.push(list.as_slice()),
                None => return vec![],
            }
        }

        // Walk the shortest list, probing the others
        lists.sort_by_key(|list| list.len());
        let Some((shortest, rest)) = lists.split_first() else {
            return vec![];
        };

        shortest
            .iter()
            .copied()
            .filter(|id| rest.iter().all(|list| list.binary_search(id).is_ok()))
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Like [`Self::search`], but resolves each id back to its original document.
    pub fn search_enriched(&self, query: &str, limit: Option<usize>) -> Vec<&IndexedDocument> {
        self.search(query, limit)
            .into_iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Looks up a document by id.
    pub(crate) fn get(&self, id: DocId) -> Option<&IndexedDocument> {
        self.documents.get(&id)
    }

    /// Get the number of distinct indexed prefixes
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Get the number of documents in the index
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}
