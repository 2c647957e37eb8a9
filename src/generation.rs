//! One consistent snapshot of the entry store and both search indexes.

use crate::search::{DocId, ExactIndex, FuzzyMatcher, FuzzyOptions, IndexedDocument, ProjectScope};
use crate::store::EntryStore;
use crate::types::ScoredHit;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Build-time options for both strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Cap on exact-mode results (`None` returns every match)
    pub exact_limit: Option<usize>,
    pub fuzzy: FuzzyOptions,
}

/// The entry store plus the exact and fuzzy indexes built from it in a single pass.
///
/// A generation is immutable once built. Rebuilding produces a new generation that
/// replaces the old one as a whole, so the two indexes can never disagree about which
/// entries exist.
#[derive(Debug)]
pub struct IndexGeneration {
    store: EntryStore,
    exact: ExactIndex,
    fuzzy: FuzzyMatcher,
    options: IndexOptions,
}

impl IndexGeneration {
    /// Builds both indexes from `store`, assigning document ids from zero in store order.
    pub fn build(store: EntryStore, options: IndexOptions) -> Self {
        let start = std::time::Instant::now();

        let mut exact = ExactIndex::new();
        let mut sequence = Vec::with_capacity(store.len());

        for (id, entry) in store.entries().iter().enumerate() {
            exact.add(IndexedDocument {
                id,
                contents: Arc::clone(entry),
            });
            sequence.push(Arc::clone(entry));
        }

        let fuzzy = FuzzyMatcher::new(sequence, options.fuzzy);

        tracing::info!(
            "Built search indexes: {} entries across {} projects ({} unscoped pages), {} prefixes in {:?}",
            store.len(),
            store.projects().len(),
            store.unscoped_pages().len(),
            exact.term_count(),
            start.elapsed()
        );

        Self {
            store,
            exact,
            fuzzy,
            options,
        }
    }

    /// Exact-mode hits within `scope` as full entries with score `0.0`, in index order.
    ///
    /// The configured limit counts only in-scope hits.
    pub fn exact_hits(&self, query: &str, scope: &ProjectScope) -> Vec<ScoredHit> {
        self.exact
            .search_enriched(query, None)
            .into_iter()
            .filter(|document| scope.admits(&document.contents))
            .take(self.options.exact_limit.unwrap_or(usize::MAX))
            .map(|document| ScoredHit {
                hit: Arc::clone(&document.contents),
                score: 0.0,
            })
            .collect()
    }

    /// Fuzzy-mode hits within `scope`, best (lowest) score first.
    pub fn fuzzy_hits(&self, query: &str, scope: &ProjectScope) -> Vec<ScoredHit> {
        self.fuzzy
            .search_where(query, |entry| scope.admits(entry))
            .into_iter()
            .map(|found| ScoredHit {
                hit: found.item,
                score: found.score,
            })
            .collect()
    }

    /// Bare exact-mode document ids.
    pub fn exact_ids(&self, query: &str) -> Vec<DocId> {
        self.exact.search(query, self.options.exact_limit)
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn exact(&self) -> &ExactIndex {
        &self.exact
    }

    pub fn fuzzy(&self) -> &FuzzyMatcher {
        &self.fuzzy
    }

    /// Known project ids for this generation.
    pub fn project_ids(&self) -> Vec<String> {
        self.store.project_ids()
    }
}
