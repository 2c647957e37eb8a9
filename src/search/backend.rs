//! One search capability over the three result sources.
//!
//! Each backend turns its native result shape into [`crate::types::ScoredHit`]s, so
//! the router picks a variant per request and never branches on strategy-specific
//! shapes. Local backends apply the project scope before any result limit.

use crate::error::SearchError;
use crate::generation::IndexGeneration;
use crate::types::{Entry, SearchResponse};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

use super::remote::RemoteSearchClient;

/// Restricts results to a set of projects. Empty means every known project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectScope {
    ids: Vec<String>,
}

impl ProjectScope {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_all(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether `entry` is visible under this scope.
    ///
    /// Entries without a project id come from payloads with no project dimension and
    /// are always admitted.
    pub fn admits(&self, entry: &Entry) -> bool {
        match (&entry.project_id, self.is_all()) {
            (_, true) | (None, false) => true,
            (Some(project_id), false) => self.ids.iter().any(|id| id == project_id),
        }
    }
}

/// Ordering policy for fuzzy results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreOrder {
    /// Lowest score (best match) first
    #[default]
    Ascending,
    Descending,
}

/// Something that answers a query with ordered, normalized hits.
pub trait SearchBackend {
    fn search(
        &self,
        query: &str,
        scope: &ProjectScope,
    ) -> impl Future<Output = Result<SearchResponse, SearchError>> + Send;
}

/// Exact-mode search against the in-memory prefix index.
#[derive(Debug, Clone, Default)]
pub struct ExactBackend {
    /// `None` until the index is ready
    generation: Option<Arc<IndexGeneration>>,
}

impl ExactBackend {
    pub fn new(generation: Option<Arc<IndexGeneration>>) -> Self {
        Self { generation }
    }
}

impl SearchBackend for ExactBackend {
    async fn search(
        &self,
        query: &str,
        scope: &ProjectScope,
    ) -> Result<SearchResponse, SearchError> {
        let results = self
            .generation
            .as_ref()
            .map(|generation| generation.exact_hits(query, scope))
            .unwrap_or_default();

        Ok(SearchResponse {
            query: query.to_string(),
            results,
        })
    }
}

/// Fuzzy-mode search against the in-memory approximate matcher.
#[derive(Debug, Clone, Default)]
pub struct FuzzyBackend {
    generation: Option<Arc<IndexGeneration>>,
    order: ScoreOrder,
}

impl FuzzyBackend {
    pub fn new(generation: Option<Arc<IndexGeneration>>, order: ScoreOrder) -> Self {
        Self { generation, order }
    }
}

impl SearchBackend for FuzzyBackend {
    async fn search(
        &self,
        query: &str,
        scope: &ProjectScope,
    ) -> Result<SearchResponse, SearchError> {
        let mut results = self
            .generation
            .as_ref()
            .map(|generation| generation.fuzzy_hits(query, scope))
            .unwrap_or_default();

        if self.order == ScoreOrder::Descending {
            results.sort_by(|a, b| b.score.total_cmp(&a.score));
        }

        Ok(SearchResponse {
            query: query.to_string(),
            results,
        })
    }
}

/// Exact-mode search delegated to a server. Scoping happens server-side.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: Arc<RemoteSearchClient>,
    placeholder: Option<String>,
}

impl RemoteBackend {
    pub fn new(client: Arc<RemoteSearchClient>, placeholder: Option<String>) -> Self {
        Self {
            client,
            placeholder,
        }
    }
}

impl SearchBackend for RemoteBackend {
    async fn search(
        &self,
        query: &str,
        scope: &ProjectScope,
    ) -> Result<SearchResponse, SearchError> {
        let (query, results) = self
            .client
            .search(self.placeholder.as_deref(), scope.ids(), query)
            .await?;
        Ok(SearchResponse { query, results })
    }
}

/// The backend selected for one request.
#[derive(Debug, Clone)]
pub enum Backend {
    Exact(ExactBackend),
    Fuzzy(FuzzyBackend),
    Remote(RemoteBackend),
}

impl Backend {
    /// Remote searches suspend on the network; local ones complete immediately.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl SearchBackend for Backend {
    async fn search(
        &self,
        query: &str,
        scope: &ProjectScope,
    ) -> Result<SearchResponse, SearchError> {
        match self {
            Self::Exact(backend) => backend.search(query, scope).await,
            Self::Fuzzy(backend) => backend.search(query, scope).await,
            Self::Remote(backend) => backend.search(query, scope).await,
        }
    }
}
