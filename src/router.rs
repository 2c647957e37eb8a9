//! Routes search requests to a backend and publishes normalized results.

use crate::ports::{FailedSearch, OutcomeTx, RequestRx, SearchOutcome};
use crate::search::{
    Backend, ExactBackend, FuzzyBackend, ProjectScope, RemoteBackend, RemoteSearchClient,
    ScoreOrder, SearchBackend,
};
use crate::worker::IndexHandle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A query as sent by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(alias = "queryText")]
    pub query: String,
    /// Selects the fuzzy matcher instead of exact search
    #[serde(default, alias = "isFuzzMode")]
    pub is_fuzzy_mode: bool,
    /// Scope filter; empty means every known project
    #[serde(default)]
    pub project_ids: Vec<String>,
    /// Passed through to the remote backend only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl SearchRequest {
    pub fn exact(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn fuzzy(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            is_fuzzy_mode: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn in_projects<I, S>(mut self, project_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.project_ids = project_ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    fn scope(&self) -> ProjectScope {
        ProjectScope::new(self.project_ids.clone())
    }
}

/// Selects a backend per request and normalizes what comes back.
///
/// Local strategies read whichever index generation is current when the request
/// arrives; before the index is ready they answer with no results.
#[derive(Debug, Clone)]
pub struct QueryRouter {
    index: IndexHandle,
    remote: Option<Arc<RemoteSearchClient>>,
    fuzzy_order: ScoreOrder,
}

impl QueryRouter {
    pub fn new(index: IndexHandle) -> Self {
        Self {
            index,
            remote: None,
            fuzzy_order: ScoreOrder::default(),
        }
    }

    /// Delegate exact-mode searches to a server.
    #[must_use]
    pub fn with_remote(mut self, client: RemoteSearchClient) -> Self {
        self.remote = Some(Arc::new(client));
        self
    }

    /// Set the ordering policy applied to every fuzzy result list.
    #[must_use]
    pub fn with_fuzzy_order(mut self, order: ScoreOrder) -> Self {
        self.fuzzy_order = order;
        self
    }

    /// Picks the backend for `request`.
    pub fn backend_for(&self, request: &SearchRequest) -> Backend {
        if request.is_fuzzy_mode {
            return Backend::Fuzzy(FuzzyBackend::new(
                self.index.generation(),
                self.fuzzy_order,
            ));
        }

        match &self.remote {
            Some(client) => Backend::Remote(RemoteBackend::new(
                Arc::clone(client),
                request.placeholder.clone(),
            )),
            None => Backend::Exact(ExactBackend::new(self.index.generation())),
        }
    }

    /// Answers one request.
    pub async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let backend = self.backend_for(request);
        execute(&backend, request).await
    }

    /// Serves requests until the request channel closes.
    ///
    /// Remote searches run as independent tasks, so their results may be published
    /// out of order relative to other requests.
    pub async fn run(self, mut requests: RequestRx, results: OutcomeTx) {
        while let Some(request) = requests.recv().await {
            let backend = self.backend_for(&request);

            if backend.is_remote() {
                let results = results.clone();
                tokio::spawn(async move {
                    let outcome = execute(&backend, &request).await;
                    publish(&results, outcome);
                });
            } else {
                let outcome = execute(&backend, &request).await;
                publish(&results, outcome);
            }
        }

        tracing::debug!("Request channel closed, query router stopping");
    }
}

async fn execute(backend: &Backend, request: &SearchRequest) -> SearchOutcome {
    match backend.search(&request.query, &request.scope()).await {
        Ok(response) => {
            tracing::debug!(
                "Search '{}' (fuzzy: {}, projects: {:?}) returned {} results",
                request.query,
                request.is_fuzzy_mode,
                request.project_ids,
                response.results.len()
            );
            Ok(response)
        }
        Err(error) => {
            tracing::warn!("Search '{}' failed: {}", request.query, error);
            Err(FailedSearch {
                query: request.query.clone(),
                error,
            })
        }
    }
}

fn publish(results: &OutcomeTx, outcome: SearchOutcome) {
    if results.send(outcome).is_err() {
        tracing::debug!("Result receiver dropped, discarding search outcome");
    }
}
