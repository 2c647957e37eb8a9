//! Client for the server-side search endpoint used by delegated exact mode.

use crate::error::SearchError;
use crate::types::{Entry, ScoredHit};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::sync::Arc;

/// Body of `GET /search`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSearchResponse {
    pub query: String,
    #[serde(default)]
    pub results: Vec<RemoteHit>,
}

/// One remote result. Servers encode these either as objects or as pairs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RemoteHit {
    Object {
        #[serde(alias = "entry")]
        hit: Arc<Entry>,
        score: f64,
    },
    Pair(Arc<Entry>, f64),
}

impl From<RemoteHit> for ScoredHit {
    fn from(value: RemoteHit) -> Self {
        match value {
            RemoteHit::Object { hit, score } | RemoteHit::Pair(hit, score) => Self { hit, score },
        }
    }
}

impl RemoteSearchResponse {
    /// Parses a response body and normalizes every result to [`ScoredHit`].
    pub fn parse(bytes: &[u8]) -> Result<(String, Vec<ScoredHit>), SearchError> {
        let response: Self = serde_json::from_slice(bytes)?;
        let hits = response.results.into_iter().map(ScoredHit::from).collect();
        Ok((response.query, hits))
    }
}

/// Issues one HTTP round trip per search against `{base_url}/search`.
#[derive(Debug, Clone)]
pub struct RemoteSearchClient {
    client: Client,
    base_url: Url,
}

impl RemoteSearchClient {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `/search?placeholder=..&projectIds[]=..&q=..`.
    ///
    /// Each project id becomes its own repeated `projectIds[]` pair.
    pub fn search_url(&self, placeholder: Option<&str>, project_ids: &[String], query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map(|mut segments| {
                segments.pop_if_empty().push("search");
            })
            .ok();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.append_pair("placeholder", placeholder.unwrap_or_default());
            for project_id in project_ids {
                pairs.append_pair("projectIds[]", project_id);
            }
            pairs.append_pair("q", query);
        }

        url
    }

    /// Runs a delegated search, returning the query echoed by the server and its hits.
    pub async fn search(
        &self,
        placeholder: Option<&str>,
        project_ids: &[String],
        query: &str,
    ) -> Result<(String, Vec<ScoredHit>), SearchError> {
        let url = self.search_url(placeholder, project_ids, query);
        let url_str = url.to_string();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SearchError::Remote {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                url: url_str,
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| SearchError::Remote {
                url: url_str,
                source,
            })?;

        RemoteSearchResponse::parse(&body)
    }
}
