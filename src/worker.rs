//! Background loading of the hovercraft payload into a searchable index generation.
//!
//! The builder runs once: `Empty → Loading → Ready`, or `Failed` if the payload could
//! not be obtained. Readers observe the state through an [`IndexHandle`] and answer
//! queries with empty results until a generation is ready.

use crate::error::LoadError;
use crate::generation::{IndexGeneration, IndexOptions};
use crate::payload::Payload;
use crate::ports::ProjectIdsTx;
use crate::store::EntryStore;
use reqwest::{Client, Url};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Where the payload comes from.
#[derive(Debug, Clone)]
pub enum PayloadSource {
    /// A payload already in memory, e.g. bundled with `include_str!`
    Json(String),
    /// A JSON file on disk
    File(PathBuf),
    /// A single `GET` against the given URL
    Remote(Url),
}

impl PayloadSource {
    /// Reads and parses the payload. No retries.
    pub async fn load(&self, client: &Client) -> Result<Payload, LoadError> {
        match self {
            Self::Json(json) => Ok(Payload::from_slice(json.as_bytes())?),
            Self::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(Payload::from_slice(&bytes)?)
            }
            Self::Remote(url) => {
                let fetch_error = |source| LoadError::Fetch {
                    url: url.to_string(),
                    source,
                };

                let response = client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(fetch_error)?;

                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url: url.to_string(),
                        status,
                    });
                }

                let bytes = response.bytes().await.map_err(fetch_error)?;
                Ok(Payload::from_slice(&bytes)?)
            }
        }
    }
}

impl fmt::Display for PayloadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(json) => write!(f, "inline payload ({} bytes)", json.len()),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Lifecycle of the index.
#[derive(Debug, Clone, Default)]
pub enum IndexState {
    #[default]
    Empty,
    Loading,
    Ready(Arc<IndexGeneration>),
    /// Terminal; behaves like `Empty` for queries
    Failed(Arc<LoadError>),
}

impl IndexState {
    /// The searchable generation, if loading has completed.
    pub fn generation(&self) -> Option<&Arc<IndexGeneration>> {
        match self {
            Self::Ready(generation) => Some(generation),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Whether the builder has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Failed(_))
    }
}

/// Read side of the index lifecycle. Cheap to clone.
#[derive(Debug, Clone)]
pub struct IndexHandle {
    state: watch::Receiver<IndexState>,
}

impl IndexHandle {
    /// A snapshot of the current state.
    pub fn state(&self) -> IndexState {
        self.state.borrow().clone()
    }

    /// The current generation, or `None` while empty, loading or failed.
    pub fn generation(&self) -> Option<Arc<IndexGeneration>> {
        self.state.borrow().generation().cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_ready()
    }

    /// Project ids of the current generation; empty until ready.
    pub fn project_ids(&self) -> Vec<String> {
        self.generation()
            .map(|generation| generation.project_ids())
            .unwrap_or_default()
    }

    /// Waits until the builder is `Ready` or `Failed` and returns that state.
    ///
    /// If the builder is dropped without settling, the last observed state is returned.
    pub async fn wait_until_settled(&self) -> IndexState {
        let mut state = self.state.clone();
        if let Ok(settled) = state.wait_for(IndexState::is_settled).await {
            return settled.clone();
        }
        state.borrow().clone()
    }
}

/// Loads the payload once and publishes the resulting index generation.
#[derive(Debug)]
pub struct IndexBuilder {
    source: PayloadSource,
    client: Client,
    options: IndexOptions,
    state: watch::Sender<IndexState>,
}

impl IndexBuilder {
    /// Create a builder in the `Empty` state and the handle that observes it.
    pub fn new(source: PayloadSource, options: IndexOptions) -> (Self, IndexHandle) {
        let (state, receiver) = watch::channel(IndexState::Empty);
        let builder = Self {
            source,
            client: Client::new(),
            options,
            state,
        };
        (builder, IndexHandle { state: receiver })
    }

    /// Use a preconfigured HTTP client for remote payloads.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Loads, builds and publishes. Consumes the builder so it can only run once.
    ///
    /// On success the project ids are sent on `project_ids`. On failure the state
    /// becomes `Failed` and nothing is sent.
    pub async fn run(
        self,
        project_ids: ProjectIdsTx,
    ) -> Result<Arc<IndexGeneration>, Arc<LoadError>> {
        self.state.send_replace(IndexState::Loading);
        tracing::info!("Loading hovercraft payload from {}", self.source);

        match self.load_and_build().await {
            Ok(generation) => {
                self.state.send_replace(IndexState::Ready(Arc::clone(&generation)));

                if project_ids.send(generation.project_ids()).is_err() {
                    tracing::debug!("Project id receiver dropped before index was ready");
                }
                Ok(generation)
            }
            Err(e) => {
                tracing::warn!("Failed to load hovercraft payload: {}", e);
                let error = Arc::new(e);
                self.state.send_replace(IndexState::Failed(Arc::clone(&error)));
                Err(error)
            }
        }
    }

    async fn load_and_build(&self) -> Result<Arc<IndexGeneration>, LoadError> {
        let payload = self.source.load(&self.client).await?;
        let options = self.options;

        // Build in spawn_blocking since indexing is CPU intensive
        let generation = tokio::task::spawn_blocking(move || {
            IndexGeneration::build(EntryStore::from_payload(payload), options)
        })
        .await?;

        Ok(Arc::new(generation))
    }

    /// Spawn the builder as a tokio task.
    pub fn spawn(self, project_ids: ProjectIdsTx) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            // Failures are already logged and published through the index state
            let _ = self.run(project_ids).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use tokio::sync::mpsc;

    const PAYLOAD: &str = r#"{"p1": {"projectId":"p1","pages":[{"entries":[{"hover":{"contents":{"value":"open file"}},"definition":{"uri":"file:///a","range":{}},"moniker":null,"rootPath":"/a"}]}]}}"#;

    #[tokio::test]
    async fn test_new_builder_is_empty() {
        let (_builder, handle) = IndexBuilder::new(
            PayloadSource::Json(PAYLOAD.to_string()),
            IndexOptions::default(),
        );

        check!(matches!(handle.state(), IndexState::Empty));
        check!(handle.generation().is_none());
        check!(handle.project_ids().is_empty());
    }

    #[tokio::test]
    async fn test_run_publishes_generation_and_project_ids() {
        let (builder, handle) = IndexBuilder::new(
            PayloadSource::Json(PAYLOAD.to_string()),
            IndexOptions::default(),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();

        let_assert!(Ok(generation) = builder.run(tx).await);
        check!(generation.store().len() == 1);
        check!(handle.is_ready());
        check!(rx.recv().await == Some(vec!["p1".to_string()]));
    }

    #[tokio::test]
    async fn test_parse_failure_is_terminal() {
        let (builder, handle) = IndexBuilder::new(
            PayloadSource::Json("{ not json".to_string()),
            IndexOptions::default(),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();

        let_assert!(Err(error) = builder.run(tx).await);
        check!(matches!(*error, LoadError::Parse(_)));
        check!(matches!(handle.wait_until_settled().await, IndexState::Failed(_)));
        check!(handle.generation().is_none());
        // Sender dropped without publishing
        check!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = PayloadSource::File(PathBuf::from("/definitely/not/here.json"));
        let_assert!(Err(LoadError::Io { path, .. }) = source.load(&Client::new()).await);
        check!(path == PathBuf::from("/definitely/not/here.json"));
    }

    #[tokio::test]
    async fn test_wait_until_settled_after_spawn() {
        let (builder, handle) = IndexBuilder::new(
            PayloadSource::Json(PAYLOAD.to_string()),
            IndexOptions::default(),
        );
        let (tx, _rx) = mpsc::unbounded_channel();
        let _task = builder.spawn(tx);

        let state = handle.wait_until_settled().await;
        check!(state.is_ready());
        check!(handle.project_ids() == vec!["p1".to_string()]);
    }
}
