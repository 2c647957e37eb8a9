//! Error handling types and utilities.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for configuration and process-level operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading the hovercraft payload fails.
///
/// A load failure is terminal: the index stays empty and every local query
/// answers with no results.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Payload file could not be read.
    #[error("Failed to read payload at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Payload request could not be sent or its body could not be read.
    #[error("Failed to fetch payload from {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },
    /// Payload endpoint answered with a non-success status.
    #[error("Payload endpoint {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    /// Payload was not valid JSON or matched none of the accepted shapes.
    #[error("Failed to parse payload: {0}")]
    Parse(#[from] serde_json::Error),
    /// The blocking index build task panicked or was cancelled.
    #[error("Index build task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Error returned by the server-delegated search path.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Remote search request to {url} failed: {source}")]
    Remote { url: String, source: reqwest::Error },
    #[error("Remote search {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Failed to decode remote search response: {0}")]
    Decode(#[from] serde_json::Error),
}
