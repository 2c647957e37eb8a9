//! Hybrid search over hover documentation.
//!
//! A payload of hover entries is loaded once in the background, indexed for exact
//! prefix search and fuzzy matching, and queried through message ports. Exact-mode
//! searches can optionally be delegated to a remote server.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod payload;
pub mod ports;
pub mod router;
pub mod search;
pub mod store;
pub mod types;
pub mod worker;

pub use config::Settings;
pub use error::{LoadError, SearchError};
pub use generation::{IndexGeneration, IndexOptions};
pub use payload::Payload;
pub use ports::{CorePorts, FailedSearch, SearchOutcome, UiPorts};
pub use router::{QueryRouter, SearchRequest};
pub use store::EntryStore;
pub use types::{Entry, ScoredHit, SearchResponse};
pub use worker::{IndexBuilder, IndexHandle, IndexState, PayloadSource};
