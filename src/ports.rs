//! Unidirectional message channels between the search core and a UI.
//!
//! The UI sends requests on `request_search` and listens on `search_receiver` and
//! `project_ids_receiver`. The two sides share no state beyond these messages.

use crate::error::SearchError;
use crate::router::SearchRequest;
use crate::types::SearchResponse;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A search that was rejected, paired with the query it answered.
#[derive(Debug)]
pub struct FailedSearch {
    pub query: String,
    pub error: SearchError,
}

/// What the core publishes for each request.
pub type SearchOutcome = Result<SearchResponse, FailedSearch>;

pub type RequestTx = UnboundedSender<SearchRequest>;
pub type RequestRx = UnboundedReceiver<SearchRequest>;
pub type OutcomeTx = UnboundedSender<SearchOutcome>;
pub type OutcomeRx = UnboundedReceiver<SearchOutcome>;
pub type ProjectIdsTx = UnboundedSender<Vec<String>>;
pub type ProjectIdsRx = UnboundedReceiver<Vec<String>>;

/// The UI's ends of the channels.
#[derive(Debug)]
pub struct UiPorts {
    pub request_search: RequestTx,
    pub search_receiver: OutcomeRx,
    pub project_ids_receiver: ProjectIdsRx,
}

/// The core's ends of the channels.
#[derive(Debug)]
pub struct CorePorts {
    pub requests: RequestRx,
    pub results: OutcomeTx,
    pub project_ids: ProjectIdsTx,
}

/// Creates a connected pair of port sets.
pub fn channel() -> (UiPorts, CorePorts) {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
    let (project_ids_tx, project_ids_rx) = mpsc::unbounded_channel();

    (
        UiPorts {
            request_search: request_tx,
            search_receiver: outcome_rx,
            project_ids_receiver: project_ids_rx,
        },
        CorePorts {
            requests: request_rx,
            results: outcome_tx,
            project_ids: project_ids_tx,
        },
    )
}
