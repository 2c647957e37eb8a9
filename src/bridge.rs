//! JSON-lines bridge between the UI ports and stdio.
//!
//! Each stdin line is a [`SearchRequest`]. Each stdout line is an [`OutboundMessage`],
//! tagged by `type`:
//!
//! ```text
//! {"type":"projectIds","projectIds":["p1"]}
//! {"type":"searchResults","query":"open","results":[{"hit":{...},"score":0.0}]}
//! {"type":"searchFailed","query":"open","error":"..."}
//! ```

use crate::error::Result;
use crate::ports::{SearchOutcome, UiPorts};
use crate::router::SearchRequest;
use crate::types::SearchResponse;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// A message written to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    ProjectIds {
        #[serde(rename = "projectIds")]
        project_ids: Vec<String>,
    },
    SearchResults(SearchResponse),
    SearchFailed { query: String, error: String },
}

impl From<SearchOutcome> for OutboundMessage {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            Ok(response) => Self::SearchResults(response),
            Err(failed) => Self::SearchFailed {
                query: failed.query,
                error: failed.error.to_string(),
            },
        }
    }
}

/// Parses one inbound line. Blank lines yield `None`.
pub fn parse_request(line: &str) -> Option<serde_json::Result<SearchRequest>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str(line))
}

async fn write_message<W>(writer: &mut W, message: &OutboundMessage) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(message).context("Failed to encode outbound message")?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

/// Pumps stdin into `request_search` and the core's outputs onto stdout.
///
/// Returns once the core has closed the result channel. Stdin EOF closes the request
/// channel, which lets the router drain and stop.
pub async fn run_stdio(ports: UiPorts) -> Result<()> {
    let UiPorts {
        request_search,
        mut search_receiver,
        mut project_ids_receiver,
    } = ports;

    let mut requests = Some(request_search);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut project_ids_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if requests.is_some() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    tracing::debug!("stdin closed, no further requests");
                    requests = None;
                    continue;
                };

                match parse_request(&line) {
                    None => {}
                    Some(Ok(request)) => {
                        let sent = requests.as_ref().is_some_and(|tx| tx.send(request).is_ok());
                        if !sent {
                            tracing::debug!("Query router stopped, dropping request");
                            requests = None;
                        }
                    }
                    Some(Err(e)) => tracing::warn!("Ignoring malformed request: {}", e),
                }
            }
            ids = project_ids_receiver.recv(), if project_ids_open => {
                match ids {
                    Some(project_ids) => {
                        write_message(&mut stdout, &OutboundMessage::ProjectIds { project_ids }).await?;
                    }
                    None => project_ids_open = false,
                }
            }
            outcome = search_receiver.recv() => {
                let Some(outcome) = outcome else { break };
                write_message(&mut stdout, &outcome.into()).await?;
            }
        }
    }

    Ok(())
}
