mod common;

use assert2::{check, let_assert};
use common::{OPEN_FILE_PAYLOAD, RunningCore};
use hovercraft_search::bridge::OutboundMessage;
use hovercraft_search::ports;
use hovercraft_search::search::RemoteSearchClient;
use hovercraft_search::{
    IndexBuilder, IndexOptions, IndexState, LoadError, PayloadSource, QueryRouter, SearchRequest,
};
use reqwest::{Client, Url};
use std::path::PathBuf;

#[tokio::test]
async fn end_to_end_open_file() {
    let mut core = RunningCore::json(OPEN_FILE_PAYLOAD);

    let project_ids = core.ui.project_ids_receiver.recv().await;
    check!(project_ids == Some(vec!["p1".to_string()]));

    core.ui.request_search.send(SearchRequest::exact("open")).unwrap();
    let_assert!(Some(Ok(response)) = core.ui.search_receiver.recv().await);

    check!(response.query == "open");
    check!(response.results.len() == 1);
    check!(response.results[0].hit.hover_text() == Some("open file"));
    check!(response.results[0].score == 0.0);
    check!(response.results[0].hit.project_id.as_deref() == Some("p1"));
}

#[tokio::test]
async fn queries_before_loading_are_empty_not_errors() {
    let (mut ui, core) = ports::channel();
    // Never run, so the index stays empty
    let (_builder, index) = IndexBuilder::new(
        PayloadSource::Json(OPEN_FILE_PAYLOAD.to_string()),
        IndexOptions::default(),
    );
    let router = tokio::spawn(QueryRouter::new(index).run(core.requests, core.results));

    for request in [SearchRequest::exact("open"), SearchRequest::fuzzy("open")] {
        ui.request_search.send(request).unwrap();
        let_assert!(Some(Ok(response)) = ui.search_receiver.recv().await);
        check!(response.query == "open");
        check!(response.results.is_empty());
    }

    drop(ui.request_search);
    router.await.unwrap();
    check!(ui.search_receiver.recv().await.is_none());
}

#[tokio::test]
async fn load_failure_leaves_index_empty() {
    let mut core = RunningCore::start(PayloadSource::File(PathBuf::from(
        "/nonexistent/hovercraft.json",
    )));

    let_assert!(IndexState::Failed(error) = core.index.wait_until_settled().await);
    check!(matches!(*error, LoadError::Io { .. }));
    // The builder drops its sender without publishing
    check!(core.ui.project_ids_receiver.recv().await.is_none());

    core.ui.request_search.send(SearchRequest::fuzzy("open")).unwrap();
    let_assert!(Some(Ok(response)) = core.ui.search_receiver.recv().await);
    check!(response.results.is_empty());
}

#[tokio::test]
async fn remote_failure_is_published_with_query() {
    let remote = RemoteSearchClient::new(Client::new(), Url::parse("http://127.0.0.1:1").unwrap());
    let mut core = RunningCore::start_with(
        PayloadSource::Json(OPEN_FILE_PAYLOAD.to_string()),
        |router| router.with_remote(remote),
    );
    core.index.wait_until_settled().await;

    core.ui.request_search.send(SearchRequest::exact("open")).unwrap();
    let_assert!(Some(Err(failed)) = core.ui.search_receiver.recv().await);
    check!(failed.query == "open");

    let message = OutboundMessage::from(Err(failed));
    let_assert!(OutboundMessage::SearchFailed { query, .. } = message);
    check!(query == "open");

    // Fuzzy mode still answers locally
    core.ui.request_search.send(SearchRequest::fuzzy("open")).unwrap();
    let_assert!(Some(Ok(response)) = core.ui.search_receiver.recv().await);
    check!(response.results.len() == 1);
}

#[tokio::test]
async fn router_stops_when_requests_close() {
    let core = RunningCore::json(OPEN_FILE_PAYLOAD);
    let RunningCore {
        ui,
        builder,
        router,
        ..
    } = core;

    drop(ui.request_search);
    router.await.unwrap();
    builder.await.unwrap();
}
