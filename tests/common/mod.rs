//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `connections`: three entries used to check fuzzy ordering
//! - `two_projects`: entries spread across `p1` and `p2`, one project per payload shape
//!
//! [`CannedServer`] answers every HTTP request on a local port with one fixed response.
//!
//! [`RunningCore`] wires a builder and router to a fresh set of ports, the same way the
//! binary does, so tests can talk to the core purely through messages.

#![allow(dead_code)] // Helpers used across different integration test crates

use hovercraft_search::logging;
use reqwest::Url;
use hovercraft_search::ports::{self, UiPorts};
use hovercraft_search::{IndexBuilder, IndexHandle, IndexOptions, PayloadSource, QueryRouter};
use rstest::fixture;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

/// The single-project payload from the end-to-end scenario.
pub const OPEN_FILE_PAYLOAD: &str = r#"{"p1": {"projectId":"p1","pages":[{"entries":[{"hover":{"contents":{"value":"open file"}},"definition":{"uri":"file:///a","range":{}},"moniker":null,"rootPath":"/a"}]}]}}"#;

/// Builds a hover entry whose hover text is `text`.
pub fn entry(text: &str, uri: &str) -> Value {
    json!({
        "hover": {"contents": {"kind": "markdown", "value": text}},
        "definition": {"uri": uri, "range": {"start": {"line": 1, "character": 0}, "end": {"line": 1, "character": 4}}},
        "moniker": null,
        "rootPath": "/src"
    })
}

#[fixture]
pub fn connections() -> String {
    json!([
        entry("initialize connection", "file:///a"),
        entry("close connection", "file:///b"),
        entry("connect", "file:///c"),
    ])
    .to_string()
}

#[fixture]
pub fn two_projects() -> String {
    json!({
        "p1": {"projectId": "p1", "pages": [{"entries": [
            entry("open file", "file:///p1/a"),
            entry("read file", "file:///p1/b"),
        ]}]},
        "p2": [{"entries": [
            entry("open socket", "file:///p2/a"),
            entry("read socket", "file:///p2/b"),
        ]}]
    })
    .to_string()
}

/// A temporary directory that is removed when dropped.
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

impl TempWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn create_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }
}

/// A builder and router running as tokio tasks, reachable only through `ui`.
pub struct RunningCore {
    pub ui: UiPorts,
    pub index: IndexHandle,
    pub builder: JoinHandle<()>,
    pub router: JoinHandle<()>,
}

impl RunningCore {
    pub fn start(source: PayloadSource) -> Self {
        Self::start_with(source, |router| router)
    }

    /// Starts the core, letting `configure` adjust the router first.
    pub fn start_with(
        source: PayloadSource,
        configure: impl FnOnce(QueryRouter) -> QueryRouter,
    ) -> Self {
        logging::init();
        let (ui, core) = ports::channel();
        let (builder, index) = IndexBuilder::new(source, IndexOptions::default());
        let builder = builder.spawn(core.project_ids);
        let router = configure(QueryRouter::new(index.clone()));
        let router = tokio::spawn(router.run(core.requests, core.results));

        Self {
            ui,
            index,
            builder,
            router,
        }
    }

    pub fn json(payload: &str) -> Self {
        Self::start(PayloadSource::Json(payload.to_string()))
    }
}

/// A local HTTP/1.1 server returning the same status and JSON body to every request.
pub struct CannedServer {
    pub url: Url,
    /// Request lines (`GET /path?query HTTP/1.1`) in arrival order
    pub requests: UnboundedReceiver<String>,
}

impl CannedServer {
    /// Binds an ephemeral port on 127.0.0.1 and starts serving.
    ///
    /// # Panics
    /// Panics if the listener cannot be bound.
    pub async fn start(status: u16, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no local address");
        let (tx, requests) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let body = body.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let head = read_head(&mut stream).await;
                    if let Some(line) = head.lines().next() {
                        let _ = tx.send(line.to_string());
                    }

                    let reason = if status == 200 { "OK" } else { "Error" };
                    let response = format!(
                        "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        let url = Url::parse(&format!("http://{addr}/")).expect("Listener address is a valid URL");
        Self { url, requests }
    }

    pub async fn ok(body: &Value) -> Self {
        Self::start(200, body.to_string()).await
    }
}

/// Reads until the end of the request headers. Requests here never carry a body.
async fn read_head(stream: &mut tokio::net::TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}
