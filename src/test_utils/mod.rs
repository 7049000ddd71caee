//! Shared helpers for unit and integration tests.
//!
//! Enabled with the `test-utils` cargo feature (the crate dev-depends on
//! itself with that feature, the same as any downstream crate that wants
//! these helpers for its own tests).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::metadata::MANIFEST_FILENAME;

/// A one-endpoint HTTP stub standing in for the release feed.
///
/// Serves a fixed status and body for every request, records each raw
/// request (request line plus headers, lowercased), and counts hits so
/// tests can assert memoization.
pub struct StubFeed {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubFeed {
    /// Binds to an ephemeral localhost port and serves `status`/`body`
    /// until the test ends.
    pub async fn serve(status: u16, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub feed");
        let addr = listener.local_addr().expect("stub feed address");
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let task_hits = Arc::clone(&hits);
        let task_requests = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                task_hits.fetch_add(1, Ordering::SeqCst);

                // Read until the end of the request headers; GET requests
                // carry no body.
                let mut raw = Vec::new();
                let mut chunk = [0u8; 1024];
                while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => raw.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&raw).to_lowercase();
                task_requests.lock().expect("stub feed requests").push(request);

                let response = format!(
                    "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len(),
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { addr, hits, requests }
    }

    /// API root URL for pointing a resolver at this stub.
    pub fn api_root(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// The most recent raw request (lowercased), if any was served.
    pub fn last_request(&self) -> Option<String> {
        self.requests.lock().expect("stub feed requests").last().cloned()
    }
}

/// One release entry for a stub feed body.
///
/// Draft entries get a `null` publication timestamp and no notes, the way
/// the real feed serves them.
pub fn release_entry(tag: &str, draft: bool) -> serde_json::Value {
    let published_at: Option<&str> = (!draft).then_some("2024-05-01T10:00:00Z");
    let body: Option<String> = (!draft).then(|| format!("Notes for {tag}."));
    serde_json::json!({
        "tag_name": tag,
        "zipball_url": zipball_url(tag),
        "published_at": published_at,
        "body": body,
        "draft": draft,
    })
}

/// The zipball URL `release_entry` assigns to a tag, for asserting against.
pub fn zipball_url(tag: &str) -> String {
    format!("https://api.github.com/repos/jane/my-extension/zipball/{tag}")
}

/// Serializes release entries into a feed response body.
pub fn feed_body(entries: Vec<serde_json::Value>) -> String {
    serde_json::Value::Array(entries).to_string()
}

/// Writes a minimal extension manifest under `root/<slug>/` and returns the
/// manifest path.
pub fn write_manifest(root: &Path, slug: &str, version: &str, update_url: &str) -> PathBuf {
    let dir = root.join(slug);
    std::fs::create_dir_all(&dir).expect("create extension directory");
    let path = dir.join(MANIFEST_FILENAME);
    let manifest = format!(
        r#"[extension]
name = "My Extension"
version = "{version}"
description = "Does something useful."
author = "Jane Developer"
author_url = "https://example.com/jane"
homepage = "https://example.com/my-extension"
update_url = "{update_url}"
requires_host = "6.6"
"#
    );
    std::fs::write(&path, manifest).expect("write extension manifest");
    path
}
