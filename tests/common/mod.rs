//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use course_proxy::config::ProxyConfig;
use course_proxy::{HttpServer, Shutdown};

/// Size of the body served by `/large/classes/all`.
pub const LARGE_BODY_LEN: usize = 4 * 1024 * 1024;

/// A search request as the mock backend received it.
#[derive(Debug, Clone)]
pub struct CapturedSearch {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Clone, Default)]
pub struct Recorded {
    searches: Arc<Mutex<Vec<CapturedSearch>>>,
}

impl Recorded {
    pub fn searches(&self) -> Vec<CapturedSearch> {
        self.searches.lock().unwrap().clone()
    }
}

/// Start a mock course backend on an ephemeral port.
///
/// - `/classes/all` returns `{"courses":[]}` as JSON
/// - `/classes/search` records the request and returns `[]`
/// - `/large/classes/all` returns a multi-megabyte text body
/// - anything else is a JSON 404
pub async fn start_upstream() -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/classes/all",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], r#"{"courses":[]}"#) }),
        )
        .route("/classes/search", post(capture_search))
        .route("/large/classes/all", get(|| async { large_body() }))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "application/json")],
                r#"{"error":"not found"}"#,
            )
        })
        .with_state(recorded.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, recorded)
}

async fn capture_search(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    recorded.searches.lock().unwrap().push(CapturedSearch {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });
    ([(header::CONTENT_TYPE, "application/json")], "[]")
}

pub fn large_body() -> String {
    "abcdefghijklmnop".repeat(LARGE_BODY_LEN / 16)
}

/// Start a raw TCP backend that answers every request with `status` and
/// `body` and no content type.
pub async fn start_raw_upstream(status: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

/// An address with nothing listening on it.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the proxy pointed at `base_url`. Keep the returned `Shutdown` alive
/// for the duration of the test.
pub async fn start_proxy(base_url: String) -> (SocketAddr, Shutdown) {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = base_url;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
