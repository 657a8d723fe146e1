//! Client for the course-search backend.

use axum::body::{Body, Bytes};
use axum::http::{header, uri::InvalidUri, HeaderValue, Method, Request, Response, Uri};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

/// Backend path listing every course.
pub const ALL_PATH: &str = "/classes/all";

/// Backend path for keyword search.
pub const SEARCH_PATH: &str = "/classes/search";

/// Errors reaching the backend.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream uri: {0}")]
    Uri(#[from] InvalidUri),

    #[error("failed to build upstream request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("upstream request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),
}

/// Pooled HTTP client bound to one base URL.
///
/// Responses are returned as soon as headers arrive; the body is left as a
/// stream for the caller to forward.
#[derive(Clone)]
pub struct Upstream {
    base: String,
    client: Client<HttpConnector, Body>,
}

impl Upstream {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            base: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Full URI for a backend path.
    pub fn endpoint(&self, path: &str) -> Result<Uri, UpstreamError> {
        Ok(format!("{}{}", self.base, path).parse()?)
    }

    pub async fn get(&self, path: &str) -> Result<Response<Incoming>, UpstreamError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.endpoint(path)?)
            .body(Body::empty())?;
        Ok(self.client.request(request).await?)
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: Bytes,
    ) -> Result<Response<Incoming>, UpstreamError> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint(path)?)
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(Body::from(body))?;
        Ok(self.client.request(request).await?)
    }
}
