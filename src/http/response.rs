//! Response handling and transformation.
//!
//! # Responsibilities
//! - Forward backend status and body to the client untouched
//! - Carry over the backend content type, defaulting to JSON
//! - Map transport failures to 502 Bad Gateway
//!
//! Bodies are wrapped, never collected, so payload size does not affect
//! memory use.

use axum::{
    body::{Body, Bytes, HttpBody},
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
    BoxError, Json,
};
use serde_json::json;
use thiserror::Error;

use crate::http::upstream::UpstreamError;

/// Content type used when the backend does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Failures a proxy handler cannot pass through.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("failed to encode search body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            ProxyError::Upstream(_) => "upstream unavailable",
            ProxyError::Encode(_) => "failed to encode request",
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Rebuild a backend response for the client.
///
/// Only the status, the content type and the body stream are kept.
pub fn passthrough<B>(upstream: Response<B>) -> axum::response::Response
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let (parts, body) = upstream.into_parts();
    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    let mut response = Response::new(Body::new(body));
    *response.status_mut() = parts.status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);
    response
}
