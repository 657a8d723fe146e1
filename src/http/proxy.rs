//! `/api/*` handlers forwarding to the course backend.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method},
    response::Response,
};
use serde_json::Value;

use crate::course::SearchQuery;
use crate::http::request::request_id;
use crate::http::response::{passthrough, ProxyError};
use crate::http::server::AppState;
use crate::http::upstream::{ALL_PATH, SEARCH_PATH};
use crate::observability::metrics;

/// `GET /api/all`
pub async fn list_all(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    tracing::debug!(request_id = %request_id, upstream = ALL_PATH, "Proxying course listing");

    match state.upstream.get(ALL_PATH).await {
        Ok(response) => {
            metrics::record_request(&Method::GET, response.status().as_u16(), ALL_PATH, start);
            Ok(passthrough(response))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            let err = ProxyError::from(e);
            metrics::record_request(&Method::GET, err.status().as_u16(), ALL_PATH, start);
            Err(err)
        }
    }
}

/// `POST /api/search`
///
/// An unreadable body is replaced by `{"keywords":""}` rather than rejected.
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ProxyError> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let query = match body {
        Ok(bytes) => parse_search_body(&bytes),
        Err(rejection) => {
            tracing::debug!(request_id = %request_id, error = %rejection, "Search body unreadable");
            SearchQuery::fallback_body()
        }
    };
    let payload = Bytes::from(serde_json::to_vec(&query)?);

    tracing::debug!(request_id = %request_id, upstream = SEARCH_PATH, "Proxying course search");

    match state.upstream.post_json(SEARCH_PATH, payload).await {
        Ok(response) => {
            metrics::record_request(&Method::POST, response.status().as_u16(), SEARCH_PATH, start);
            Ok(passthrough(response))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            let err = ProxyError::from(e);
            metrics::record_request(&Method::POST, err.status().as_u16(), SEARCH_PATH, start);
            Err(err)
        }
    }
}

/// Parse any JSON value, falling back to the empty keyword search.
pub fn parse_search_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Malformed search body, using fallback");
        SearchQuery::fallback_body()
    })
}
