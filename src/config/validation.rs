//! Configuration validation.
//!
//! Serde handles syntax; this module checks that addresses parse and that the
//! upstream base is something the HTTP client can reach. All errors are
//! collected rather than stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("upstream.base_url `{url}` is not a valid URL: {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error("upstream.base_url scheme `{0}` is not supported (expected http)")]
    UpstreamScheme(String),

    #[error("upstream.base_url `{0}` must not carry a query or fragment")]
    UpstreamSuffix(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if let Err(e) = validate_upstream(&config.upstream.base_url) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_upstream(base_url: &str) -> Result<(), ValidationError> {
    let url = Url::parse(base_url).map_err(|e| ValidationError::UpstreamUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    // The pooled hyper client only speaks plain http.
    if url.scheme() != "http" {
        return Err(ValidationError::UpstreamScheme(url.scheme().to_string()));
    }
    if url.host_str().is_none() {
        return Err(ValidationError::UpstreamUrl {
            url: base_url.to_string(),
            reason: "missing host".to_string(),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ValidationError::UpstreamSuffix(base_url.to_string()));
    }
    Ok(())
}
