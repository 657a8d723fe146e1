//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the `/api` handlers
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use axum::{
    http::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::proxy;
use crate::http::request::{
    propagate_request_id_layer, request_id, set_request_id_layer,
};
use crate::http::upstream::Upstream;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Upstream,
    pub config: Arc<ProxyConfig>,
}

/// HTTP server for the course proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            upstream: Upstream::new(&config.upstream.base_url),
            config: config.clone(),
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/api/all", get(proxy::list_all))
            .route("/api/search", post(proxy::search))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |request: &Request<_>| {
                            tracing::info_span!(
                                "request",
                                request_id = %request_id(request.headers()),
                                method = %request.method(),
                                path = %request.uri().path(),
                            )
                        },
                    ))
                    .layer(propagate_request_id_layer()),
            )
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
