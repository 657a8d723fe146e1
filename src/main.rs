//! Course proxy.
//!
//! Browser-facing layer in front of the course-search backend.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                ┌──────────────────────────────────────┐
//!     GET  /api/all    ────▶│  http::server ──▶ http::proxy        │
//!     POST /api/search ────▶│                      │               │
//!                           │                      ▼               │         Course
//!                           │               http::upstream ────────┼──────▶  backend
//!                           │                      │               │  /classes/all
//!     ◀── status, content   │  http::response ◀────┘               │  /classes/search
//!         type, body stream │                                      │
//!                           │  config · observability · lifecycle  │
//!                           └──────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use course_proxy::config::load_startup_config;
use course_proxy::observability::{logging, metrics};
use course_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "course-proxy")]
#[command(about = "Proxy /api/all and /api/search to the course-search backend", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_startup_config(args.config.as_deref())?;

    logging::init(&config.observability);

    tracing::info!("course-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
