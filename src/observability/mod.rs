//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! The request ID set in `http::request` is attached to every request span.

pub mod logging;
pub mod metrics;
