//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → proxy.rs (/api/all, /api/search)
//!     → upstream.rs (one outbound call to the course backend)
//!     → response.rs (status + content type + streamed body)
//!     → Send to client
//! ```

pub mod proxy;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use request::X_REQUEST_ID;
pub use response::{ProxyError, DEFAULT_CONTENT_TYPE};
pub use server::{AppState, HttpServer};
pub use upstream::{Upstream, UpstreamError};
