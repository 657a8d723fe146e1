//! Course search proxy library.

pub mod config;
pub mod course;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ProxyConfig;
pub use course::{normalize, CourseRecord};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
