//! Course data shapes.
//!
//! # Data Flow
//! ```text
//! backend JSON payload
//!     → record.rs (explicit key lookup into CourseRecord)
//!     → normalize.rs (canonical keys filled from wire keys)
//!     → display (course-cli)
//! ```
//!
//! Nothing here touches the network; the proxy forwards backend bodies
//! without parsing them.

pub mod normalize;
pub mod query;
pub mod record;

pub use normalize::{normalize, Normalizer, SchemaVersion};
pub use query::{Filters, SearchQuery};
pub use record::{courses_from_payload, CourseRecord};
