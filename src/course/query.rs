//! Search request body accepted by the backend's `/classes/search`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A course search.
///
/// The default value serializes to `{"keywords":""}`, which is also what the
/// proxy forwards when an inbound body cannot be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keywords: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
}

/// Breadth and requirement filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    /// Match any listed requirement instead of all of them.
    #[serde(default)]
    pub requirements_or: bool,
}

impl SearchQuery {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            ..Default::default()
        }
    }

    /// The body sent upstream in place of an unreadable search request.
    pub fn fallback_body() -> Value {
        json!({ "keywords": "" })
    }
}
