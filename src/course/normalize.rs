//! Reconciliation of kebab-case and snake_case course keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::course::record::CourseRecord;

/// Which revision of the backend's course shape to reconcile against.
///
/// `V1` is the lean shape without scheduling or waitlist data. `V2` is the
/// richer superset that also carries `waitlist-max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    V1,
    #[default]
    V2,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown schema version `{0}` (expected v1 or v2)")]
pub struct ParseSchemaVersionError(String);

impl FromStr for SchemaVersion {
    type Err = ParseSchemaVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            _ => Err(ParseSchemaVersionError(s.to_string())),
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::V2 => f.write_str("v2"),
        }
    }
}

/// Fills canonical keys from their wire alternates for one schema version.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    schema: SchemaVersion,
}

impl Normalizer {
    pub fn new(schema: SchemaVersion) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Return a copy of `raw` with every ambiguous field resolved.
    ///
    /// The canonical key wins when both are present. Wire keys are left in
    /// place, and a field with neither spelling stays absent.
    pub fn normalize(&self, raw: &CourseRecord) -> CourseRecord {
        let mut out = raw.clone();
        out.class_type = reconcile(&raw.class_type, &raw.class_type_wire);
        out.course_description = reconcile(&raw.course_description, &raw.course_description_wire);
        out.class_description = reconcile(&raw.class_description, &raw.class_description_wire);
        if self.schema == SchemaVersion::V2 {
            out.waitlist_max = reconcile(&raw.waitlist_max, &raw.waitlist_max_wire);
        }
        out
    }
}

/// Normalize against the default (v2) schema.
pub fn normalize(raw: &CourseRecord) -> CourseRecord {
    Normalizer::default().normalize(raw)
}

fn reconcile<T: Clone>(canonical: &Option<T>, wire: &Option<T>) -> Option<T> {
    canonical.as_ref().or(wire.as_ref()).cloned()
}
