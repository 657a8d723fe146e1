//! The course record returned by the search backend.
//!
//! The backend is not consistent about key naming: some payloads carry
//! `class-type`, others `class_type`. Both forms are kept as separate fields
//! so a record serializes back out exactly as it arrived; see
//! [`crate::course::normalize`] for reconciling them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One course or class offering.
///
/// Built from an untyped JSON object with [`CourseRecord::from_wire`], which
/// never fails: mistyped or missing values become absent (or empty for the
/// always-present fields). Keys this type does not know are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct CourseRecord {
    pub code: String,
    #[serde(rename = "class-type", skip_serializing_if = "Option::is_none")]
    pub class_type_wire: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_type: Option<String>,
    pub count: String,
    pub title: String,
    pub subtitle: String,
    pub special: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub location: String,
    pub id: String,
    pub units: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(rename = "course-description", skip_serializing_if = "Option::is_none")]
    pub course_description_wire: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_description: Option<String>,
    #[serde(rename = "class-description", skip_serializing_if = "Option::is_none")]
    pub class_description_wire: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_description: Option<String>,
    pub capacity: u32,
    pub enrolled: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waitlist: Option<u32>,
    #[serde(rename = "waitlist-max", skip_serializing_if = "Option::is_none")]
    pub waitlist_max_wire: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waitlist_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    pub seats: BTreeMap<String, u32>,
    /// Fields this version of the schema does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Every key [`CourseRecord`] maps to a named field.
const KNOWN_KEYS: &[&str] = &[
    "code",
    "class-type",
    "class_type",
    "count",
    "title",
    "subtitle",
    "special",
    "link",
    "instructor",
    "days",
    "start",
    "end",
    "location",
    "id",
    "units",
    "mode",
    "course-description",
    "course_description",
    "class-description",
    "class_description",
    "capacity",
    "enrolled",
    "waitlist",
    "waitlist-max",
    "waitlist_max",
    "requirements",
    "seats",
];

impl CourseRecord {
    /// Build a record from a raw JSON object, looking up every known key
    /// (including alternate wire spellings) explicitly.
    pub fn from_wire(raw: &Map<String, Value>) -> Self {
        let extra = raw
            .iter()
            .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            code: text(raw, "code").unwrap_or_default(),
            class_type_wire: text(raw, "class-type"),
            class_type: text(raw, "class_type"),
            count: text(raw, "count").unwrap_or_default(),
            title: text(raw, "title").unwrap_or_default(),
            subtitle: text(raw, "subtitle").unwrap_or_default(),
            special: text(raw, "special").unwrap_or_default(),
            link: text(raw, "link").unwrap_or_default(),
            instructor: text(raw, "instructor"),
            days: text(raw, "days"),
            start: text(raw, "start"),
            end: text(raw, "end"),
            location: text(raw, "location").unwrap_or_default(),
            id: text(raw, "id").unwrap_or_default(),
            units: text(raw, "units").unwrap_or_default(),
            mode: text(raw, "mode"),
            course_description_wire: text(raw, "course-description"),
            course_description: text(raw, "course_description"),
            class_description_wire: text(raw, "class-description"),
            class_description: text(raw, "class_description"),
            capacity: count(raw, "capacity").unwrap_or_default(),
            enrolled: count(raw, "enrolled").unwrap_or_default(),
            waitlist: count(raw, "waitlist"),
            waitlist_max_wire: count(raw, "waitlist-max"),
            waitlist_max: count(raw, "waitlist_max"),
            requirements: raw.get("requirements").and_then(Value::as_array).map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            }),
            seats: raw
                .get("seats")
                .and_then(Value::as_object)
                .map(|seats| {
                    seats
                        .iter()
                        .filter_map(|(label, n)| as_count(n).map(|n| (label.clone(), n)))
                        .collect()
                })
                .unwrap_or_default(),
            extra,
        }
    }

    /// Seats still open, if the record is consistent enough to tell.
    pub fn open_seats(&self) -> Option<u32> {
        self.capacity.checked_sub(self.enrolled)
    }

    /// One-line human-readable description.
    pub fn summary(&self) -> String {
        let mut line = format!("{:<12} {}", self.code, self.title);
        if !self.subtitle.is_empty() {
            line.push_str(": ");
            line.push_str(&self.subtitle);
        }
        if let Some(class_type) = &self.class_type {
            line.push_str(&format!(" [{class_type}]"));
        }
        line.push_str(&format!("  {}/{} enrolled", self.enrolled, self.capacity));
        if let (Some(waitlist), Some(max)) = (self.waitlist, self.waitlist_max) {
            line.push_str(&format!(", waitlist {waitlist}/{max}"));
        }
        line
    }
}

impl From<Map<String, Value>> for CourseRecord {
    fn from(raw: Map<String, Value>) -> Self {
        Self::from_wire(&raw)
    }
}

/// Extract course records from a backend payload.
///
/// Accepts a bare array of objects or an object with a `courses` array;
/// anything else yields no records.
pub fn courses_from_payload(payload: Value) -> Vec<CourseRecord> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(CourseRecord::from(map)),
                _ => None,
            })
            .collect(),
        Value::Object(mut map) => match map.remove("courses") {
            Some(courses @ Value::Array(_)) => courses_from_payload(courses),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

// Numbers are accepted for text fields; the backend is loose about `units`
// and `count`.
fn text(raw: &Map<String, Value>, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn count(raw: &Map<String, Value>, key: &str) -> Option<u32> {
    raw.get(key).and_then(as_count)
}

fn as_count(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}
