//! Extractors for JSON-encoded list-of-object fields
//!
//! Raw movie rows carry fields like `genres` or `crew` as strings of the shape
//! `[{"id": 28, "name": "Action"}, ...]`. Everything here fails soft: a cell
//! that is missing, blank, not JSON, or not an array of objects simply yields
//! nothing.

use serde_json::{Map, Value};

/// Placeholder used wherever a scalar pick has nothing to return.
pub const UNKNOWN: &str = "Unknown";

pub type JsonObject = Map<String, Value>;

/// Parse a cell into the objects of a JSON array.
///
/// Returns an empty list unless `value` is a non-blank string holding a JSON
/// array. Array elements that are not objects are dropped.
pub fn parse_object_list(value: Option<&str>) -> Vec<JsonObject> {
    let text = match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Vec::new(),
    };

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(obj) => Some(obj),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Collect every non-empty string stored under `key`, in source order.
pub fn extract_field(value: Option<&str>, key: &str) -> Vec<String> {
    parse_object_list(value)
        .into_iter()
        .filter_map(|mut obj| match obj.remove(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        })
        .collect()
}

/// A reusable extraction rule bound to one object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldExtractor {
    key: String,
}

impl FieldExtractor {
    pub fn new(key: impl Into<String>) -> Self {
        FieldExtractor { key: key.into() }
    }

    /// Extractor for the `name` field carried by most list columns.
    pub fn names() -> Self {
        Self::new("name")
    }

    pub fn extract(&self, value: Option<&str>) -> Vec<String> {
        extract_field(value, &self.key)
    }
}

/// Extractor for coded attributes such as `iso_639_1` or `iso_3166_1`.
pub fn extract_codes(key: &str) -> FieldExtractor {
    FieldExtractor::new(key)
}

/// Name of the first crew member whose job is exactly `Director`.
pub fn extract_director(crew: Option<&str>) -> String {
    parse_object_list(crew)
        .iter()
        .find(|member| member.get("job").and_then(Value::as_str) == Some("Director"))
        .and_then(|member| member.get("name").and_then(Value::as_str))
        .map_or_else(|| UNKNOWN.to_string(), str::to_string)
}

/// Picks one position out of a list, falling back to a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    position: usize,
    default: String,
}

impl Picker {
    pub fn new(position: usize) -> Self {
        Self::with_default(position, UNKNOWN)
    }

    pub fn with_default(position: usize, default: impl Into<String>) -> Self {
        Picker {
            position,
            default: default.into(),
        }
    }

    pub fn pick(&self, seq: &[String]) -> String {
        seq.get(self.position)
            .filter(|item| !item.is_empty())
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}

pub fn pick_at(position: usize, default: &str) -> Picker {
    Picker::with_default(position, default)
}

/// Keeps the first `n` entries of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taker {
    n: usize,
}

impl Taker {
    pub fn new(n: usize) -> Self {
        Taker { n }
    }

    pub fn take(&self, seq: &[String]) -> Vec<String> {
        seq.iter().take(self.n).cloned().collect()
    }
}

pub fn take_first(n: usize) -> Taker {
    Taker::new(n)
}
