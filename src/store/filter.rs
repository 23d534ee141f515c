//! # Filter and Sort Expressions
//!
//! Represents the filter documents handed to the document store.
//! Paths are dotted (`mealTypes.mealtype_id`); a segment that lands on an
//! array matches if any element matches.

use std::cmp::Ordering;

use serde_json::Value;

/// Sort direction, encoded the way the store encodes it: `1` ascending,
/// `-1` descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Decode a client-supplied direction token. `-1` means descending,
    /// anything else falls back to ascending (passthrough, no validation).
    pub fn from_token(token: &str) -> Self {
        if token.trim() == "-1" {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// A sort clause over a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::by(field, SortDirection::Ascending)
    }
}

/// A single filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals value.
    Eq { path: String, value: Value },

    /// Numeric field within [low, high], inclusive on both bounds.
    Between { path: String, low: i64, high: i64 },

    /// Field is a member of the given set.
    In { path: String, values: Vec<Value> },
}

impl Condition {
    pub fn eq(path: impl Into<String>, value: Value) -> Self {
        Condition::Eq {
            path: path.into(),
            value,
        }
    }

    pub fn between(path: impl Into<String>, low: i64, high: i64) -> Self {
        Condition::Between {
            path: path.into(),
            low,
            high,
        }
    }

    pub fn is_in(path: impl Into<String>, values: Vec<Value>) -> Self {
        Condition::In {
            path: path.into(),
            values,
        }
    }

    /// Check whether a document satisfies this condition.
    pub fn matches(&self, doc: &Value) -> bool {
        let path = match self {
            Condition::Eq { path, .. }
            | Condition::Between { path, .. }
            | Condition::In { path, .. } => path,
        };

        let segments: Vec<&str> = path.split('.').collect();
        let mut resolved = Vec::new();
        collect_path(doc, &segments, &mut resolved);

        resolved.iter().any(|&candidate| match self {
            Condition::Eq { value, .. } => values_equal(candidate, value),
            Condition::Between { low, high, .. } => match candidate.as_f64() {
                Some(n) => n >= *low as f64 && n <= *high as f64,
                None => false,
            },
            Condition::In { values, .. } => values.iter().any(|v| values_equal(candidate, v)),
        })
    }
}

/// Collect every value reachable through a dotted path, fanning out
/// across arrays along the way.
fn collect_path<'a>(value: &'a Value, segments: &[&str], out: &mut Vec<&'a Value>) {
    match segments.split_first() {
        None => match value {
            // A leaf array matches on its elements.
            Value::Array(items) => out.extend(items.iter()),
            other => out.push(other),
        },
        Some((head, rest)) => match value {
            Value::Object(map) => {
                if let Some(next) = map.get(*head) {
                    collect_path(next, rest, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    collect_path(item, segments, out);
                }
            }
            _ => {}
        },
    }
}

/// Equality that treats `1` and `1.0` as the same number.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => a == b,
    }
}

/// Ordering used by `find_sorted`: numbers by value, strings
/// lexicographically, anything else compares equal.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// A set of conditions combined with AND logic. An empty filter matches
/// every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }
}
