//! Query builder for record selection.
//!
//! A [`Select`] carries equality and set-membership filters, an optional
//! sort field, and a limit. Backends interpret it; the in-memory backend
//! uses [`Select::apply`] directly.

use serde_json::Value;
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A filter on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value.
    Eq(String, Value),
    /// Field is one of the values.
    In(String, Vec<Value>),
}

impl Filter {
    /// Check a record against this filter. Records that are not JSON
    /// objects never match.
    pub fn matches(&self, record: &Value) -> bool {
        let Some(object) = record.as_object() else {
            return false;
        };
        match self {
            Filter::Eq(field, value) => object.get(field) == Some(value),
            Filter::In(field, values) => object
                .get(field)
                .map(|v| values.contains(v))
                .unwrap_or(false),
        }
    }
}

/// A record selection query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    filters: Vec<Filter>,
    order_by: Option<(String, Direction)>,
    limit: Option<usize>,
}

impl Select {
    /// Select everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a field to equal a value.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(field.into(), value.into()));
        self
    }

    /// Require a field to be one of the given values.
    pub fn is_in(mut self, field: impl Into<String>, values: Vec<Value>) -> Self {
        self.filters.push(Filter::In(field.into(), values));
        self
    }

    /// Sort ascending by a field.
    pub fn order_asc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some((field.into(), Direction::Ascending));
        self
    }

    /// Sort descending by a field.
    pub fn order_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some((field.into(), Direction::Descending));
        self
    }

    /// Cap the number of returned records.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Check a record against every filter.
    pub fn matches(&self, record: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Filter, sort, and truncate a row set.
    pub fn apply(&self, rows: &[Value]) -> Vec<Value> {
        let mut selected: Vec<Value> = rows
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        if let Some((field, direction)) = &self.order_by {
            selected.sort_by(|a, b| {
                let ordering = compare_values(
                    a.get(field.as_str()).unwrap_or(&Value::Null),
                    b.get(field.as_str()).unwrap_or(&Value::Null),
                );
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

/// Order JSON scalars: null < bool < number < string. Arrays and objects
/// compare equal (they are not meaningful sort keys).
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            _ => 4,
        }
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
