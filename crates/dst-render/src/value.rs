//! Value helpers shared by the renderer and accessors.
//!
//! Slots and frames carry plain [`serde_json::Value`]s. `Value::Null` stands
//! for "undefined": a missing field, an index past the end, or a frame
//! component that does not exist.

use std::fmt;

use serde_json::{Number, Value};

/// One step of a property path: an object key or an array position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    /// Looks this segment up in `value`, returning `None` when absent.
    ///
    /// A numeric key also indexes arrays, so `"0"` and `Index(0)` agree.
    pub fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match (self, value) {
            (Segment::Key(key), Value::Object(map)) => map.get(key),
            (Segment::Key(key), Value::Array(arr)) => arr.get(key.parse::<usize>().ok()?),
            (Segment::Index(index), Value::Array(arr)) => arr.get(*index),
            (Segment::Index(index), Value::Object(map)) => map.get(&index.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, ".{}", key),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Returns whether a driver value opens its section.
///
/// `false`, `0`, `""` and `null` are falsy. Everything else is truthy,
/// including empty objects. Arrays are iterated rather than tested, but an
/// array is truthy here regardless of length.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Formats a value for output.
///
/// `null` renders as `undefined`; arrays and objects use their JSON form.
/// Floats without a fractional part print as integers, so `2.0` is `2`.
pub fn stringify(value: &Value, undefined: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => undefined.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}
