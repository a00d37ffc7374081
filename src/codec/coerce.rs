//! Scalar coercion for boolean, integer and float inputs.

use crate::error::{InputError, Result};
use serde_json::{Number, Value};

/// Target type of a coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// `y`, `yes`, `t`, `true`, `on`, `1` and their negatives.
    Bool,
    /// Whole number; floats are truncated.
    Integer,
    /// Floating point number.
    Float,
}

impl Coercion {
    fn target(self) -> &'static str {
        match self {
            Self::Bool => "a boolean",
            Self::Integer => "an integer",
            Self::Float => "a float",
        }
    }

    /// Convert `value`, naming `key` in the error on failure.
    ///
    /// # Errors
    ///
    /// Returns `TypeConversion` when the value cannot be represented as the
    /// target type.
    pub fn apply(self, key: &str, value: &Value) -> Result<Value> {
        let converted = match self {
            Self::Bool => to_bool(value).map(Value::Bool),
            Self::Integer => to_integer(value).map(|n| Value::Number(n.into())),
            Self::Float => to_float(value).and_then(Number::from_f64).map(Value::Number),
        };

        converted.ok_or_else(|| InputError::TypeConversion {
            key: key.to_string(),
            raw: render_raw(value),
            target: self.target(),
        })
    }
}

/// Parse a truthy or falsy string.
pub fn strtobool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => strtobool(s),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    }
}

fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) if n.is_f64() => n.as_f64().and_then(truncate_f64),
        // u64 values past i64::MAX fail here rather than saturating
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn truncate_f64(f: f64) -> Option<i64> {
    let truncated = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    (truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
        .then_some(truncated as i64)
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn render_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
