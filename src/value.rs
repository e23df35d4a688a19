//! Runtime type introspection and typed accessors over the generic JSON tree.

use serde_json::Value;
use std::fmt;

/// Type tag of a JSON node, as reported in decode errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    /// Signed integer.
    Integer,
    /// Unsigned integer too large for `i64`.
    UInteger,
    Real,
    String,
    Boolean,
    Array,
    Object,
}

impl JsonType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(n) if n.is_i64() => JsonType::Integer,
            Value::Number(n) if n.is_u64() => JsonType::UInteger,
            Value::Number(_) => JsonType::Real,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Integer => "integer",
            JsonType::UInteger => "uinteger",
            JsonType::Real => "real",
            JsonType::String => "string",
            JsonType::Boolean => "boolean",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read a node as an `i32`. Integral reals are accepted (`255.0` reads as 255).
pub fn as_i32(value: &Value) -> Option<i32> {
    let n = match value {
        Value::Number(n) => n,
        _ => return None,
    };
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).ok();
    }
    if n.is_u64() {
        return None;
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}
