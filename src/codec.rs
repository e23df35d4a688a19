//! Decode/encode device profiles from/to JSON text.
//!
//! Decoding is a closed-schema walk: every key at every level must be known, every value
//! must have the expected JSON type, and the first problem aborts the whole decode with a
//! [`JsonError`] that pinpoints the offending node (`.boot_ui.flags[2]`, `[1].id`, ...).
//!
//! Encoding emits only fields that differ from their defaults, so `encode` of a
//! default [`Device`] is `{}`.

use crate::device::Device;
use crate::schema::{decode_object, encode_object, DEVICE_FIELDS};
use crate::value::JsonType;
use serde_json::Value;
use std::fmt;

/// Location of a node inside the document being decoded.
///
/// Object members append `.key`, array elements append `[i]`. The root renders as `.`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context(String);

impl Context {
    pub fn root() -> Self {
        Context(String::new())
    }

    pub fn key(&self, key: &str) -> Self {
        Context(format!("{}.{}", self.0, key))
    }

    pub fn index(&self, index: usize) -> Self {
        Context(format!("{}[{}]", self.0, index))
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str(".")
        } else {
            f.write_str(&self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonError {
    /// Input is not well-formed JSON. Carries the parser's message; there is no context.
    #[error("Failed to parse JSON: {message}")]
    Parse { message: String },
    #[error("Expected {expected}, but found {actual} at {context}")]
    MismatchedType {
        context: String,
        expected: JsonType,
        actual: JsonType,
    },
    /// Key not part of the schema at this level.
    #[error("Unknown key at {context}")]
    UnknownKey { context: String },
    /// String not found in the lookup table for this field.
    #[error("Unknown value at {context}")]
    UnknownValue { context: String },
}

impl JsonError {
    pub(crate) fn mismatched(context: &Context, expected: JsonType, node: &Value) -> Self {
        JsonError::MismatchedType {
            context: context.to_string(),
            expected,
            actual: JsonType::of(node),
        }
    }

    pub(crate) fn unknown_key(context: &Context) -> Self {
        JsonError::UnknownKey {
            context: context.to_string(),
        }
    }

    pub(crate) fn unknown_value(context: &Context) -> Self {
        JsonError::UnknownValue {
            context: context.to_string(),
        }
    }

    /// Path of the offending node; `None` for parse errors.
    pub fn context(&self) -> Option<&str> {
        match self {
            JsonError::Parse { .. } => None,
            JsonError::MismatchedType { context, .. }
            | JsonError::UnknownKey { context }
            | JsonError::UnknownValue { context } => Some(context),
        }
    }
}

fn parse(json: &str) -> Result<Value, JsonError> {
    serde_json::from_str(json).map_err(|e| JsonError::Parse {
        message: e.to_string(),
    })
}

/// Decode a single device from JSON text. The root must be an object.
pub fn decode(json: &str) -> Result<Device, JsonError> {
    decode_value(&parse(json)?)
}

/// Decode a list of devices from JSON text. The root must be an array of objects.
pub fn decode_list(json: &str) -> Result<Vec<Device>, JsonError> {
    decode_list_value(&parse(json)?)
}

pub fn decode_value(root: &Value) -> Result<Device, JsonError> {
    decode_device(root, &Context::root())
}

pub fn decode_list_value(root: &Value) -> Result<Vec<Device>, JsonError> {
    let items = root
        .as_array()
        .ok_or_else(|| JsonError::mismatched(&Context::root(), JsonType::Array, root))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| decode_device(item, &Context::root().index(i)))
        .collect()
}

fn decode_device(node: &Value, context: &Context) -> Result<Device, JsonError> {
    let mut device = Device::default();
    decode_object(&mut device, node, context, DEVICE_FIELDS)?;
    Ok(device)
}

/// Build the canonical JSON tree for a device.
pub fn encode_value(device: &Device) -> Value {
    Value::Object(encode_object(device, DEVICE_FIELDS))
}

/// Encode a device as minified JSON text.
pub fn encode(device: &Device) -> String {
    encode_value(device).to_string()
}

/// Encode a device as indented JSON text.
pub fn encode_pretty(device: &Device) -> String {
    format!("{:#}", encode_value(device))
}
