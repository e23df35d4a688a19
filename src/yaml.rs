//! Convert a YAML document tree into the JSON tree the decoder consumes.
//!
//! Mapping order is kept, so decode errors are reported in the order keys appear in the
//! YAML source. Scalars spelled as YAML 1.1 booleans (`yes`, `No`, `ON`, ...) become
//! booleans.

use serde_json::{Map, Number, Value as Json};
use serde_yaml::Value as Yaml;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Cannot convert non-finite number {0} to JSON")]
    NonFiniteNumber(f64),
    #[error("Cannot use a {0} as a mapping key")]
    UnsupportedKey(&'static str),
}

/// Transcode one YAML node (recursively) to JSON.
pub fn yaml_to_json(node: &Yaml) -> Result<Json, ConvertError> {
    Ok(match node {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(*b),
        Yaml::Number(n) => number_to_json(n)?,
        Yaml::String(s) => match yaml11_bool(s) {
            Some(b) => Json::Bool(b),
            None => Json::String(s.clone()),
        },
        Yaml::Sequence(items) => Json::Array(
            items
                .iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                object.insert(key_to_string(key)?, yaml_to_json(value)?);
            }
            Json::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(&tagged.value)?,
    })
}

fn number_to_json(n: &serde_yaml::Number) -> Result<Json, ConvertError> {
    if let Some(i) = n.as_i64() {
        return Ok(Json::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Json::from(u));
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    Number::from_f64(f)
        .map(Json::Number)
        .ok_or(ConvertError::NonFiniteNumber(f))
}

fn yaml11_bool(s: &str) -> Option<bool> {
    match s {
        "y" | "Y" | "yes" | "Yes" | "YES" | "true" | "True" | "TRUE" | "on" | "On" | "ON" => {
            Some(true)
        }
        "n" | "N" | "no" | "No" | "NO" | "false" | "False" | "FALSE" | "off" | "Off" | "OFF" => {
            Some(false)
        }
        _ => None,
    }
}

fn key_to_string(key: &Yaml) -> Result<String, ConvertError> {
    match key {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Tagged(tagged) => key_to_string(&tagged.value),
        Yaml::Sequence(_) => Err(ConvertError::UnsupportedKey("sequence")),
        Yaml::Mapping(_) => Err(ConvertError::UnsupportedKey("mapping")),
    }
}
