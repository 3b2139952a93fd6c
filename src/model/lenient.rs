//! Deserializers for text fields that also take numbers and booleans, stored as their
//! string form (`5550100` becomes `"5550100"`).

use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;

fn coerce<E: Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(E::custom(format!("expected a string, got {}", other))),
    }
}

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    coerce(Value::deserialize(deserializer)?)?.ok_or_else(|| D::Error::custom("expected a string, got null"))
}

pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(value) => coerce(value),
        None => Ok(None),
    }
}
