//! # JSON Codec
//!
//! JSON cannot express `undefined`, so it travels as a one-key sentinel
//! object:
//!
//! ```text
//! Value::Undefined  ⇄  {"$undefined": true}
//! ```
//!
//! `$undefined` is not a breakpoint key, so a sentinel is never mistaken for
//! a multi-breakpoint value. Opaque leaves have no textual form and fail to
//! serialize.

use crate::error::DocumentError;
use crate::value::{Object, Value};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

pub const UNDEFINED_SENTINEL: &str = "$undefined";

fn is_sentinel(map: &serde_json::Map<String, serde_json::Value>) -> bool {
    map.len() == 1 && map.get(UNDEFINED_SENTINEL) == Some(&serde_json::Value::Bool(true))
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(UNDEFINED_SENTINEL, &true)?;
                map.end()
            }
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Opaque(leaf) => Err(S::Error::custom(DocumentError::OpaqueNotSerializable {
                type_name: leaf.type_name().to_string(),
            })),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) if is_sentinel(&map) => Value::Undefined,
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = DocumentError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(serde_json::to_value(value)?)
    }
}
