use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{HbnbError, Result};
use crate::model::Kind;

/// Attribute carrying the Kind tag in every record
pub const KIND_TAG: &str = "__class__";

/// Flat, tagged attribute record
///
/// Attribute names map to JSON primitives (strings, integers, floats, and the
/// list of strings used for `amenity_ids`). Keys iterate in sorted order, so
/// encoding the same record always yields the same bytes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Empty record tagged with `kind`
    pub fn tagged(kind: Kind) -> Self {
        let mut map = Map::new();
        map.insert(KIND_TAG.to_string(), Value::String(kind.as_str().to_string()));
        Self(map)
    }

    /// Wrap a JSON value that must be an object
    ///
    /// # Errors
    ///
    /// `InvalidRecord` when `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(HbnbError::InvalidRecord {
                kind: "unknown".to_string(),
                reason: format!("expected an object, found {}", json_type(&other)),
            }),
        }
    }

    /// The raw `__class__` value, if it is a string
    pub fn kind_tag(&self) -> Option<&str> {
        self.0.get(KIND_TAG).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.0.get(attribute)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.0.contains_key(attribute)
    }

    pub fn insert(&mut self, attribute: &str, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(attribute.to_string(), value.into())
    }

    pub fn remove(&mut self, attribute: &str) -> Option<Value> {
        self.0.remove(attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
