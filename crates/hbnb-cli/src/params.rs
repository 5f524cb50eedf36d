//! `key=value` parameters for `create` and `update`
//!
//! Quoted values are strings, with `_` standing for a space and `\"` for a
//! literal quote. Unquoted values take the type of the attribute they set.

use std::error::Error;

use hbnb_core::codec::{self, KIND_TAG};
use hbnb_core::model::Entity;
use serde_json::Value;

/// Attributes no command may set
const PROTECTED: &[&str] = &["id", "created_at", "updated_at", KIND_TAG];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub raw: String,
}

impl Param {
    pub fn new(key: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw: raw.into(),
        }
    }
}

/// Split `key=value`; `None` when there is no `=` or the key is empty
pub fn parse_param(arg: &str) -> Option<Param> {
    let (key, raw) = arg.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some(Param::new(key, raw))
}

fn unquote(raw: &str) -> (String, bool) {
    let quoted = raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"');
    let inner = if quoted { &raw[1..raw.len() - 1] } else { raw };
    (inner.replace("\\\"", "\"").replace('_', " "), quoted)
}

/// Convert `raw` to a JSON value shaped like `current`
///
/// # Errors
///
/// A message when the text does not parse as the attribute's type.
pub fn coerce(key: &str, raw: &str, current: Option<&Value>) -> Result<Value, String> {
    let (text, quoted) = unquote(raw);
    let invalid = || format!("** invalid value for {}: {} **", key, raw);

    match current {
        Some(Value::Number(n)) if n.is_i64() && !quoted => {
            text.trim().parse::<i64>().map(Value::from).map_err(|_| invalid())
        }
        Some(Value::Number(_)) if !quoted => text
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid())
            .and_then(|f| serde_json::Number::from_f64(f).map(Value::Number).ok_or_else(invalid)),
        Some(Value::Number(_)) | Some(Value::Array(_)) => Err(invalid()),
        _ => Ok(Value::String(text)),
    }
}

/// Apply `params` to a copy of `entity`
///
/// Unknown attribute names are ignored.
///
/// # Errors
///
/// Protected attributes, values of the wrong type, and records the codec
/// rejects.
pub fn apply(entity: &Entity, params: &[Param]) -> Result<Entity, Box<dyn Error>> {
    let mut record = codec::serialize(entity)?;
    for param in params {
        if PROTECTED.contains(&param.key.as_str()) {
            return Err(format!("** cannot update {} **", param.key).into());
        }
        let value = coerce(&param.key, &param.raw, record.get(&param.key))?;
        record.insert(&param.key, value);
    }
    Ok(codec::deserialize(record)?)
}
