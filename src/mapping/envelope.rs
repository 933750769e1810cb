//! Graph property envelope wrapping.
//!
//! The wire format models every vertex property as a sequence of
//! `{id, _value, meta}` entries; this engine always emits exactly one entry
//! per property. Values pass through untyped — no deep transformation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::constants::{ENVELOPE_ID, ENVELOPE_META, ENVELOPE_VALUE};

/// One entry of a wrapped graph property, wire-exact field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphProperty {
  pub id: String,
  #[serde(rename = "_value")]
  pub value: Value,
  #[serde(default)]
  pub meta: Map<String, Value>,
}

/// Wrap a member value into a single-element envelope sequence.
///
/// The envelope id is freshly generated on every call and is unrelated to
/// the parent vertex identity; callers must not use it for equality.
pub fn wrap(value: Value) -> Value {
  let mut entry = Map::new();
  entry.insert(
    ENVELOPE_ID.to_string(),
    Value::String(Uuid::new_v4().to_string()),
  );
  entry.insert(ENVELOPE_VALUE.to_string(), value);
  entry.insert(ENVELOPE_META.to_string(), Value::Object(Map::new()));
  Value::Array(vec![Value::Object(entry)])
}

/// Unwrap a single-element envelope sequence back to its value.
///
/// Anything that is not envelope-shaped passes through unchanged.
pub fn unwrap(value: &Value) -> Value {
  if let Value::Array(entries) = value {
    if entries.len() == 1 {
      if let Some(entry) = entries[0].as_object() {
        if let Some(inner) = entry.get(ENVELOPE_VALUE) {
          return inner.clone();
        }
      }
    }
  }
  value.clone()
}
