//! Dual-shape response decoding.
//!
//! The same service returns vertices in two shapes depending on which API
//! surface served the request: the document-query surface returns flat
//! documents whose graph properties are single-element `{id, _value, meta}`
//! envelopes, while the traversal surface nests every property under a
//! `properties` container keyed by name, each entry a sequence of
//! `{id, value}` pairs. The shape is sniffed structurally; there is no
//! declared discriminator.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::constants::{GRAPHSON_PROPERTIES, GRAPHSON_VALUE};
use crate::error::{CosmoError, Result};
use crate::mapping::{envelope, EntitySerializer};

impl EntitySerializer {
  /// Decode a raw service payload into `T`.
  ///
  /// Unmapped source fields are ignored; target members with no source field
  /// fall back to the target's serde defaults. A payload that cannot be
  /// coerced into `T` fails with a conversion error.
  pub fn from_graphson<T: DeserializeOwned>(&self, payload: &Value) -> Result<T> {
    let fields = payload
      .as_object()
      .ok_or_else(|| CosmoError::Conversion("payload is not an object".to_string()))?;

    let flat = match fields.get(GRAPHSON_PROPERTIES) {
      Some(Value::Object(properties)) => flatten_traversal(fields, properties)?,
      _ => flatten_document(fields),
    };

    serde_json::from_value(Value::Object(flat))
      .map_err(|error| CosmoError::Conversion(format!("coerce payload into target: {error}")))
  }
}

/// Flatten the traversal-surface shape: reserved fields are copied as-is,
/// every nested property collapses to its first entry's value.
fn flatten_traversal(
  fields: &Map<String, Value>,
  properties: &Map<String, Value>,
) -> Result<Map<String, Value>> {
  let mut flat = Map::new();

  for (name, value) in fields {
    if name != GRAPHSON_PROPERTIES {
      flat.insert(name.clone(), value.clone());
    }
  }

  for (name, entries) in properties {
    flat.insert(name.clone(), first_entry_value(name, entries)?);
  }

  Ok(flat)
}

fn first_entry_value(name: &str, entries: &Value) -> Result<Value> {
  let Value::Array(entries) = entries else {
    return Err(CosmoError::Conversion(format!(
      "property '{name}' is not a sequence of entries"
    )));
  };

  let Some(first) = entries.first() else {
    return Ok(Value::Null);
  };

  first
    .as_object()
    .and_then(|entry| entry.get(GRAPHSON_VALUE))
    .cloned()
    .ok_or_else(|| {
      CosmoError::Conversion(format!("property '{name}' entry carries no '{GRAPHSON_VALUE}'"))
    })
}

/// Flatten the document-query shape: envelope-wrapped fields unwrap to their
/// value, everything else passes through unchanged.
fn flatten_document(fields: &Map<String, Value>) -> Map<String, Value> {
  fields
    .iter()
    .map(|(name, value)| (name.clone(), envelope::unwrap(value)))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn traversal_properties_collapse_to_first_entry_value() {
    let entries = json!([{"id": "p1", "value": "first"}, {"id": "p2", "value": "second"}]);
    assert_eq!(first_entry_value("Title", &entries).expect("value"), json!("first"));
  }

  #[test]
  fn empty_traversal_property_collapses_to_null() {
    assert_eq!(first_entry_value("Title", &json!([])).expect("value"), Value::Null);
  }

  #[test]
  fn malformed_traversal_entries_are_conversion_errors() {
    assert!(first_entry_value("Title", &json!("not-a-seq")).is_err());
    assert!(first_entry_value("Title", &json!([{"id": "p1"}])).is_err());
  }
}
