//! Entity-to-graph mapping engine.
//!
//! Converts typed entities into the vertex/edge document shapes expected by
//! the remote property-graph API, and reads either of the service's two
//! response shapes back into typed entities. The engine is pure and
//! reentrant; the only shared state is the read-mostly descriptor cache.

pub mod descriptor;
pub mod edge;
pub mod envelope;
pub mod graphson;
pub mod vertex;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::constants::DEFAULT_PARTITION_KEY_FIELD;
use crate::error::{CosmoError, Result};
use descriptor::{DescriptorCache, EntityDescriptor};

pub use descriptor::{EntityMapping, GraphEntity};
pub use edge::GraphItemBase;
pub use vertex::VertexOptions;

/// Ordered document representation ready for wire serialization.
///
/// Field order and the exact key set are part of the contract; consumers
/// assert exact key counts.
pub type GraphDocument = IndexMap<String, Value>;

/// Converts typed entities to and from the service's document shapes.
///
/// Holds the configurable partition-key field name and the per-type
/// descriptor cache; safe to share across threads.
#[derive(Debug, Default)]
pub struct EntitySerializer {
  partition_key_field: Option<String>,
  descriptors: DescriptorCache,
}

impl EntitySerializer {
  /// Serializer with a custom partition-key field name.
  pub fn new(partition_key_field: impl Into<String>) -> Self {
    Self {
      partition_key_field: Some(partition_key_field.into()),
      descriptors: DescriptorCache::default(),
    }
  }

  /// Name of the reserved partition-key field in produced documents.
  pub fn partition_key_field(&self) -> &str {
    self
      .partition_key_field
      .as_deref()
      .unwrap_or(DEFAULT_PARTITION_KEY_FIELD)
  }

  pub(crate) fn descriptor<T: GraphEntity + 'static>(&self) -> Arc<EntityDescriptor> {
    self.descriptors.resolve::<T>()
  }
}

/// Serialize an entity into its member map, preserving declaration order.
pub(crate) fn entity_to_members<T: Serialize>(
  item: &T,
  type_name: &str,
) -> Result<Map<String, Value>> {
  match serde_json::to_value(item) {
    Ok(Value::Object(members)) => Ok(members),
    Ok(_) => Err(CosmoError::Serialization(format!(
      "{type_name} did not serialize to an object"
    ))),
    Err(error) => Err(CosmoError::Serialization(format!(
      "serialize {type_name}: {error}"
    ))),
  }
}

/// Coerce a member value into a reserved key field (id/label/partition key).
pub(crate) fn key_string(value: &Value, member: &str) -> Result<String> {
  match value {
    Value::String(text) => Ok(text.clone()),
    Value::Number(number) => Ok(number.to_string()),
    Value::Bool(flag) => Ok(flag.to_string()),
    _ => Err(CosmoError::Configuration(format!(
      "member '{member}' does not hold a scalar usable as a key field"
    ))),
  }
}
