//! Edge construction and endpoint references.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::constants::{
  FIELD_ID, FIELD_IS_EDGE, FIELD_LABEL, FIELD_SINK, FIELD_SINK_LABEL, FIELD_SINK_PARTITION,
  FIELD_VERTEX_ID, FIELD_VERTEX_LABEL,
};
use crate::error::Result;
use crate::mapping::descriptor::{GraphEntity, LabelSource};
use crate::mapping::vertex::{member_key, resolve_reserved, VertexOptions};
use crate::mapping::{entity_to_members, envelope, EntitySerializer, GraphDocument};

/// Lightweight reference to an already-materialized vertex.
///
/// Prefer this for edge endpoints over live objects when the entity type has
/// no marked identity member: re-deriving identity from such an object
/// generates a fresh id on every conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphItemBase {
  pub id: String,
  pub label: String,
  pub partition_key: String,
}

impl EntitySerializer {
  /// Resolve an entity into an endpoint reference.
  pub fn endpoint<T: GraphEntity + 'static>(&self, item: &T) -> Result<GraphItemBase> {
    let descriptor = self.descriptor::<T>();
    let members = entity_to_members(item, descriptor.type_name)?;
    let reserved = resolve_reserved(&descriptor, &members, item, &VertexOptions::default())?;

    Ok(GraphItemBase {
      id: reserved.id,
      label: reserved.label,
      partition_key: reserved.partition_key,
    })
  }

  /// Build an edge document between two endpoint references.
  ///
  /// With `single == true` the edge id is `"{source.id}-{dest.id}"`, so
  /// repeated calls address the same logical edge and upserts stay
  /// idempotent. With `single == false` a fresh id is generated per call,
  /// allowing parallel edges of the same kind between the same vertices.
  ///
  /// The edge inherits its partition key from the source endpoint; edge
  /// types need no identity/label/partition-key members of their own.
  pub fn to_edge<E: GraphEntity + 'static>(
    &self,
    edge: &E,
    source: &GraphItemBase,
    dest: &GraphItemBase,
    single: bool,
  ) -> Result<GraphDocument> {
    let descriptor = self.descriptor::<E>();
    let members = entity_to_members(edge, descriptor.type_name)?;

    let id = if single {
      format!("{}-{}", source.id, dest.id)
    } else {
      Uuid::new_v4().to_string()
    };

    let label = match &descriptor.label {
      LabelSource::Member(member) => member_key(&descriptor, &members, member)?,
      LabelSource::Class(label) => label.clone(),
      LabelSource::TypeName => descriptor.type_name.to_string(),
    };

    let mut document = GraphDocument::new();
    document.insert(FIELD_ID.to_string(), Value::String(id));
    document.insert(FIELD_LABEL.to_string(), Value::String(label));
    document.insert(
      self.partition_key_field().to_string(),
      Value::String(source.partition_key.clone()),
    );
    document.insert(FIELD_IS_EDGE.to_string(), Value::Bool(true));
    document.insert(
      FIELD_VERTEX_ID.to_string(),
      Value::String(source.id.clone()),
    );
    document.insert(
      FIELD_VERTEX_LABEL.to_string(),
      Value::String(source.label.clone()),
    );
    document.insert(FIELD_SINK.to_string(), Value::String(dest.id.clone()));
    document.insert(
      FIELD_SINK_LABEL.to_string(),
      Value::String(dest.label.clone()),
    );
    document.insert(
      FIELD_SINK_PARTITION.to_string(),
      Value::String(dest.partition_key.clone()),
    );

    for (name, value) in members {
      if !descriptor.emits(&name) {
        continue;
      }
      document.insert(name, envelope::wrap(value));
    }

    Ok(document)
  }

  /// Build an edge between two live entities, resolving both endpoints
  /// first. Endpoint resolution applies the same rules as vertex
  /// conversion, including the partition-key requirement.
  pub fn to_edge_between<E, S, D>(
    &self,
    edge: &E,
    source: &S,
    dest: &D,
    single: bool,
  ) -> Result<GraphDocument>
  where
    E: GraphEntity + 'static,
    S: GraphEntity + 'static,
    D: GraphEntity + 'static,
  {
    let source = self.endpoint(source)?;
    let dest = self.endpoint(dest)?;
    self.to_edge(edge, &source, &dest, single)
  }
}
