//! Vertex and plain-document construction.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::constants::{FIELD_ID, FIELD_LABEL};
use crate::error::{CosmoError, Result};
use crate::mapping::descriptor::{EntityDescriptor, GraphEntity, LabelSource};
use crate::mapping::{entity_to_members, envelope, key_string, EntitySerializer, GraphDocument};

/// Per-call selector overrides for reserved field resolution.
///
/// A member explicitly marked in the entity mapping always wins over the
/// corresponding selector; selectors only fill gaps the mapping leaves.
pub struct VertexOptions<'a, T> {
  pub(crate) id: Option<Box<dyn Fn(&T) -> String + 'a>>,
  pub(crate) label: Option<Box<dyn Fn(&T) -> String + 'a>>,
  pub(crate) partition_key: Option<Box<dyn Fn(&T) -> String + 'a>>,
}

impl<T> Default for VertexOptions<'_, T> {
  fn default() -> Self {
    Self {
      id: None,
      label: None,
      partition_key: None,
    }
  }
}

impl<'a, T> VertexOptions<'a, T> {
  pub fn id_with(mut self, selector: impl Fn(&T) -> String + 'a) -> Self {
    self.id = Some(Box::new(selector));
    self
  }

  pub fn label_with(mut self, selector: impl Fn(&T) -> String + 'a) -> Self {
    self.label = Some(Box::new(selector));
    self
  }

  pub fn partition_key_with(mut self, selector: impl Fn(&T) -> String + 'a) -> Self {
    self.partition_key = Some(Box::new(selector));
    self
  }
}

pub(crate) struct ReservedFields {
  pub id: String,
  pub label: String,
  pub partition_key: String,
}

/// Resolve the reserved id/label/partition-key fields for one entity.
///
/// Partition-key resolution runs first: its absence must fail before any
/// output field is produced. A generated identity is NOT memoized on the
/// source object, so two conversions of the same entity yield two ids; use
/// [`GraphItemBase`](crate::mapping::GraphItemBase) when edges must reference
/// an already-materialized vertex.
pub(crate) fn resolve_reserved<T>(
  descriptor: &EntityDescriptor,
  members: &Map<String, Value>,
  item: &T,
  options: &VertexOptions<'_, T>,
) -> Result<ReservedFields> {
  let partition_key = match &descriptor.partition_key_member {
    Some(member) => member_key(descriptor, members, member)?,
    None => match &options.partition_key {
      Some(selector) => selector(item),
      None => {
        return Err(CosmoError::Configuration(format!(
          "no partition key resolvable for {}: mark a member or supply a selector",
          descriptor.type_name
        )))
      }
    },
  };

  let id = match &descriptor.id_member {
    Some(member) => member_key(descriptor, members, member)?,
    None => match &options.id {
      Some(selector) => selector(item),
      None => Uuid::new_v4().to_string(),
    },
  };

  let label = match &descriptor.label {
    LabelSource::Member(member) => member_key(descriptor, members, member)?,
    LabelSource::Class(label) => label.clone(),
    LabelSource::TypeName => match &options.label {
      Some(selector) => selector(item),
      None => descriptor.type_name.to_string(),
    },
  };

  Ok(ReservedFields {
    id,
    label,
    partition_key,
  })
}

pub(crate) fn member_key(
  descriptor: &EntityDescriptor,
  members: &Map<String, Value>,
  member: &str,
) -> Result<String> {
  let value = members.get(member).ok_or_else(|| {
    CosmoError::Configuration(format!(
      "{} maps member '{member}' but the serialized entity has no such field",
      descriptor.type_name
    ))
  })?;
  key_string(value, member)
}

impl EntitySerializer {
  /// Convert an entity into a graph vertex document.
  ///
  /// The result contains exactly the reserved id/label/partition-key fields
  /// plus one envelope-wrapped entry per emittable member.
  pub fn to_vertex<T: GraphEntity + 'static>(&self, item: &T) -> Result<GraphDocument> {
    self.to_vertex_with(item, VertexOptions::default())
  }

  /// [`to_vertex`](Self::to_vertex) with per-call selector overrides.
  pub fn to_vertex_with<T: GraphEntity + 'static>(
    &self,
    item: &T,
    options: VertexOptions<'_, T>,
  ) -> Result<GraphDocument> {
    self.build(item, &options, true)
  }

  /// Convert an entity into a plain document for the document-API surface.
  ///
  /// Reserved fields resolve exactly as for vertices; member values are
  /// emitted directly instead of being envelope-wrapped.
  pub fn to_document<T: GraphEntity + 'static>(&self, item: &T) -> Result<GraphDocument> {
    self.to_document_with(item, VertexOptions::default())
  }

  /// [`to_document`](Self::to_document) with per-call selector overrides.
  pub fn to_document_with<T: GraphEntity + 'static>(
    &self,
    item: &T,
    options: VertexOptions<'_, T>,
  ) -> Result<GraphDocument> {
    self.build(item, &options, false)
  }

  fn build<T: GraphEntity + 'static>(
    &self,
    item: &T,
    options: &VertexOptions<'_, T>,
    wrap_members: bool,
  ) -> Result<GraphDocument> {
    let descriptor = self.descriptor::<T>();
    let members = entity_to_members(item, descriptor.type_name)?;
    let reserved = resolve_reserved(&descriptor, &members, item, options)?;

    let mut document = GraphDocument::new();
    document.insert(FIELD_ID.to_string(), Value::String(reserved.id));
    document.insert(FIELD_LABEL.to_string(), Value::String(reserved.label));
    document.insert(
      self.partition_key_field().to_string(),
      Value::String(reserved.partition_key),
    );

    for (name, value) in members {
      if !descriptor.emits(&name) {
        continue;
      }
      let value = if wrap_members {
        envelope::wrap(value)
      } else {
        value
      };
      document.insert(name, value);
    }

    Ok(document)
  }
}
